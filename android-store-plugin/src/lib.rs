//! Software-center adapter for the Android app store service.
//!
//! The adapter is a thin bridge between a software-center host and the
//! Android store daemon: host verbs become single remote calls, replies
//! become shared application records, and two in-memory caches keep
//! enough state to answer installed/available questions locally.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Software-center host                       │
//! │   setup │ refresh │ list │ install │ uninstall │ update │ …   │
//! └──────────────────────────────────────────────────────────────┘
//!          │ verb table (StorePlugin)        ▲ PluginEvent
//!          ▼                                 │
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    AndroidStorePlugin                         │
//! │  admission rules → one remote call → reconcile → caches       │
//! └──────────────────────────────────────────────────────────────┘
//!          │ StoreBackend (android-store-client)
//!          ▼
//!    ┌───────────────────────────┐
//!    │  Android store daemon     │
//!    │  (session bus peer)       │
//!    └───────────────────────────┘
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod launch;
pub mod plugin;
pub mod query;
pub mod record;
pub mod reconcile;

pub use config::{BusConfig, ConfigError, StoreConfig};
pub use error::{PluginError, Result};
pub use launch::{desktop_entry_eligible, AppLauncher, DesktopEntry};
pub use plugin::{
    AndroidStorePlugin, InstallFlags, LaunchFlags, ListFlags, PluginDescriptor, PluginEvent,
    PluginRule, RefreshFlags, RepositoryFlags, StorePlugin, StoreStatus, UninstallFlags,
    UpdateFlags,
};
pub use query::{AppQuery, Tristate};
pub use record::{AppHandle, AppKind, AppRecord, AppScope, AppState, NameQuality};
