//! Client library for the Android app store daemon.
//!
//! The daemon lives on the user session bus under a well-known name and
//! exposes repository, install, and search operations as method calls.
//! This crate owns the transport side of talking to it:
//! - [`StoreClient`]: one connection handle, built per setup and replaced
//!   wholesale on reconnect
//! - [`StoreBackend`]: the typed async call surface, also implementable
//!   by test doubles
//! - [`ClientError`]: transport envelopes unwrapped into domain errors
//!
//! # Example
//!
//! ```rust,ignore
//! use android_store_client::{StoreBackend, StoreClient};
//!
//! let client = StoreClient::connect().await?;
//! for (name, url) in client.repositories().await? {
//!     println!("{name}: {url}");
//! }
//! ```

pub mod backend;
pub mod client;
pub mod error;
pub mod proxy;
pub mod types;

pub use backend::{cancellable, StoreBackend};
pub use client::{BusAddress, StoreClient};
pub use error::{ClientError, Result};
pub use types::{PackageEntry, SearchEntry, SearchPackage};
