//! Listing queries from the host.
//!
//! The host describes what it wants listed with a small property set; this
//! adapter only serves queries that select exactly one property, and only
//! in the affirmative.

/// Three-valued query property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tristate {
    /// The property does not participate in the query.
    #[default]
    Unset,
    /// The property must not hold.
    False,
    /// The property must hold.
    True,
}

/// A listing request.
#[derive(Debug, Clone, Default)]
pub struct AppQuery {
    /// Select repository records.
    pub is_source: Tristate,
    /// Select installed apps.
    pub is_installed: Tristate,
    /// Select apps with pending updates.
    pub is_for_updates: Tristate,
    /// Free-text search keywords.
    pub keywords: Option<Vec<String>>,
}

impl AppQuery {
    /// Query for repository records.
    #[must_use]
    pub fn sources() -> Self {
        Self {
            is_source: Tristate::True,
            ..Self::default()
        }
    }

    /// Query for installed apps.
    #[must_use]
    pub fn installed() -> Self {
        Self {
            is_installed: Tristate::True,
            ..Self::default()
        }
    }

    /// Query for apps with pending updates.
    #[must_use]
    pub fn for_updates() -> Self {
        Self {
            is_for_updates: Tristate::True,
            ..Self::default()
        }
    }

    /// Keyword search query.
    #[must_use]
    pub fn keywords(words: Vec<String>) -> Self {
        Self {
            keywords: Some(words),
            ..Self::default()
        }
    }

    /// Number of properties this query constrains.
    #[must_use]
    pub fn properties_set(&self) -> usize {
        let mut n = 0;
        for tristate in [self.is_source, self.is_installed, self.is_for_updates] {
            if tristate != Tristate::Unset {
                n += 1;
            }
        }
        if self.keywords.is_some() {
            n += 1;
        }
        n
    }

    /// Whether any property is constrained in the negative.
    #[must_use]
    pub fn has_negation(&self) -> bool {
        [self.is_source, self.is_installed, self.is_for_updates]
            .contains(&Tristate::False)
    }
}
