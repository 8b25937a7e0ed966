//! Dependency tagging for semantic categorization.

use std::time::Duration;

/// Backend dependencies the app talks to.
///
/// Each tag carries a default timeout and retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// Item info and size tables.
    Catalog,
    /// User body measurements and body-scan form.
    Profile,
    /// Cart store.
    Cart,
    /// Fit comments.
    Comments,
    /// Image serving and fit-storage uploads.
    Images,
    /// Account management.
    Members,
    /// AR try-on image generation.
    TryOn,
}

impl DependencyTag {
    pub const ALL: [DependencyTag; 7] = [
        DependencyTag::Catalog,
        DependencyTag::Profile,
        DependencyTag::Cart,
        DependencyTag::Comments,
        DependencyTag::Images,
        DependencyTag::Members,
        DependencyTag::TryOn,
    ];

    /// Get the default timeout for this dependency type.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Catalog | Self::Profile | Self::Comments | Self::Members => {
                Duration::from_secs(10)
            }
            Self::Cart => Duration::from_secs(15),
            Self::Images => Duration::from_secs(30),
            Self::TryOn => Duration::from_secs(120),
        }
    }

    /// Get the default max retries for this dependency type.
    pub fn default_max_retries(&self) -> u32 {
        match self {
            Self::Catalog | Self::Profile | Self::Comments | Self::Images => 2,
            // Generation is slow and expensive; a retry doubles the wait.
            Self::TryOn => 0,
            Self::Cart | Self::Members => 1,
        }
    }

    /// Get the name of this dependency.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Profile => "profile",
            Self::Cart => "cart",
            Self::Comments => "comments",
            Self::Images => "images",
            Self::Members => "members",
            Self::TryOn => "try-on",
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
