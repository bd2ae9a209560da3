use std::time::Duration;

use orgscope_core::{AppError, AppResult};

/// Bounds applied to every team resolution.
///
/// Every bound is non-zero; values only come from [`HierarchyConfig::new`]
/// or [`HierarchyConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyConfig {
    max_depth: usize,
    max_members: usize,
    timeout: Duration,
}

impl HierarchyConfig {
    /// Default maximum reporting depth.
    pub const DEFAULT_MAX_DEPTH: usize = 32;
    /// Default maximum team size.
    pub const DEFAULT_MAX_MEMBERS: usize = 10_000;
    /// Default resolution budget.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates validated bounds.
    pub fn new(max_depth: usize, max_members: usize, timeout: Duration) -> AppResult<Self> {
        if max_depth == 0 {
            return Err(AppError::Validation(
                "hierarchy max depth must be greater than zero".to_owned(),
            ));
        }
        if max_members == 0 {
            return Err(AppError::Validation(
                "hierarchy max members must be greater than zero".to_owned(),
            ));
        }
        if timeout.is_zero() {
            return Err(AppError::Validation(
                "hierarchy timeout must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            max_depth,
            max_members,
            timeout,
        })
    }

    /// Returns the same bounds with a different resolution budget.
    pub fn with_timeout(self, timeout: Duration) -> AppResult<Self> {
        Self::new(self.max_depth, self.max_members, timeout)
    }

    /// Maximum number of reporting levels below the resolved user.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Maximum number of members in one team, the user included.
    #[must_use]
    pub fn max_members(&self) -> usize {
        self.max_members
    }

    /// Wall-clock budget for one resolution.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_members: Self::DEFAULT_MAX_MEMBERS,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}
