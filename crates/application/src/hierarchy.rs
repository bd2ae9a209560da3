//! Management hierarchy resolution.
//!
//! A user's team is the transitive closure of the inverse `manager_id`
//! relation, starting at the user. The traversal is breadth first, one level
//! at a time: every direct-report lookup of a level runs concurrently, and the
//! next level starts only when all of them returned. A visited set keeps
//! cyclic data finite, and depth, size, and time bounds keep malformed data
//! from causing unbounded work. A resolution that hits a bound fails as a
//! whole; a partial team is never returned.

mod config;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::try_join_all;
use orgscope_core::{AppError, AppResult, OrganizationId};
use orgscope_domain::UserId;
use serde::Serialize;
use tracing::{debug, warn};

use crate::DirectoryRepository;

pub use config::HierarchyConfig;

/// Resolved team of one user. Always contains the user itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamClosure {
    root: UserId,
    members: BTreeSet<UserId>,
}

impl TeamClosure {
    /// Returns the user the team was resolved for.
    #[must_use]
    pub fn root(&self) -> UserId {
        self.root
    }

    /// Returns whether `user_id` is the root or reports to it.
    #[must_use]
    pub fn contains(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }

    /// Returns all members.
    #[must_use]
    pub fn members(&self) -> &BTreeSet<UserId> {
        &self.members
    }

    /// Returns the member count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: the root is a member of its own team.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Resolves teams against the directory.
#[derive(Clone)]
pub struct HierarchyResolver {
    repository: Arc<dyn DirectoryRepository>,
    config: HierarchyConfig,
}

impl HierarchyResolver {
    /// Creates a resolver with explicit bounds.
    #[must_use]
    pub fn new(repository: Arc<dyn DirectoryRepository>, config: HierarchyConfig) -> Self {
        Self { repository, config }
    }

    /// Returns the configured bounds.
    #[must_use]
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Resolves the team of `user_id` within `organization_id`.
    pub async fn subordinate_closure(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<TeamClosure> {
        let traversal = self.traverse(organization_id, user_id);

        match tokio::time::timeout(self.config.timeout(), traversal).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    organization_id = %organization_id,
                    user_id = %user_id,
                    timeout = ?self.config.timeout(),
                    "team resolution timed out"
                );
                Err(AppError::LimitExceeded(format!(
                    "team resolution for user '{user_id}' exceeded {} ms",
                    self.config.timeout().as_millis()
                )))
            }
        }
    }

    async fn traverse(
        &self,
        organization_id: OrganizationId,
        root: UserId,
    ) -> AppResult<TeamClosure> {
        let mut members = BTreeSet::from([root]);
        let mut frontier = vec![root];
        let mut depth = 0_usize;

        while !frontier.is_empty() {
            let level_reports = try_join_all(frontier.iter().map(|manager_id| {
                self.repository
                    .list_direct_reports(organization_id, *manager_id)
            }))
            .await?;

            let mut next_frontier = Vec::new();
            for (manager_id, direct_reports) in frontier.iter().zip(level_reports) {
                for report_id in direct_reports {
                    if members.insert(report_id) {
                        next_frontier.push(report_id);
                    } else {
                        warn!(
                            organization_id = %organization_id,
                            root_id = %root,
                            manager_id = %manager_id,
                            report_id = %report_id,
                            "management cycle detected, member already resolved"
                        );
                    }
                }
            }

            if !next_frontier.is_empty() {
                depth += 1;
                if depth > self.config.max_depth() {
                    warn!(
                        organization_id = %organization_id,
                        root_id = %root,
                        max_depth = self.config.max_depth(),
                        "team resolution exceeded maximum depth"
                    );
                    return Err(AppError::LimitExceeded(format!(
                        "team of user '{root}' is deeper than {} levels",
                        self.config.max_depth()
                    )));
                }
            }

            if members.len() > self.config.max_members() {
                warn!(
                    organization_id = %organization_id,
                    root_id = %root,
                    max_members = self.config.max_members(),
                    "team resolution exceeded maximum size"
                );
                return Err(AppError::LimitExceeded(format!(
                    "team of user '{root}' has more than {} members",
                    self.config.max_members()
                )));
            }

            frontier = next_frontier;
        }

        debug!(
            organization_id = %organization_id,
            root_id = %root,
            members = members.len(),
            depth,
            "team resolved"
        );

        Ok(TeamClosure { root, members })
    }
}
