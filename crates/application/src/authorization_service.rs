use std::sync::Arc;

use orgscope_core::{AppError, AppResult, OrganizationId};
use orgscope_domain::{Actor, FilterSpec, PermissionAction, RecordRef, ResourceType, UserId};
use tokio::sync::OnceCell;

use crate::{DirectoryRepository, HierarchyConfig, HierarchyResolver, TeamClosure};

mod members;
mod permissions;
mod record_access;
mod scope_filter;


/// Application service for organization-scoped authorization checks.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn DirectoryRepository>,
    resolver: HierarchyResolver,
}

/// Authorization checks for one actor within one request.
///
/// The actor's team is resolved at most once and shared by every check made
/// through this value. Create a new one per request: the organization chart
/// may change between requests.
pub struct ActorAuthorization {
    actor: Actor,
    repository: Arc<dyn DirectoryRepository>,
    resolver: HierarchyResolver,
    team: OnceCell<TeamClosure>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a directory implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn DirectoryRepository>, config: HierarchyConfig) -> Self {
        let resolver = HierarchyResolver::new(repository.clone(), config);
        Self {
            repository,
            resolver,
        }
    }

    /// Returns the hierarchy resolver used by this service.
    #[must_use]
    pub fn resolver(&self) -> &HierarchyResolver {
        &self.resolver
    }

    /// Starts a request-scoped evaluation for an already loaded actor.
    #[must_use]
    pub fn for_actor(&self, actor: Actor) -> ActorAuthorization {
        ActorAuthorization {
            actor,
            repository: self.repository.clone(),
            resolver: self.resolver.clone(),
            team: OnceCell::new(),
        }
    }

    /// Loads an actor from the directory and starts a request-scoped evaluation.
    pub async fn load_actor(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<ActorAuthorization> {
        let actor = self
            .repository
            .find_actor(organization_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))?;

        Ok(self.for_actor(actor))
    }

    /// Returns whether the actor's role grants `action` on `resource`.
    #[must_use]
    pub fn permitted(
        &self,
        actor: &Actor,
        resource: ResourceType,
        action: PermissionAction,
    ) -> bool {
        actor.permits(resource, action)
    }

    /// Compiles the list filter for a single check.
    pub async fn compile_filter(
        &self,
        actor: &Actor,
        resource: ResourceType,
    ) -> AppResult<FilterSpec> {
        self.for_actor(actor.clone()).compile_filter(resource).await
    }

    /// Checks access to one fetched record for a single check.
    pub async fn can_access(
        &self,
        actor: &Actor,
        resource: ResourceType,
        record: &RecordRef,
    ) -> AppResult<bool> {
        self.for_actor(actor.clone())
            .can_access(resource, record)
            .await
    }
}

impl ActorAuthorization {
    /// Returns the evaluated actor.
    #[must_use]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Returns the actor's team, resolving it on first use.
    pub async fn team(&self) -> AppResult<&TeamClosure> {
        self.team
            .get_or_try_init(|| {
                self.resolver
                    .subordinate_closure(self.actor.organization_id(), self.actor.id())
            })
            .await
    }
}
