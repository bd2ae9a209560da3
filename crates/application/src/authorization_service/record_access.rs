use orgscope_domain::ScopeModel;

use super::*;

impl ActorAuthorization {
    /// Checks whether the actor may access one already fetched record.
    ///
    /// Accepts exactly the records the filter from
    /// [`ActorAuthorization::compile_filter`] accepts. The team and the
    /// assignee's department are only looked up when a granted scope needs
    /// them.
    pub async fn can_access(&self, resource: ResourceType, record: &RecordRef) -> AppResult<bool> {
        if record.organization_id() != self.actor.organization_id() {
            return Ok(false);
        }

        let scopes = self.actor.view_scopes(resource);
        if scopes.all {
            return Ok(true);
        }

        match resource.scope_model() {
            ScopeModel::Assignable => {
                let assignee = record.assigned_to();

                if scopes.team {
                    let Some(assignee) = assignee else {
                        return Ok(true);
                    };
                    if self.team().await?.contains(assignee) {
                        return Ok(true);
                    }
                }

                if scopes.department
                    && let Some(department_id) = self.actor.department_id()
                {
                    let Some(assignee) = assignee else {
                        return Ok(true);
                    };
                    let assignee_department = self
                        .repository
                        .find_user_department(self.actor.organization_id(), assignee)
                        .await?;
                    if assignee_department == Some(department_id) {
                        return Ok(true);
                    }
                }

                if scopes.own && assignee.is_none_or(|assignee| assignee == self.actor.id()) {
                    return Ok(true);
                }

                Ok(false)
            }
            ScopeModel::Directory => {
                let member_id = record.member_id();
                if scopes.team {
                    return Ok(self.team().await?.contains(member_id));
                }

                Ok(member_id == self.actor.id())
            }
            ScopeModel::OrganizationWide => Ok(false),
        }
    }

    /// Ensures the actor may access one already fetched record.
    ///
    /// The error never says why: records of other organizations and records
    /// outside the actor's scope are indistinguishable.
    pub async fn require_record_access(
        &self,
        resource: ResourceType,
        record: &RecordRef,
    ) -> AppResult<()> {
        if self.can_access(resource, record).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "{resource} record is not accessible"
        )))
    }
}
