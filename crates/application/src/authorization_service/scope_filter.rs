use orgscope_domain::{ScopeClause, ScopeModel};
use tracing::debug;

use super::*;

impl ActorAuthorization {
    /// Compiles the filter every list query on `resource` must apply.
    ///
    /// The organization match is always part of the result. `viewAll` alone
    /// decides the filter when granted; otherwise the granted scopes are
    /// OR-combined, and no granted scope compiles to a filter matching
    /// nothing.
    pub async fn compile_filter(&self, resource: ResourceType) -> AppResult<FilterSpec> {
        let organization_id = self.actor.organization_id();
        let scopes = self.actor.view_scopes(resource);

        if scopes.all {
            return Ok(FilterSpec::organization_only(organization_id));
        }

        let clauses = match resource.scope_model() {
            ScopeModel::Assignable => {
                let mut clauses = Vec::new();

                if scopes.department
                    && let Some(department_id) = self.actor.department_id()
                {
                    clauses.push(ScopeClause::AssigneeInDepartment { department_id });
                }

                if scopes.team {
                    let team = self.team().await?;
                    clauses.push(ScopeClause::AssigneeIn {
                        user_ids: team.members().clone(),
                    });
                }

                if scopes.own {
                    clauses.push(ScopeClause::AssigneeIs {
                        user_id: self.actor.id(),
                    });
                }

                clauses
            }
            ScopeModel::Directory => {
                if scopes.team {
                    let team = self.team().await?;
                    vec![ScopeClause::MemberIn {
                        user_ids: team.members().clone(),
                    }]
                } else {
                    vec![ScopeClause::MemberIs {
                        user_id: self.actor.id(),
                    }]
                }
            }
            ScopeModel::OrganizationWide => Vec::new(),
        };

        let filter = FilterSpec::any_of(organization_id, clauses);

        debug!(
            organization_id = %organization_id,
            user_id = %self.actor.id(),
            resource = %resource,
            match_nothing = filter.is_match_nothing(),
            "compiled scope filter"
        );

        Ok(filter)
    }
}
