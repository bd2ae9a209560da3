use std::str::FromStr;

use orgscope_core::{AppError, OrganizationId};
use orgscope_domain::{ResourceType, ScopeModel, UserId};
use uuid::Uuid;

pub const USAGE: &str = "usage:
  orgscope-inspect team <org-id> <user-id>
  orgscope-inspect filter <org-id> <user-id> <resource>
  orgscope-inspect access <org-id> <user-id> <resource> <record-org-id> <record-id> [assignee-id]";

/// One inspection request read from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Team {
        organization_id: OrganizationId,
        user_id: UserId,
    },
    Filter {
        organization_id: OrganizationId,
        user_id: UserId,
        resource: ResourceType,
    },
    Access {
        organization_id: OrganizationId,
        user_id: UserId,
        resource: ResourceType,
        record_organization_id: OrganizationId,
        record_id: Uuid,
        assigned_to: Option<UserId>,
    },
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, AppError> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match args.as_slice() {
            ["team", organization_id, user_id] => Ok(Self::Team {
                organization_id: OrganizationId::from_str(organization_id)?,
                user_id: UserId::from_str(user_id)?,
            }),
            ["filter", organization_id, user_id, resource] => Ok(Self::Filter {
                organization_id: OrganizationId::from_str(organization_id)?,
                user_id: UserId::from_str(user_id)?,
                resource: ResourceType::from_str(resource)?,
            }),
            ["access", organization_id, user_id, resource, record_organization_id, record_id, rest @ ..]
                if rest.len() <= 1 =>
            {
                let resource = ResourceType::from_str(resource)?;
                if !rest.is_empty() && resource.scope_model() != ScopeModel::Assignable {
                    return Err(AppError::Validation(format!(
                        "{resource} records have no assignee\n{USAGE}"
                    )));
                }

                Ok(Self::Access {
                    organization_id: OrganizationId::from_str(organization_id)?,
                    user_id: UserId::from_str(user_id)?,
                    resource,
                    record_organization_id: OrganizationId::from_str(record_organization_id)?,
                    record_id: Uuid::parse_str(record_id).map_err(|error| {
                        AppError::Validation(format!("invalid record id '{record_id}': {error}"))
                    })?,
                    assigned_to: rest
                        .first()
                        .map(|assignee| UserId::from_str(assignee))
                        .transpose()?,
                })
            }
            _ => Err(AppError::Validation(USAGE.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use orgscope_core::AppError;
    use orgscope_domain::ResourceType;

    use super::Command;

    const ORG: &str = "0b6f3a2e-1c4d-4e5f-8a9b-0c1d2e3f4a5b";
    const USER: &str = "c0a80101-0000-4000-8000-000000000001";

    fn parse(args: &[&str]) -> Result<Command, AppError> {
        let args: Vec<String> = args.iter().map(|arg| (*arg).to_owned()).collect();
        Command::parse(&args)
    }

    #[test]
    fn parses_filter_command() {
        let command = parse(&["filter", ORG, USER, "leads"]);
        assert!(matches!(
            command,
            Ok(Command::Filter {
                resource: ResourceType::Leads,
                ..
            })
        ));
    }

    #[test]
    fn access_assignee_is_optional() {
        let unassigned = parse(&["access", ORG, USER, "tasks", ORG, USER]);
        assert!(matches!(
            unassigned,
            Ok(Command::Access {
                assigned_to: None,
                ..
            })
        ));

        let assigned = parse(&["access", ORG, USER, "tasks", ORG, USER, USER]);
        assert!(matches!(
            assigned,
            Ok(Command::Access {
                assigned_to: Some(_),
                ..
            })
        ));
    }

    #[test]
    fn assignee_is_rejected_for_resources_without_one() {
        for resource in ["users", "departments", "roles", "organization"] {
            let command = parse(&["access", ORG, USER, resource, ORG, USER, USER]);
            assert!(
                matches!(command, Err(AppError::Validation(ref message)) if message.contains("usage")),
                "{resource}"
            );

            let without_assignee = parse(&["access", ORG, USER, resource, ORG, USER]);
            assert!(matches!(
                without_assignee,
                Ok(Command::Access {
                    assigned_to: None,
                    ..
                })
            ));
        }
    }

    #[test]
    fn rejects_unknown_resources_and_malformed_ids() {
        assert!(matches!(
            parse(&["filter", ORG, USER, "invoices"]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse(&["team", "not-a-uuid", USER]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(parse(&["team", ORG]), Err(AppError::Validation(_))));
    }
}
