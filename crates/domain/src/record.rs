use orgscope_core::OrganizationId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{User, UserId};

/// The fields of a fetched record that visibility rules look at.
///
/// For assignable resources `assigned_to` is the record's assignee. For the
/// member directory the record id is the member's user id and there is no
/// assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    id: Uuid,
    organization_id: OrganizationId,
    assigned_to: Option<UserId>,
}

impl RecordRef {
    /// Describes a customer, lead, or task record.
    #[must_use]
    pub fn assignable(
        id: Uuid,
        organization_id: OrganizationId,
        assigned_to: Option<UserId>,
    ) -> Self {
        Self {
            id,
            organization_id,
            assigned_to,
        }
    }

    /// Describes a member directory entry.
    #[must_use]
    pub fn member(user: &User) -> Self {
        Self {
            id: user.id().as_uuid(),
            organization_id: user.organization_id(),
            assigned_to: None,
        }
    }

    /// Describes a record that has no assignee concept, such as a department.
    #[must_use]
    pub fn unowned(id: Uuid, organization_id: OrganizationId) -> Self {
        Self {
            id,
            organization_id,
            assigned_to: None,
        }
    }

    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the assignee, `None` when unassigned.
    #[must_use]
    pub fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the record id read as a member's user id.
    #[must_use]
    pub fn member_id(&self) -> UserId {
        UserId::from_uuid(self.id)
    }
}
