//! Storage-agnostic record filters produced by scope compilation.
//!
//! A [`FilterSpec`] is always the conjunction of an organization match and a
//! [`ScopeFilter`]. The persistence layer translates it into its own query
//! language; [`FilterSpec::matches`] evaluates it in process.

use std::collections::BTreeSet;

use orgscope_core::OrganizationId;
use serde::{Deserialize, Serialize};

use crate::{DepartmentId, RecordRef, UserId};

/// Compiled visibility predicate for one actor and resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    organization_id: OrganizationId,
    scope: ScopeFilter,
}

/// Scope part of a filter, evaluated only after the organization matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScopeFilter {
    /// Every record of the organization.
    Unrestricted,
    /// No record at all.
    MatchNothing,
    /// Records matching at least one clause.
    AnyOf {
        /// Non-empty list of alternatives.
        clauses: Vec<ScopeClause>,
    },
}

/// One alternative of a scope filter.
///
/// Assignee clauses also match unassigned records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScopeClause {
    /// The assignee belongs to the department.
    AssigneeInDepartment {
        /// Department the assignee must belong to.
        department_id: DepartmentId,
    },
    /// The assignee is one of the listed users.
    AssigneeIn {
        /// Allowed assignees.
        user_ids: BTreeSet<UserId>,
    },
    /// The assignee is the given user.
    AssigneeIs {
        /// Allowed assignee.
        user_id: UserId,
    },
    /// The directory entry is one of the listed users.
    MemberIn {
        /// Allowed members.
        user_ids: BTreeSet<UserId>,
    },
    /// The directory entry is the given user.
    MemberIs {
        /// Allowed member.
        user_id: UserId,
    },
}

impl ScopeClause {
    /// Evaluates the clause against one record of the same organization.
    #[must_use]
    pub fn matches(&self, record: &RecordRef, assignee_department: Option<DepartmentId>) -> bool {
        match self {
            Self::AssigneeInDepartment { department_id } => record
                .assigned_to()
                .is_none_or(|_| assignee_department == Some(*department_id)),
            Self::AssigneeIn { user_ids } => record
                .assigned_to()
                .is_none_or(|assignee| user_ids.contains(&assignee)),
            Self::AssigneeIs { user_id } => record
                .assigned_to()
                .is_none_or(|assignee| assignee == *user_id),
            Self::MemberIn { user_ids } => user_ids.contains(&record.member_id()),
            Self::MemberIs { user_id } => record.member_id() == *user_id,
        }
    }
}

impl FilterSpec {
    /// Matches every record of the organization.
    #[must_use]
    pub fn organization_only(organization_id: OrganizationId) -> Self {
        Self {
            organization_id,
            scope: ScopeFilter::Unrestricted,
        }
    }

    /// Matches nothing, not even records of the organization.
    #[must_use]
    pub fn match_nothing(organization_id: OrganizationId) -> Self {
        Self {
            organization_id,
            scope: ScopeFilter::MatchNothing,
        }
    }

    /// OR-combines clauses; an empty list compiles to [`ScopeFilter::MatchNothing`].
    #[must_use]
    pub fn any_of(organization_id: OrganizationId, clauses: Vec<ScopeClause>) -> Self {
        if clauses.is_empty() {
            return Self::match_nothing(organization_id);
        }

        Self {
            organization_id,
            scope: ScopeFilter::AnyOf { clauses },
        }
    }

    /// Returns the organization every matching record must belong to.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the scope part of the filter.
    #[must_use]
    pub fn scope(&self) -> &ScopeFilter {
        &self.scope
    }

    /// Returns whether the filter can never match.
    #[must_use]
    pub fn is_match_nothing(&self) -> bool {
        matches!(self.scope, ScopeFilter::MatchNothing)
    }

    /// Returns whether evaluating the filter needs the assignee's department.
    #[must_use]
    pub fn needs_assignee_department(&self) -> bool {
        match &self.scope {
            ScopeFilter::AnyOf { clauses } => clauses
                .iter()
                .any(|clause| matches!(clause, ScopeClause::AssigneeInDepartment { .. })),
            ScopeFilter::Unrestricted | ScopeFilter::MatchNothing => false,
        }
    }

    /// Evaluates the filter against one record.
    ///
    /// `assignee_department` is the department of `record.assigned_to()` as
    /// looked up by the caller; it is only read by department clauses.
    #[must_use]
    pub fn matches(&self, record: &RecordRef, assignee_department: Option<DepartmentId>) -> bool {
        if record.organization_id() != self.organization_id {
            return false;
        }

        match &self.scope {
            ScopeFilter::Unrestricted => true,
            ScopeFilter::MatchNothing => false,
            ScopeFilter::AnyOf { clauses } => clauses
                .iter()
                .any(|clause| clause.matches(record, assignee_department)),
        }
    }
}
