use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use orgscope_core::{AppError, OrganizationId};
use orgscope_domain::{User, UserId};

use crate::test_support::{FakeDirectoryRepository, chain};

use super::{HierarchyConfig, HierarchyResolver};

fn resolver(
    repository: Arc<FakeDirectoryRepository>,
    config: HierarchyConfig,
) -> HierarchyResolver {
    HierarchyResolver::new(repository, config)
}

#[tokio::test]
async fn closure_of_chain_root_contains_every_level() {
    let organization_id = OrganizationId::new();
    let chain = chain(organization_id);
    let repository = Arc::new(FakeDirectoryRepository::new(chain.users.clone(), Vec::new()));
    let resolver = resolver(repository.clone(), HierarchyConfig::default());

    let team = resolver.subordinate_closure(organization_id, chain.a).await;
    assert!(team.is_ok());
    let Ok(team) = team else { return };

    assert_eq!(
        team.members(),
        &BTreeSet::from([chain.a, chain.b, chain.c, chain.d])
    );
    assert_eq!(team.root(), chain.a);
    assert_eq!(repository.report_lookups(), 4);
}

#[tokio::test]
async fn closure_of_middle_manager_excludes_superiors() {
    let organization_id = OrganizationId::new();
    let chain = chain(organization_id);
    let repository = Arc::new(FakeDirectoryRepository::new(chain.users.clone(), Vec::new()));
    let resolver = resolver(repository, HierarchyConfig::default());

    let team = resolver.subordinate_closure(organization_id, chain.c).await;
    assert!(matches!(
        team,
        Ok(ref team) if team.members() == &BTreeSet::from([chain.c, chain.d])
    ));
}

#[tokio::test]
async fn closure_of_leaf_is_the_user_alone() {
    let organization_id = OrganizationId::new();
    let chain = chain(organization_id);
    let repository = Arc::new(FakeDirectoryRepository::new(chain.users.clone(), Vec::new()));
    let resolver = resolver(repository, HierarchyConfig::default());

    let team = resolver.subordinate_closure(organization_id, chain.d).await;
    assert!(matches!(team, Ok(ref team) if team.len() == 1 && team.contains(chain.d)));
}

#[tokio::test]
async fn unknown_user_still_belongs_to_its_own_team() {
    let organization_id = OrganizationId::new();
    let repository = Arc::new(FakeDirectoryRepository::new(Vec::new(), Vec::new()));
    let resolver = resolver(repository, HierarchyConfig::default());
    let user_id = UserId::new();

    let team = resolver.subordinate_closure(organization_id, user_id).await;
    assert!(matches!(team, Ok(ref team) if team.contains(user_id) && !team.is_empty()));
}

#[tokio::test]
async fn two_person_cycle_terminates() {
    let organization_id = OrganizationId::new();
    let (a, b) = (UserId::new(), UserId::new());
    let users = vec![
        User::new(a, organization_id).with_manager(b),
        User::new(b, organization_id).with_manager(a),
    ];
    let repository = Arc::new(FakeDirectoryRepository::new(users, Vec::new()));
    let resolver = resolver(repository.clone(), HierarchyConfig::default());

    let team = resolver.subordinate_closure(organization_id, a).await;
    assert!(matches!(
        team,
        Ok(ref team) if team.members() == &BTreeSet::from([a, b])
    ));
    assert_eq!(repository.report_lookups(), 2);
}

#[tokio::test]
async fn self_managed_user_terminates() {
    let organization_id = OrganizationId::new();
    let a = UserId::new();
    let users = vec![User::new(a, organization_id).with_manager(a)];
    let repository = Arc::new(FakeDirectoryRepository::new(users, Vec::new()));
    let resolver = resolver(repository, HierarchyConfig::default());

    let team = resolver.subordinate_closure(organization_id, a).await;
    assert!(matches!(team, Ok(ref team) if team.len() == 1));
}

#[tokio::test]
async fn reports_from_other_organizations_are_ignored() {
    let organization_id = OrganizationId::new();
    let manager = UserId::new();
    let local_report = UserId::new();
    let foreign_report = UserId::new();
    let users = vec![
        User::new(manager, organization_id),
        User::new(local_report, organization_id).with_manager(manager),
        User::new(foreign_report, OrganizationId::new()).with_manager(manager),
    ];
    let repository = Arc::new(FakeDirectoryRepository::new(users, Vec::new()));
    let resolver = resolver(repository, HierarchyConfig::default());

    let team = resolver.subordinate_closure(organization_id, manager).await;
    assert!(matches!(
        team,
        Ok(ref team) if team.contains(local_report) && !team.contains(foreign_report)
    ));
}

#[tokio::test]
async fn depth_bound_rejects_deeper_chains() {
    let organization_id = OrganizationId::new();
    let chain = chain(organization_id);
    let repository = Arc::new(FakeDirectoryRepository::new(chain.users.clone(), Vec::new()));

    let shallow = HierarchyConfig::new(2, 100, Duration::from_secs(1));
    assert!(shallow.is_ok());
    let shallow = resolver(repository.clone(), shallow.unwrap_or_default());
    let team = shallow.subordinate_closure(organization_id, chain.a).await;
    assert!(matches!(team, Err(AppError::LimitExceeded(_))));

    let exact = HierarchyConfig::new(3, 100, Duration::from_secs(1));
    let exact = resolver(repository, exact.unwrap_or_default());
    let team = exact.subordinate_closure(organization_id, chain.a).await;
    assert!(matches!(team, Ok(ref team) if team.len() == 4));
}

#[tokio::test]
async fn member_bound_rejects_oversized_teams() {
    let organization_id = OrganizationId::new();
    let manager = UserId::new();
    let mut users = vec![User::new(manager, organization_id)];
    users.extend((0..3).map(|_| User::new(UserId::new(), organization_id).with_manager(manager)));
    let repository = Arc::new(FakeDirectoryRepository::new(users, Vec::new()));
    let config = HierarchyConfig::new(
        HierarchyConfig::DEFAULT_MAX_DEPTH,
        3,
        HierarchyConfig::DEFAULT_TIMEOUT,
    )
    .unwrap_or_default();

    let team = resolver(repository, config)
        .subordinate_closure(organization_id, manager)
        .await;
    assert!(matches!(team, Err(AppError::LimitExceeded(_))));
}

#[tokio::test]
async fn slow_directory_fails_closed_on_timeout() {
    let organization_id = OrganizationId::new();
    let chain = chain(organization_id);
    let repository = Arc::new(
        FakeDirectoryRepository::new(chain.users.clone(), Vec::new())
            .with_lookup_delay(Duration::from_millis(200)),
    );
    let config = HierarchyConfig::default()
        .with_timeout(Duration::from_millis(20))
        .unwrap_or_default();

    let team = resolver(repository, config)
        .subordinate_closure(organization_id, chain.a)
        .await;
    assert!(matches!(team, Err(AppError::LimitExceeded(_))));
}

#[test]
fn config_rejects_zero_bounds() {
    assert!(HierarchyConfig::new(0, 10, Duration::from_secs(1)).is_err());
    assert!(HierarchyConfig::new(10, 0, Duration::from_secs(1)).is_err());
    assert!(HierarchyConfig::new(10, 10, Duration::ZERO).is_err());
    assert!(HierarchyConfig::new(10, 10, Duration::from_millis(1)).is_ok());
}

#[test]
fn timeout_override_keeps_bounds_validated() {
    let config = HierarchyConfig::default().with_timeout(Duration::from_millis(20));
    assert!(matches!(
        config,
        Ok(ref config) if config.timeout() == Duration::from_millis(20)
            && config.max_depth() == HierarchyConfig::DEFAULT_MAX_DEPTH
            && config.max_members() == HierarchyConfig::DEFAULT_MAX_MEMBERS
    ));

    let zero = HierarchyConfig::default().with_timeout(Duration::ZERO);
    assert!(matches!(zero, Err(AppError::Validation(_))));
}
