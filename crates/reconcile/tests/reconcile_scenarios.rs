use grantsync_auth::{Role, RoleAssignments, RoleUser};
use grantsync_core::{Origin, UserGuid};
use grantsync_directory::{
    DirectorySnapshot, DirectoryUser, InMemoryDirectoryClient, NewExternalUser,
};
use grantsync_reconcile::{
    DesiredMembership, ReconcileConfig, ReconcileError, Reconciler, RoleGranter,
};

#[derive(Debug, Default)]
struct RecordingGranter {
    calls: Vec<(String, UserGuid)>,
    fail_for: Option<String>,
}

impl RoleGranter for RecordingGranter {
    fn grant(&mut self, username: &str, guid: UserGuid) -> anyhow::Result<()> {
        if self.fail_for.as_deref() == Some(username) {
            anyhow::bail!("grant refused");
        }
        self.calls.push((username.to_string(), guid));
        Ok(())
    }
}

fn saml() -> Origin {
    Origin::new("saml")
}

fn setup() {
    grantsync_observability::init();
}

fn desired(groups: &[&str], users: &[&str]) -> DesiredMembership<RecordingGranter> {
    DesiredMembership::new(Role::SPACE_DEVELOPER, RecordingGranter::default())
        .with_groups(groups.iter().copied())
        .with_users(users.iter().copied())
}

#[test]
fn group_member_without_role_is_granted() {
    setup();
    let client = InMemoryDirectoryClient::new();
    let alice = DirectoryUser::external("alice", saml(), UserGuid::new()).with_groups(["admins"]);
    let mut directory: DirectorySnapshot = [alice.clone()].into_iter().collect();
    let mut assignments = RoleAssignments::new();
    let mut desired = desired(&["admins"], &[]);

    Reconciler::new(&client, saml())
        .sync_users(&mut assignments, &mut directory, &mut desired)
        .unwrap();

    assert_eq!(desired.granter().calls, vec![("alice".to_string(), alice.guid)]);
    assert!(client.attempts().is_empty());
}

#[test]
fn explicit_user_missing_from_directory_is_created_then_granted() {
    setup();
    let client = InMemoryDirectoryClient::new();
    let mut directory = DirectorySnapshot::new();
    let mut assignments = RoleAssignments::new();
    let mut desired = desired(&[], &["bob@example.com"]);

    let report = Reconciler::new(&client, saml())
        .sync_users(&mut assignments, &mut directory, &mut desired)
        .unwrap();

    let created = client.created();
    assert_eq!(created.len(), 1);
    let (request, issued_guid) = &created[0];
    assert_eq!(request, &NewExternalUser::from_name("bob@example.com", saml()));

    assert_eq!(
        desired.granter().calls,
        vec![("bob@example.com".to_string(), *issued_guid)]
    );
    assert_eq!(report.created, vec!["bob@example.com"]);
    assert!(
        directory
            .get_by_name_and_origin("bob@example.com", &saml())
            .is_some()
    );
}

#[test]
fn existing_holder_is_preserved_not_regranted() {
    setup();
    let client = InMemoryDirectoryClient::new();
    let alice = DirectoryUser::external("alice", saml(), UserGuid::new()).with_groups(["admins"]);
    let mut directory: DirectorySnapshot = [alice.clone()].into_iter().collect();
    let mut assignments: RoleAssignments = [RoleUser {
        username: "alice".to_string(),
        origin: saml(),
        guid: alice.guid,
    }]
    .into_iter()
    .collect();
    let mut desired = desired(&["admins"], &[]);

    let report = Reconciler::new(&client, saml())
        .sync_users(&mut assignments, &mut directory, &mut desired)
        .unwrap();

    assert!(desired.granter().calls.is_empty());
    assert!(!assignments.has_user_for_origin("alice", &saml()));
    assert_eq!(report.preserved, vec!["alice"]);
}

#[test]
fn second_pass_makes_no_grant_calls() {
    setup();
    let client = InMemoryDirectoryClient::new();
    let mut directory: DirectorySnapshot = [
        DirectoryUser::external("alice", saml(), UserGuid::new()).with_groups(["admins"]),
        DirectoryUser::external("carol", saml(), UserGuid::new()).with_groups(["devs"]),
    ]
    .into_iter()
    .collect();
    let reconciler = Reconciler::new(&client, saml());

    let mut first = desired(&["admins", "devs"], &["bob@example.com"]);
    let mut assignments = RoleAssignments::new();
    reconciler
        .sync_users(&mut assignments, &mut directory, &mut first)
        .unwrap();
    assert_eq!(first.granter().calls.len(), 3);

    // The role API now reports the granted users as holders.
    let mut assignments: RoleAssignments = first
        .granter()
        .calls
        .iter()
        .map(|(username, guid)| RoleUser {
            username: username.clone(),
            origin: saml(),
            guid: *guid,
        })
        .collect();

    let mut second = desired(&["admins", "devs"], &["bob@example.com"]);
    let report = reconciler
        .sync_users(&mut assignments, &mut directory, &mut second)
        .unwrap();

    assert!(second.granter().calls.is_empty());
    assert_eq!(report.preserved.len(), 3);
    assert!(assignments.is_empty());
    // bob was provisioned once, on the first pass
    assert_eq!(client.attempts().len(), 1);
}

#[test]
fn creation_failure_skips_only_that_candidate() {
    setup();
    let client = InMemoryDirectoryClient::new();
    client.reject("eve@example.com", "blocked");
    let mut directory = DirectorySnapshot::new();
    let mut assignments = RoleAssignments::new();
    let mut desired = desired(&[], &["eve@example.com", "bob@example.com"]);

    let report = Reconciler::new(&client, saml())
        .sync_users(&mut assignments, &mut directory, &mut desired)
        .unwrap();

    assert_eq!(report.granted, vec!["bob@example.com"]);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("blocked"));
    assert_eq!(client.attempts().len(), 2);
    assert!(directory.get_by_name("eve@example.com").is_empty());
}

#[test]
fn creation_failure_aborts_when_configured() {
    setup();
    let client = InMemoryDirectoryClient::new();
    client.reject("eve@example.com", "blocked");
    let config = ReconcileConfig {
        continue_on_create_failure: false,
        ..ReconcileConfig::default()
    };
    let mut directory = DirectorySnapshot::new();
    let mut assignments = RoleAssignments::new();
    let mut desired = desired(&[], &["eve@example.com"]);

    let err = Reconciler::from_config(&client, &config)
        .unwrap()
        .sync_users(&mut assignments, &mut directory, &mut desired)
        .unwrap_err();

    assert!(matches!(err, ReconcileError::Creation { ref username, .. } if username == "eve@example.com"));
}

#[test]
fn user_only_under_other_origin_aborts_pass() {
    setup();
    let client = InMemoryDirectoryClient::new();
    let mut directory: DirectorySnapshot = [
        DirectoryUser::external("alice", Origin::new("ldap"), UserGuid::new()).with_groups(["admins"]),
    ]
    .into_iter()
    .collect();
    let mut assignments = RoleAssignments::new();
    let mut desired = desired(&["admins"], &[]);

    let err = Reconciler::new(&client, saml())
        .sync_users(&mut assignments, &mut directory, &mut desired)
        .unwrap_err();

    assert!(matches!(err, ReconcileError::OriginMismatch { .. }));
    assert!(desired.granter().calls.is_empty());
    assert!(client.attempts().is_empty());
}

#[test]
fn grant_failure_aborts_with_identity_context() {
    setup();
    let client = InMemoryDirectoryClient::new();
    let mut directory: DirectorySnapshot =
        [DirectoryUser::external("alice", saml(), UserGuid::new()).with_groups(["admins"])]
            .into_iter()
            .collect();
    let mut assignments = RoleAssignments::new();
    let mut desired = DesiredMembership::new(
        Role::SPACE_DEVELOPER,
        RecordingGranter {
            fail_for: Some("alice".to_string()),
            ..RecordingGranter::default()
        },
    )
    .with_groups(["admins"]);

    let err = Reconciler::new(&client, saml())
        .sync_users(&mut assignments, &mut directory, &mut desired)
        .unwrap_err();

    let ReconcileError::Grant { username, origin, .. } = &err else {
        panic!("expected grant error, got {err:?}");
    };
    assert_eq!(username, "alice");
    assert_eq!(origin, &saml());
    assert!(err.to_string().contains("grant refused"));
}

/// Granter that refuses every request, counting attempts.
#[derive(Debug, Default)]
struct RefusingGranter {
    attempts: usize,
}

impl RoleGranter for RefusingGranter {
    fn grant(&mut self, _username: &str, _guid: UserGuid) -> anyhow::Result<()> {
        self.attempts += 1;
        anyhow::bail!("role api unavailable")
    }
}

#[test]
fn grant_failure_stops_remaining_candidates() {
    setup();
    let client = InMemoryDirectoryClient::new();
    let mut directory = DirectorySnapshot::new();
    let mut assignments = RoleAssignments::new();
    let mut desired = DesiredMembership::new(Role::SPACE_DEVELOPER, RefusingGranter::default())
        .with_users(["a", "b", "c", "d"]);

    let err = Reconciler::new(&client, saml())
        .sync_users(&mut assignments, &mut directory, &mut desired)
        .unwrap_err();

    assert!(matches!(err, ReconcileError::Grant { .. }));
    assert_eq!(desired.granter().attempts, 1);
    // only the first candidate got as far as provisioning; it stays provisioned
    assert_eq!(client.created().len(), 1);
    assert_eq!(directory.len(), 1);
}

#[test]
fn holders_not_desired_remain_as_revoke_candidates() {
    setup();
    let client = InMemoryDirectoryClient::new();
    let mut directory: DirectorySnapshot = [
        DirectoryUser::external("alice", saml(), UserGuid::new()).with_groups(["admins"]),
        DirectoryUser::external("mallory", saml(), UserGuid::new()),
    ]
    .into_iter()
    .collect();
    let mallory_guid = directory.get_by_name("mallory")[0].guid;
    let mut assignments: RoleAssignments = [
        RoleUser {
            username: "mallory".to_string(),
            origin: saml(),
            guid: mallory_guid,
        },
        RoleUser {
            username: "alice".to_string(),
            origin: Origin::new("uaa"),
            guid: UserGuid::new(),
        },
    ]
    .into_iter()
    .collect();
    let mut desired = desired(&["admins"], &[]);

    let report = Reconciler::new(&client, saml())
        .sync_users(&mut assignments, &mut directory, &mut desired)
        .unwrap();

    // alice@uaa is a different identity from alice@saml
    assert_eq!(report.granted, vec!["alice"]);
    assert_eq!(report.revoke_candidates, 2);
    let remaining: Vec<_> = assignments
        .ordered_remaining()
        .into_iter()
        .map(|u| (u.username.as_str(), u.origin.as_str()))
        .collect();
    assert_eq!(remaining, vec![("alice", "uaa"), ("mallory", "saml")]);
}
