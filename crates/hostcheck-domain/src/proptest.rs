//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - a host that matches an expectation exactly always passes
//! - any differing field fails and is named in the message
//! - evaluating twice against an unchanged host gives the same records

use crate::checks::check;
use crate::engine::evaluate;
use crate::model::{Expectation, ExpectationRecord};
use crate::test_support::FakeHost;
use hostcheck_types::CheckStatus;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_-]{0,15}").unwrap()
}

fn arb_path() -> impl Strategy<Value = String> {
    prop::string::string_regex("/[a-z][a-z0-9_-]{0,7}(/[a-z0-9][a-z0-9._-]{0,7}){0,3}/?").unwrap()
}

fn arb_record() -> impl Strategy<Value = ExpectationRecord> {
    prop_oneof![
        arb_name().prop_map(|name| ExpectationRecord::PackageInstalled { name }),
        arb_name().prop_map(|name| ExpectationRecord::GroupExists { name }),
        (arb_name(), prop::option::of(arb_name()))
            .prop_map(|(name, group)| ExpectationRecord::UserExists { name, group }),
        arb_path().prop_map(|path| ExpectationRecord::FileExists { path }),
        (arb_path(), arb_path())
            .prop_map(|(path, target)| ExpectationRecord::SymlinkTarget { path, target }),
        (arb_path(), arb_name(), arb_name())
            .prop_map(|(path, user, group)| ExpectationRecord::PathOwnership { path, user, group }),
        (arb_name(), any::<bool>(), any::<bool>()).prop_map(|(name, running, enabled)| {
            ExpectationRecord::ServiceState {
                name,
                running,
                enabled,
            }
        }),
        (arb_name(), 0i32..256).prop_map(|(command, exit_status)| {
            ExpectationRecord::CommandStatus {
                command,
                exit_status,
            }
        }),
    ]
}

/// A host whose state is exactly what `record` expects.
fn host_matching(record: &ExpectationRecord) -> FakeHost {
    match record {
        ExpectationRecord::PackageInstalled { name } => FakeHost::new().with_package(name),
        ExpectationRecord::GroupExists { name } => FakeHost::new().with_group(name),
        ExpectationRecord::UserExists { name, group: None } => {
            FakeHost::new().with_user(name, "users")
        }
        ExpectationRecord::UserExists {
            name,
            group: Some(group),
        } => FakeHost::new().with_group(group).with_user(name, group),
        ExpectationRecord::FileExists { path } => FakeHost::new().with_path(path, "root", "root"),
        ExpectationRecord::SymlinkTarget { path, target } => {
            FakeHost::new().with_symlink(path, target, "root", "root")
        }
        ExpectationRecord::PathOwnership { path, user, group } => {
            FakeHost::new().with_path(path, user, group)
        }
        ExpectationRecord::ServiceState {
            name,
            running,
            enabled,
        } => FakeHost::new().with_service(name, *running, *enabled),
        ExpectationRecord::CommandStatus {
            command,
            exit_status,
        } => FakeHost::new().with_command(command, *exit_status),
    }
}

proptest! {
    #[test]
    fn matching_host_always_passes(record in arb_record()) {
        let host = host_matching(&record);
        let (_, result) = check(&host, &record).expect("fake host does not fail");
        prop_assert!(result.is_pass(), "{:?} should pass, got {:?}", record, result);
    }

    #[test]
    fn symlink_target_difference_is_named(
        path in arb_path(),
        expected in arb_path(),
        actual in arb_path(),
    ) {
        prop_assume!(expected != actual);
        let host = FakeHost::new().with_symlink(&path, &actual, "root", "root");
        let exp = Expectation::new("role", ExpectationRecord::SymlinkTarget { path, target: expected.clone() });

        let report = evaluate(std::slice::from_ref(&exp), &host).expect("no provider errors");
        let record = &report.results[0];
        prop_assert_eq!(record.status, CheckStatus::Fail);
        prop_assert!(record.message.contains("link_target"));
        prop_assert!(record.message.contains(expected.as_str()));
        prop_assert!(record.message.contains(actual.as_str()));
    }

    #[test]
    fn ownership_difference_is_named(
        path in arb_path(),
        user in arb_name(),
        group in arb_name(),
        actual_user in arb_name(),
        actual_group in arb_name(),
    ) {
        prop_assume!(user != actual_user || group != actual_group);
        let host = FakeHost::new().with_path(&path, &actual_user, &actual_group);
        let record = ExpectationRecord::PathOwnership { path, user: user.clone(), group: group.clone() };

        let (_, result) = check(&host, &record).expect("no provider errors");
        prop_assert!(!result.is_pass());
        prop_assert_eq!(result.has_mismatch("owner"), user != actual_user);
        prop_assert_eq!(result.has_mismatch("group"), group != actual_group);
    }

    #[test]
    fn primary_group_difference_is_named(
        user in arb_name(),
        expected in arb_name(),
        actual in arb_name(),
    ) {
        prop_assume!(expected != actual);
        let host = FakeHost::new().with_group(&expected).with_user(&user, &actual);
        let record = ExpectationRecord::UserExists { name: user, group: Some(expected) };

        let (_, result) = check(&host, &record).expect("no provider errors");
        prop_assert!(result.has_mismatch("primary_group"));
        prop_assert_eq!(result.mismatches().len(), 1);
    }

    #[test]
    fn service_passes_iff_both_flags_match(
        name in arb_name(),
        running in any::<bool>(),
        enabled in any::<bool>(),
    ) {
        let host = FakeHost::new().with_service(&name, running, enabled);
        let record = ExpectationRecord::ServiceState { name, running: true, enabled: true };

        let (_, result) = check(&host, &record).expect("no provider errors");
        prop_assert_eq!(result.is_pass(), running && enabled);
        prop_assert_eq!(result.has_mismatch("running"), !running);
        prop_assert_eq!(result.has_mismatch("enabled"), !enabled);
    }

    #[test]
    fn command_status_difference_is_named(
        command in arb_name(),
        expected in 0i32..256,
        actual in 0i32..256,
    ) {
        let host = FakeHost::new().with_command(&command, actual);
        let record = ExpectationRecord::CommandStatus { command, exit_status: expected };

        let (_, result) = check(&host, &record).expect("no provider errors");
        prop_assert_eq!(result.is_pass(), expected == actual);
        prop_assert_eq!(result.has_mismatch("exit_status"), expected != actual);
    }

    #[test]
    fn evaluation_is_idempotent(records in prop::collection::vec(arb_record(), 0..12)) {
        // A host that satisfies only the first record; the rest fail or pass by chance.
        let host = records.first().map(host_matching).unwrap_or_default();
        let expectations: Vec<Expectation> = records
            .into_iter()
            .map(|r| Expectation::new("role", r))
            .collect();

        let first = evaluate(&expectations, &host).expect("no provider errors");
        let second = evaluate(&expectations, &host).expect("no provider errors");
        prop_assert_eq!(first.results, second.results);
    }
}
