//! Driver laws: canonical ordering, key accounting, delay coercion, and the
//! single-permission and required-key entry points.

use crate::fixtures::*;
use bcc_authorization::{AuthorizationError, ChainConfig};
use bcc_types::{Authority, Micros, PublicKey, Transaction, WaitWeight};
use std::cell::Cell;
use std::collections::BTreeSet;

fn no_satisfied() -> BTreeSet<bcc_types::PermissionLevel> {
    BTreeSet::new()
}

/// Obligations resolve in ascending (actor, permission) order, regardless of
/// declared order: the earliest unsatisfiable authorization is the one
/// reported.
#[test]
fn test_canonical_ordering_of_obligations() {
    let mut manager = authz();
    create_account(
        &mut manager,
        "alice",
        PublicKey::from_byte(1),
        PublicKey::from_byte(2),
    );
    create_account(
        &mut manager,
        "bob",
        PublicKey::from_byte(3),
        PublicKey::from_byte(4),
    );

    // Declared order puts bob first; canonical order puts alice first. With
    // no keys at all, the failure must name alice@active.
    let action = contract_action(
        "somecontract",
        "transfer",
        &[level("bob", "active"), level("alice", "active")],
    );
    let result = manager.check_authorization(
        &[action],
        &keyset(&[]),
        &levelset(&[]),
        Micros::ZERO,
        None,
        false,
        &no_satisfied(),
    );
    match result {
        Err(AuthorizationError::UnsatisfiedAuthorization(msg)) => {
            assert!(msg.contains("alice@active"), "got: {msg}");
        }
        other => panic!("expected unsatisfied authorization, got {other:?}"),
    }
}

/// An extra unrelated key fails the unused-key rule unless the caller allows
/// it.
#[test]
fn test_unused_key_rule() {
    let mut manager = authz();
    let active_key = PublicKey::from_byte(2);
    create_account(&mut manager, "alice", PublicKey::from_byte(1), active_key);

    let extra = PublicKey::from_byte(9);
    let action = contract_action("alice", "transfer", &[level("alice", "active")]);

    let strict = manager.check_authorization(
        &[action.clone()],
        &keyset(&[active_key, extra]),
        &levelset(&[]),
        Micros::ZERO,
        None,
        false,
        &no_satisfied(),
    );
    match strict {
        Err(AuthorizationError::TxIrrelevantSig { keys }) => assert_eq!(keys, vec![extra]),
        other => panic!("expected irrelevant signature failure, got {other:?}"),
    }

    manager
        .check_authorization(
            &[action],
            &keyset(&[active_key, extra]),
            &levelset(&[]),
            Micros::ZERO,
            None,
            true,
            &no_satisfied(),
        )
        .unwrap();
}

/// Already-satisfied authorizations are skipped entirely: no obligation, no
/// key requirement.
#[test]
fn test_satisfied_authorizations_skip_obligations() {
    let mut manager = authz();
    create_account(
        &mut manager,
        "alice",
        PublicKey::from_byte(1),
        PublicKey::from_byte(2),
    );

    let action = contract_action("alice", "transfer", &[level("alice", "active")]);
    manager
        .check_authorization(
            &[action],
            &keyset(&[]),
            &levelset(&[]),
            Micros::ZERO,
            None,
            false,
            &levelset(&[level("alice", "active")]),
        )
        .unwrap();
}

/// Provided permissions satisfy delegated authorities without keys.
#[test]
fn test_provided_permissions_short_circuit() {
    let mut manager = authz();
    let (_, active) = create_account(
        &mut manager,
        "alice",
        PublicKey::from_byte(1),
        PublicKey::from_byte(2),
    );
    create_account(
        &mut manager,
        "bob",
        PublicKey::from_byte(3),
        PublicKey::from_byte(4),
    );
    // alice@active delegates to bob@active.
    manager
        .modify_permission(active, Authority::single_account(level("bob", "active")))
        .unwrap();

    let action = contract_action("alice", "transfer", &[level("alice", "active")]);
    manager
        .check_authorization(
            &[action],
            &keyset(&[]),
            &levelset(&[level("bob", "active")]),
            Micros::ZERO,
            None,
            false,
            &no_satisfied(),
        )
        .unwrap();
}

/// A provided delay at or above the chain maximum is treated as unbounded.
#[test]
fn test_delay_at_max_limit_is_unbounded() {
    let mut manager = authz();
    manager.controller().set_chain_config(ChainConfig {
        max_transaction_delay_sec: 60,
        max_authority_depth: 6,
    });
    let (_, active) = create_account(
        &mut manager,
        "alice",
        PublicKey::from_byte(1),
        PublicKey::from_byte(2),
    );
    // Requires a year-long wait; only the unbounded coercion can clear it.
    manager
        .modify_permission(
            active,
            Authority::new(
                1,
                vec![],
                vec![],
                vec![WaitWeight {
                    wait_sec: 31_536_000,
                    weight: 1,
                }],
            ),
        )
        .unwrap();

    let action = contract_action("alice", "transfer", &[level("alice", "active")]);

    let below_limit = manager.check_authorization(
        &[action.clone()],
        &keyset(&[]),
        &levelset(&[]),
        Micros::seconds(59),
        None,
        false,
        &no_satisfied(),
    );
    assert!(matches!(
        below_limit,
        Err(AuthorizationError::UnsatisfiedAuthorization(_))
    ));

    manager
        .check_authorization(
            &[action],
            &keyset(&[]),
            &levelset(&[]),
            Micros::seconds(60),
            None,
            false,
            &no_satisfied(),
        )
        .unwrap();
}

/// The checktime hook aborts the driver and the error propagates unchanged.
#[test]
fn test_checktime_abort_propagates_through_driver() {
    let mut manager = authz();
    let active_key = PublicKey::from_byte(2);
    create_account(&mut manager, "alice", PublicKey::from_byte(1), active_key);

    let calls = Cell::new(0u32);
    let checktime = || {
        calls.set(calls.get() + 1);
        if calls.get() > 1 {
            Err(AuthorizationError::DeadlineExceeded)
        } else {
            Ok(())
        }
    };

    let action = contract_action("alice", "transfer", &[level("alice", "active")]);
    let result = manager.check_authorization(
        &[action],
        &keyset(&[active_key]),
        &levelset(&[]),
        Micros::ZERO,
        Some(&checktime),
        false,
        &no_satisfied(),
    );
    assert!(matches!(
        result,
        Err(AuthorizationError::DeadlineExceeded)
    ));
    assert!(calls.get() >= 2);
}

/// The single-permission entry point mirrors the driver's key rules.
#[test]
fn test_check_permission_authorization() {
    let mut manager = authz();
    let active_key = PublicKey::from_byte(2);
    create_account(&mut manager, "alice", PublicKey::from_byte(1), active_key);

    manager
        .check_permission_authorization(
            name("alice"),
            name("active"),
            &keyset(&[active_key]),
            &levelset(&[]),
            Micros::ZERO,
            None,
            false,
        )
        .unwrap();

    let missing_key = manager.check_permission_authorization(
        name("alice"),
        name("active"),
        &keyset(&[]),
        &levelset(&[]),
        Micros::ZERO,
        None,
        false,
    );
    assert!(matches!(
        missing_key,
        Err(AuthorizationError::UnsatisfiedAuthorization(_))
    ));

    let extra_key = manager.check_permission_authorization(
        name("alice"),
        name("active"),
        &keyset(&[active_key, PublicKey::from_byte(9)]),
        &levelset(&[]),
        Micros::ZERO,
        None,
        false,
    );
    assert!(matches!(
        extra_key,
        Err(AuthorizationError::TxIrrelevantSig { .. })
    ));
}

/// get_required_keys returns exactly the candidate keys the declared
/// authorizations consume.
#[test]
fn test_get_required_keys_partitions_candidates() {
    let mut manager = authz();
    let alice_key = PublicKey::from_byte(2);
    let bob_key = PublicKey::from_byte(4);
    create_account(&mut manager, "alice", PublicKey::from_byte(1), alice_key);
    create_account(&mut manager, "bob", PublicKey::from_byte(3), bob_key);

    let trx = Transaction::new(vec![
        contract_action("somecontract", "transfer", &[level("alice", "active")]),
        contract_action("somecontract", "stake", &[level("bob", "active")]),
    ]);

    let required = manager
        .get_required_keys(
            &trx,
            &keyset(&[alice_key, bob_key, PublicKey::from_byte(9)]),
            Micros::ZERO,
        )
        .unwrap();
    assert_eq!(required, keyset(&[alice_key, bob_key]));

    // An unsatisfiable authorization surfaces as an error.
    let missing = manager.get_required_keys(&trx, &keyset(&[alice_key]), Micros::ZERO);
    assert!(matches!(
        missing,
        Err(AuthorizationError::UnsatisfiedAuthorization(_))
    ));
}
