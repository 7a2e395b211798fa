//! Concrete end-to-end transaction scenarios.
//!
//! Each test drives `check_authorization` the way the transaction dispatcher
//! would: declared authorizations straight from the actions, recovered keys
//! as the provided set, and no store mutation anywhere in the call.

use crate::fixtures::*;
use bcc_authorization::{AuthorizationError, CancelDelay, UpdateAuth};
use bcc_types::{
    Authority, KeyWeight, Micros, Name, PublicKey, Transaction, WaitWeight,
};
use std::collections::BTreeSet;

fn no_satisfied() -> BTreeSet<bcc_types::PermissionLevel> {
    BTreeSet::new()
}

/// S1: a plain transfer under alice@active with the right key passes at
/// delay zero.
#[test]
fn test_transfer_with_active_key_passes() {
    let mut manager = authz();
    let active_key = PublicKey::from_byte(2);
    create_account(&mut manager, "alice", PublicKey::from_byte(1), active_key);

    let action = contract_action("alice", "transfer", &[level("alice", "active")]);
    manager
        .check_authorization(
            &[action],
            &keyset(&[active_key]),
            &levelset(&[]),
            Micros::ZERO,
            None,
            false,
            &no_satisfied(),
        )
        .unwrap();
}

/// S2: the same transfer with no provided key fails unsatisfied.
#[test]
fn test_transfer_without_keys_fails() {
    let mut manager = authz();
    create_account(
        &mut manager,
        "alice",
        PublicKey::from_byte(1),
        PublicKey::from_byte(2),
    );

    let action = contract_action("alice", "transfer", &[level("alice", "active")]);
    let result = manager.check_authorization(
        &[action],
        &keyset(&[]),
        &levelset(&[]),
        Micros::ZERO,
        None,
        false,
        &no_satisfied(),
    );
    assert!(matches!(
        result,
        Err(AuthorizationError::UnsatisfiedAuthorization(_))
    ));
}

/// S3: linked custom permission; parent and grandparent authorities also
/// clear the linked minimum.
#[test]
fn test_linked_permission_and_ancestors() {
    let mut manager = authz();
    let owner_key = PublicKey::from_byte(1);
    let active_key = PublicKey::from_byte(2);
    let publishing_key = PublicKey::from_byte(3);
    let (_, active) = create_account(&mut manager, "alice", owner_key, active_key);
    manager
        .create_permission(
            name("alice"),
            name("publishing"),
            active,
            Authority::single_key(publishing_key),
            None,
        )
        .unwrap();
    manager
        .create_link(
            name("alice"),
            name("blogcontract"),
            name("post"),
            name("publishing"),
        )
        .unwrap();

    let check = |declared: &str, key: PublicKey| {
        let action = contract_action("blogcontract", "post", &[level("alice", declared)]);
        manager.check_authorization(
            &[action],
            &keyset(&[key]),
            &levelset(&[]),
            Micros::ZERO,
            None,
            false,
            &no_satisfied(),
        )
    };

    // The linked permission itself.
    check("publishing", publishing_key).unwrap();
    // Its parent and the tree root both structurally cover the minimum.
    check("active", active_key).unwrap();
    check("owner", owner_key).unwrap();

    // Declared publishing but the provided key does not satisfy it.
    assert!(matches!(
        check("publishing", PublicKey::from_byte(9)),
        Err(AuthorizationError::UnsatisfiedAuthorization(_))
    ));
}

/// A permission below the linked minimum is irrelevant even with its key.
#[test]
fn test_permission_below_minimum_is_irrelevant() {
    let mut manager = authz();
    let active_key = PublicKey::from_byte(2);
    let (_, active) = create_account(&mut manager, "alice", PublicKey::from_byte(1), active_key);
    let child_key = PublicKey::from_byte(3);
    manager
        .create_permission(
            name("alice"),
            name("lowly"),
            active,
            Authority::single_key(child_key),
            None,
        )
        .unwrap();

    // No link: minimum is active, and lowly sits below it.
    let action = contract_action("shop", "buy", &[level("alice", "lowly")]);
    let result = manager.check_authorization(
        &[action],
        &keyset(&[child_key]),
        &levelset(&[]),
        Micros::ZERO,
        None,
        false,
        &no_satisfied(),
    );
    assert!(matches!(
        result,
        Err(AuthorizationError::IrrelevantAuth(_))
    ));
}

/// S4: updateauth through the driver under an insufficient declared
/// authority fails irrelevant_auth.
#[test]
fn test_updateauth_under_active_for_owner_parented_permission() {
    let mut manager = authz();
    let active_key = PublicKey::from_byte(2);
    let (owner, _) = create_account(&mut manager, "alice", PublicKey::from_byte(1), active_key);
    manager
        .create_permission(
            name("alice"),
            name("treasury"),
            owner,
            Authority::single_key(PublicKey::from_byte(3)),
            None,
        )
        .unwrap();

    let update = UpdateAuth {
        account: name("alice"),
        permission: name("treasury"),
        parent: name("owner"),
        auth: Authority::single_key(PublicKey::from_byte(4)),
    };
    let action = system_action(
        UpdateAuth::action_name(),
        &[level("alice", "active")],
        &update,
    );
    let result = manager.check_authorization(
        &[action],
        &keyset(&[active_key]),
        &levelset(&[]),
        Micros::ZERO,
        None,
        false,
        &no_satisfied(),
    );
    assert!(matches!(
        result,
        Err(AuthorizationError::IrrelevantAuth(_))
    ));
}

/// S5: canceldelay raises its action's delay to the deferred transaction's
/// remaining delay.
#[test]
fn test_canceldelay_effective_delay_is_deferred_delay() {
    let mut manager = authz();
    let active_key = PublicKey::from_byte(2);
    let (_, active) = create_account(&mut manager, "alice", PublicKey::from_byte(1), active_key);

    // active needs its key AND a 30s wait; a 10s provided delay alone cannot
    // clear it.
    manager
        .modify_permission(
            active,
            Authority::new(
                2,
                vec![KeyWeight {
                    key: active_key,
                    weight: 1,
                }],
                vec![],
                vec![WaitWeight {
                    wait_sec: 30,
                    weight: 1,
                }],
            ),
        )
        .unwrap();

    let original = Transaction::new(vec![contract_action(
        "somecontract",
        "transfer",
        &[level("alice", "active")],
    )]);
    // delay_until - published = 30s.
    let trx_id = push_deferred(&manager, &original, 100, 130, None);

    let cancel = CancelDelay {
        canceling_auth: level("alice", "active"),
        trx_id,
    };
    let action = system_action(
        CancelDelay::action_name(),
        &[level("alice", "active")],
        &cancel,
    );

    manager
        .check_authorization(
            &[action],
            &keyset(&[active_key]),
            &levelset(&[]),
            Micros::seconds(10),
            None,
            false,
            &no_satisfied(),
        )
        .unwrap();
}

/// S6: when one permission covers two actions, the smallest delay wins; a
/// wait-only authority that needs the larger delay then fails.
#[test]
fn test_delay_collision_keeps_minimum() {
    let mut manager = authz();
    let (_, active) = create_account(
        &mut manager,
        "alice",
        PublicKey::from_byte(1),
        PublicKey::from_byte(2),
    );
    // Wait-only authority: satisfied only at delay >= 30s.
    manager
        .modify_permission(
            active,
            Authority::new(
                1,
                vec![],
                vec![],
                vec![WaitWeight {
                    wait_sec: 30,
                    weight: 1,
                }],
            ),
        )
        .unwrap();

    let original = Transaction::new(vec![contract_action(
        "somecontract",
        "transfer",
        &[level("alice", "active")],
    )]);
    let trx_id = push_deferred(&manager, &original, 100, 130, None);
    let cancel = CancelDelay {
        canceling_auth: level("alice", "active"),
        trx_id,
    };
    let cancel_action = system_action(
        CancelDelay::action_name(),
        &[level("alice", "active")],
        &cancel,
    );

    // The canceldelay action alone runs at delay 30s and passes.
    manager
        .check_authorization(
            &[cancel_action.clone()],
            &keyset(&[]),
            &levelset(&[]),
            Micros::seconds(10),
            None,
            false,
            &no_satisfied(),
        )
        .unwrap();

    // Adding a plain action under the same permission pulls the obligation
    // down to the 10s provided delay, which the 30s wait cannot clear.
    let transfer = contract_action("alice", "transfer", &[level("alice", "active")]);
    let result = manager.check_authorization(
        &[transfer, cancel_action],
        &keyset(&[]),
        &levelset(&[]),
        Micros::seconds(10),
        None,
        false,
        &no_satisfied(),
    );
    assert!(matches!(
        result,
        Err(AuthorizationError::UnsatisfiedAuthorization(_))
    ));
}

/// A deferred transaction canceled under a mismatched canceling authority
/// is rejected before any delay contribution.
#[test]
fn test_canceldelay_wrong_canceling_auth() {
    let mut manager = authz();
    let active_key = PublicKey::from_byte(2);
    create_account(&mut manager, "alice", PublicKey::from_byte(1), active_key);
    create_account(
        &mut manager,
        "bob",
        PublicKey::from_byte(3),
        PublicKey::from_byte(4),
    );

    let original = Transaction::new(vec![contract_action(
        "somecontract",
        "transfer",
        &[level("bob", "active")],
    )]);
    let trx_id = push_deferred(&manager, &original, 100, 130, None);

    let cancel = CancelDelay {
        canceling_auth: level("alice", "active"),
        trx_id,
    };
    let action = system_action(
        CancelDelay::action_name(),
        &[level("alice", "active")],
        &cancel,
    );
    let result = manager.check_authorization(
        &[action],
        &keyset(&[active_key]),
        &levelset(&[]),
        Micros::ZERO,
        None,
        false,
        &no_satisfied(),
    );
    assert!(matches!(result, Err(AuthorizationError::ActionValidate(_))));
}

/// Wildcard links skip the minimum-permission rule entirely: any declared
/// authorization of the authorizer works, it just still has to be satisfied.
#[test]
fn test_wildcard_link_accepts_any_declared_authority() {
    let mut manager = authz();
    let active_key = PublicKey::from_byte(2);
    let (_, active) = create_account(&mut manager, "alice", PublicKey::from_byte(1), active_key);
    let lowly_key = PublicKey::from_byte(3);
    manager
        .create_permission(
            name("alice"),
            name("lowly"),
            active,
            Authority::single_key(lowly_key),
            None,
        )
        .unwrap();
    manager
        .create_link(
            name("alice"),
            name("blogcontract"),
            name("upvote"),
            Name::new("bccio.any").unwrap(),
        )
        .unwrap();

    let action = contract_action("blogcontract", "upvote", &[level("alice", "lowly")]);
    manager
        .check_authorization(
            &[action],
            &keyset(&[lowly_key]),
            &levelset(&[]),
            Micros::ZERO,
            None,
            false,
            &no_satisfied(),
        )
        .unwrap();
}
