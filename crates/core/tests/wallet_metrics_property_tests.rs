//! Property-based tests for the wallet penalty and progress calculator.
//!
//! These tests verify that the derived-view invariants hold across arbitrary
//! balances, targets and clocks, using `proptest` for case generation.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use lockbox_core::wallets::{derive_metrics, lock_status, LockStatus, Wallet};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// Money amounts in cents, up to ten million.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_penalty() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|basis| Decimal::new(basis, 2))
}

fn arb_now() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..(5 * 365 * 24 * 3600)).prop_map(|offset| {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset)
    })
}

fn arb_target_date() -> impl Strategy<Value = Option<NaiveDate>> {
    proptest::option::of((0i64..(6 * 365)).prop_map(|days| {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(days)
    }))
}

fn arb_wallet() -> impl Strategy<Value = Wallet> {
    (
        arb_amount(),
        arb_amount(),
        arb_target_date(),
        any::<bool>(),
        arb_penalty(),
    )
        .prop_map(|(target, current, target_date, is_locked, penalty)| {
            let stamp = NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            Wallet {
                id: "w".to_string(),
                owner_id: "o".to_string(),
                name: "Savings".to_string(),
                target_amount: target,
                current_amount: current,
                target_date,
                is_locked,
                penalty_percentage: penalty,
                created_at: stamp,
                updated_at: stamp,
            }
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn progress_is_always_within_bounds(wallet in arb_wallet(), now in arb_now()) {
        let metrics = derive_metrics(&wallet, now);
        prop_assert!(metrics.progress_percentage >= Decimal::ZERO);
        prop_assert!(metrics.progress_percentage <= Decimal::ONE_HUNDRED);
    }

    #[test]
    fn derivation_is_idempotent(wallet in arb_wallet(), now in arb_now()) {
        prop_assert_eq!(derive_metrics(&wallet, now), derive_metrics(&wallet, now));
    }

    #[test]
    fn penalty_only_while_locked(wallet in arb_wallet(), now in arb_now()) {
        let metrics = derive_metrics(&wallet, now);
        prop_assert_eq!(metrics.can_withdraw_without_penalty, metrics.lock_status != LockStatus::Locked);
        if metrics.lock_status != LockStatus::Locked {
            prop_assert_eq!(metrics.potential_penalty, Decimal::ZERO);
            prop_assert_eq!(metrics.days_remaining, 0);
        } else {
            prop_assert!(metrics.potential_penalty <= wallet.current_amount);
        }
    }

    #[test]
    fn remaining_amount_never_negative(wallet in arb_wallet(), now in arb_now()) {
        let metrics = derive_metrics(&wallet, now);
        prop_assert!(metrics.remaining_amount >= Decimal::ZERO);
        prop_assert!(metrics.remaining_amount <= wallet.target_amount);
    }

    #[test]
    fn passing_target_date_unlocks(
        wallet in arb_wallet(),
        now in arb_now(),
    ) {
        prop_assume!(wallet.is_locked);
        if let Some(date) = wallet.target_date {
            let after = date.and_hms_opt(0, 0, 0).unwrap().and_utc() + Duration::seconds(1);
            prop_assert_eq!(
                lock_status(wallet.is_locked, wallet.target_date, now.max(after)),
                LockStatus::UnlockedPastDate
            );
        } else {
            prop_assert_eq!(lock_status(true, None, now), LockStatus::Locked);
        }
    }
}
