//! Unit tests for the inventory ledger.

#[path = "../support/mod.rs"]
mod support;

use blood_donation_api::services::inventory_service::{adjust, credit, debit, set_units, units};
use blood_donation_api::services::WorkflowError;

#[tokio::test]
async fn credit_and_debit_move_the_counter() {
    let pool = support::pool().await;
    let o_pos = support::blood_type_id(&pool, "O+").await;
    let mut conn = pool.acquire().await.unwrap();

    credit(&mut conn, o_pos, 5).await.unwrap();
    assert_eq!(units(&mut conn, o_pos).await.unwrap(), 5);

    debit(&mut conn, o_pos, 3).await.unwrap();
    assert_eq!(units(&mut conn, o_pos).await.unwrap(), 2);
}

#[tokio::test]
async fn failed_debit_leaves_the_counter_unchanged() {
    let pool = support::pool().await;
    let o_pos = support::blood_type_id(&pool, "O+").await;
    let mut conn = pool.acquire().await.unwrap();

    set_units(&mut conn, o_pos, 2).await.unwrap();

    let err = debit(&mut conn, o_pos, 5).await.unwrap_err();
    match err {
        WorkflowError::InsufficientStock {
            available,
            requested,
        } => {
            assert_eq!(available, 2);
            assert_eq!(requested, 5);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    assert_eq!(units(&mut conn, o_pos).await.unwrap(), 2);
}

#[tokio::test]
async fn debit_down_to_zero_is_allowed() {
    let pool = support::pool().await;
    let a_neg = support::blood_type_id(&pool, "A-").await;
    let mut conn = pool.acquire().await.unwrap();

    set_units(&mut conn, a_neg, 4).await.unwrap();
    debit(&mut conn, a_neg, 4).await.unwrap();
    assert_eq!(units(&mut conn, a_neg).await.unwrap(), 0);
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let pool = support::pool().await;
    let o_pos = support::blood_type_id(&pool, "O+").await;
    let mut conn = pool.acquire().await.unwrap();

    assert!(matches!(
        credit(&mut conn, o_pos, 0).await,
        Err(WorkflowError::InvalidInput(_))
    ));
    assert!(matches!(
        debit(&mut conn, o_pos, -1).await,
        Err(WorkflowError::InvalidInput(_))
    ));
    assert!(matches!(
        set_units(&mut conn, o_pos, -1).await,
        Err(WorkflowError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn unknown_blood_type_is_not_found() {
    let pool = support::pool().await;
    let mut conn = pool.acquire().await.unwrap();

    assert!(matches!(
        units(&mut conn, 9999).await,
        Err(WorkflowError::NotFound { .. })
    ));
    assert!(matches!(
        credit(&mut conn, 9999, 1).await,
        Err(WorkflowError::NotFound { .. })
    ));
    assert!(matches!(
        debit(&mut conn, 9999, 1).await,
        Err(WorkflowError::NotFound { .. })
    ));
}

#[tokio::test]
async fn adjust_applies_the_same_guard_for_negative_deltas() {
    let pool = support::pool().await;
    let b_pos = support::blood_type_id(&pool, "B+").await;
    let mut conn = pool.acquire().await.unwrap();

    adjust(&mut conn, b_pos, 3).await.unwrap();
    assert_eq!(units(&mut conn, b_pos).await.unwrap(), 3);

    adjust(&mut conn, b_pos, -2).await.unwrap();
    assert_eq!(units(&mut conn, b_pos).await.unwrap(), 1);

    assert!(matches!(
        adjust(&mut conn, b_pos, -2).await,
        Err(WorkflowError::InsufficientStock { .. })
    ));
    assert_eq!(units(&mut conn, b_pos).await.unwrap(), 1);

    // Zero delta is a no-op.
    adjust(&mut conn, b_pos, 0).await.unwrap();
    assert_eq!(units(&mut conn, b_pos).await.unwrap(), 1);
}
