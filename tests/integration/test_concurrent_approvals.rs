//! Concurrency tests for the decision workflows.
//!
//! These run against a file-backed multi-connection pool so the racing
//! tasks hold genuinely separate connections. Racing deciders must resolve
//! to exactly one winner: one status transition, one inventory movement,
//! and a domain-level conflict for everyone else.

#[path = "../support/mod.rs"]
mod support;

use blood_donation_api::services::{blood_request_service, donation_service, WorkflowError};
use support::{date, DonorFixture};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn racing_submissions_create_one_pending_request() {
    let (pool, _dir) = support::file_pool().await;

    // Several rounds to give the scheduler chances to interleave.
    for round in 0..5 {
        let user_name = format!("dana{round}");
        let user_id = support::insert_user(&pool, &user_name, "Donor").await;
        support::insert_donor(&pool, user_id, DonorFixture::default()).await;

        let a = tokio::spawn({
            let pool = pool.clone();
            async move { donation_service::submit(&pool, user_id, date(2025, 1, 1)).await }
        });
        let b = tokio::spawn({
            let pool = pool.clone();
            async move { donation_service::submit(&pool, user_id, date(2025, 1, 1)).await }
        });

        let outcomes = [a.await.unwrap(), b.await.unwrap()];
        assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .filter_map(|o| o.as_ref().err())
            .all(|e| matches!(e, WorkflowError::AlreadyPending)));

        let pending: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM donation_requests WHERE user_id = ? AND status = 'Pending'",
        )
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(pending, 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn racing_donation_approvals_credit_inventory_once() {
    let (pool, _dir) = support::file_pool().await;
    let user_id = support::insert_user(&pool, "dana", "Donor").await;
    support::insert_donor(&pool, user_id, DonorFixture::default()).await;
    let first_admin = support::insert_user(&pool, "root", "Admin").await;
    let second_admin = support::insert_user(&pool, "root2", "Admin").await;

    let request = donation_service::submit(&pool, user_id, date(2025, 1, 1))
        .await
        .unwrap();

    let a = tokio::spawn({
        let pool = pool.clone();
        async move { donation_service::approve(&pool, request.id, first_admin, date(2025, 1, 2)).await }
    });
    let b = tokio::spawn({
        let pool = pool.clone();
        async move { donation_service::approve(&pool, request.id, second_admin, date(2025, 1, 2)).await }
    });

    let outcomes = [a.await.unwrap(), b.await.unwrap()];
    let wins = outcomes.iter().filter(|o| o.is_ok()).count();
    assert_eq!(wins, 1);
    // The loser observes a domain conflict, not a storage failure.
    for outcome in &outcomes {
        if let Err(err) = outcome {
            assert!(matches!(err, WorkflowError::AlreadyProcessed), "got {err:?}");
        }
    }

    // One transition, one credit, one donation row.
    assert_eq!(support::stock(&pool, "O+").await, 1);
    let donations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM donations WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(donations, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn racing_approve_and_reject_pick_one_outcome() {
    let (pool, _dir) = support::file_pool().await;
    let user_id = support::insert_user(&pool, "dana", "Donor").await;
    support::insert_donor(&pool, user_id, DonorFixture::default()).await;
    let admin = support::insert_user(&pool, "root", "Admin").await;

    let request = donation_service::submit(&pool, user_id, date(2025, 1, 1))
        .await
        .unwrap();

    let approve = tokio::spawn({
        let pool = pool.clone();
        async move { donation_service::approve(&pool, request.id, admin, date(2025, 1, 2)).await }
    });
    let reject = tokio::spawn({
        let pool = pool.clone();
        async move { donation_service::reject(&pool, request.id, admin, date(2025, 1, 2)).await }
    });

    let approve = approve.await.unwrap();
    let reject = reject.await.unwrap();
    assert!(approve.is_ok() ^ reject.is_ok(), "exactly one decider must win");
    for outcome in [&approve, &reject] {
        if let Err(err) = outcome {
            assert!(matches!(err, WorkflowError::AlreadyProcessed), "got {err:?}");
        }
    }

    let status: String = sqlx::query_scalar("SELECT status FROM donation_requests WHERE id = ?")
        .bind(request.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    let expected_stock = if approve.is_ok() {
        assert_eq!(status, "Approved");
        1
    } else {
        assert_eq!(status, "Rejected");
        0
    };
    assert_eq!(support::stock(&pool, "O+").await, expected_stock);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn racing_supply_approvals_debit_once() {
    let (pool, _dir) = support::file_pool().await;
    let hospital = support::insert_user(&pool, "st-mary", "Hospital").await;
    let admin = support::insert_user(&pool, "root", "Admin").await;
    let o_pos = support::blood_type_id(&pool, "O+").await;
    support::set_stock(&pool, "O+", 10).await;

    let request = blood_request_service::submit(&pool, hospital, o_pos, 4, date(2025, 1, 1))
        .await
        .unwrap();

    let a = tokio::spawn({
        let pool = pool.clone();
        async move { blood_request_service::approve(&pool, request.id, admin).await }
    });
    let b = tokio::spawn({
        let pool = pool.clone();
        async move { blood_request_service::approve(&pool, request.id, admin).await }
    });

    let outcomes = [a.await.unwrap(), b.await.unwrap()];
    assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .filter_map(|o| o.as_ref().err())
        .all(|e| matches!(e, WorkflowError::AlreadyProcessed)));

    assert_eq!(support::stock(&pool, "O+").await, 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn competing_supply_requests_cannot_overdraw_the_stock() {
    let (pool, _dir) = support::file_pool().await;
    let hospital = support::insert_user(&pool, "st-mary", "Hospital").await;
    let admin = support::insert_user(&pool, "root", "Admin").await;
    let o_pos = support::blood_type_id(&pool, "O+").await;
    support::set_stock(&pool, "O+", 4).await;

    let first = blood_request_service::submit(&pool, hospital, o_pos, 3, date(2025, 1, 1))
        .await
        .unwrap();
    let second = blood_request_service::submit(&pool, hospital, o_pos, 3, date(2025, 1, 1))
        .await
        .unwrap();

    let a = tokio::spawn({
        let pool = pool.clone();
        async move { blood_request_service::approve(&pool, first.id, admin).await }
    });
    let b = tokio::spawn({
        let pool = pool.clone();
        async move { blood_request_service::approve(&pool, second.id, admin).await }
    });

    let outcomes = [a.await.unwrap(), b.await.unwrap()];
    assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .filter_map(|o| o.as_ref().err())
        .all(|e| matches!(e, WorkflowError::InsufficientStock { .. })));

    // One debit went through; the level never dipped below zero.
    assert_eq!(support::stock(&pool, "O+").await, 1);

    // The loser is still Pending and approvable after a restock.
    let pending: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM blood_requests WHERE status = 'Pending'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(pending, 1);
}
