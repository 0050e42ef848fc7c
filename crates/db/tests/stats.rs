//! Integration tests for the aggregate queries.

use std::str::FromStr;

use chrono::{Duration, Utc};
use minicrm_core::contract::ContractStatus;
use minicrm_db::models::activity::CreateActivity;
use minicrm_db::models::client::CreateClient;
use minicrm_db::models::contract::CreateContract;
use minicrm_db::models::service::CreateService;
use minicrm_db::models::service_assignment::CreateAssignment;
use minicrm_db::repositories::{
    ActivityRepo, ClientRepo, ContractRepo, ServiceAssignmentRepo, ServiceRepo, StatsRepo,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn new_client(pool: &PgPool, name: &str) -> i64 {
    ClientRepo::create(
        pool,
        &CreateClient {
            name: name.to_string(),
            email: None,
            phone: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_contract(pool: &PgPool, client_id: i64, amount: &str, status: ContractStatus) -> i64 {
    ContractRepo::create(
        pool,
        &CreateContract {
            client_id,
            title: format!("{status} {amount}"),
            amount: dec(amount),
            start_date: None,
            end_date: None,
            status: Some(status),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_counts_only_open_contracts(pool: PgPool) {
    let a = new_client(&pool, "A").await;
    let b = new_client(&pool, "B").await;
    new_contract(&pool, a, "100", ContractStatus::Actif).await;
    new_contract(&pool, b, "30", ContractStatus::EnCours).await;
    new_contract(&pool, b, "500", ContractStatus::Termine).await;

    let totals = StatsRepo::dashboard_totals(&pool).await.unwrap();
    assert_eq!(totals.client_count, 2);
    assert_eq!(totals.contract_count, 2);
    assert_eq!(totals.revenue, dec("130"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_on_empty_database(pool: PgPool) {
    let totals = StatsRepo::dashboard_totals(&pool).await.unwrap();
    assert_eq!(totals.client_count, 0);
    assert_eq!(totals.contract_count, 0);
    assert_eq!(totals.revenue, Decimal::ZERO);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn service_stats_sum_contributions(pool: PgPool) {
    let service = ServiceRepo::create(
        &pool,
        &CreateService {
            nom: "Maintenance".to_string(),
            service_type: "support".to_string(),
            description: None,
            prix: None,
            duree_mois: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    for (name, contribution) in [("X", "10"), ("Y", "25")] {
        let client = new_client(&pool, name).await;
        ServiceAssignmentRepo::create(
            &pool,
            service.id,
            &CreateAssignment {
                client_id: client,
                revenue_contribution: Some(dec(contribution)),
            },
        )
        .await
        .unwrap();
    }

    let stats = StatsRepo::service_stats(&pool, service.id).await.unwrap().unwrap();
    assert_eq!(stats.clients_count, 2);
    assert_eq!(stats.revenue_total, dec("35"));

    assert!(StatsRepo::service_stats(&pool, service.id + 1000).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn monthly_counts_respect_window(pool: PgPool) {
    let client = new_client(&pool, "Timeline").await;
    new_contract(&pool, client, "1", ContractStatus::Actif).await;
    let old = new_contract(&pool, client, "1", ContractStatus::Actif).await;

    sqlx::query("UPDATE contracts SET created_at = NOW() - INTERVAL '400 days' WHERE id = $1")
        .bind(old)
        .execute(&pool)
        .await
        .unwrap();

    let since = Utc::now() - Duration::days(30);
    let buckets = StatsRepo::monthly_contract_counts(&pool, since).await.unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recent_activities_newest_first(pool: PgPool) {
    for i in 0..3 {
        ActivityRepo::record(
            &pool,
            &CreateActivity {
                activity_type: "client_create",
                actor: "admin".to_string(),
                status: "success",
                description: format!("event {i}"),
                entity_type: Some("client"),
                entity_id: Some(i),
            },
        )
        .await
        .unwrap();
    }

    let recent = ActivityRepo::recent(&pool, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].description, "event 2");
    assert_eq!(recent[1].description, "event 1");
}
