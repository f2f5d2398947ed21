//! Integration tests for per-campaign checklist progress.

use sqlx::PgPool;
use grail_db::repositories::{CampaignRepo, CampaignStatusRepo, StatusRepo};

async fn status_id(pool: &PgPool, name: &str) -> i64 {
    StatusRepo::list(pool)
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.name == name)
        .unwrap()
        .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_untouched_statuses_report_empty(pool: PgPool) {
    let campaign = CampaignRepo::create(&pool, "Fresh").await.unwrap();

    let view = CampaignStatusRepo::list_for_campaign(&pool, campaign.id)
        .await
        .unwrap();
    assert_eq!(view.len(), 2);
    for row in &view {
        assert_eq!(row.checked_boxes, "");
        assert!(row.campaign_status_id.is_none());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_checked_boxes_inserts_then_updates(pool: PgPool) {
    let campaign = CampaignRepo::create(&pool, "Progress").await.unwrap();
    let status = status_id(&pool, "Actes notables").await;

    let first = CampaignStatusRepo::set_checked_boxes(&pool, campaign.id, status, "1,3")
        .await
        .unwrap();
    let second = CampaignStatusRepo::set_checked_boxes(&pool, campaign.id, status, "1,3,8")
        .await
        .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.checked_boxes, "1,3,8");

    // Same value twice leaves exactly one row.
    CampaignStatusRepo::set_checked_boxes(&pool, campaign.id, status, "1,3,8")
        .await
        .unwrap();
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM campaign_statuses WHERE campaign_id = $1 AND status_id = $2",
    )
    .bind(campaign.id)
    .bind(status)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);

    let view = CampaignStatusRepo::list_for_campaign(&pool, campaign.id)
        .await
        .unwrap();
    let row = view.iter().find(|r| r.id == status).unwrap();
    assert_eq!(row.checked_boxes, "1,3,8");
    assert_eq!(row.campaign_status_id, Some(first.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_progress_is_campaign_local(pool: PgPool) {
    let a = CampaignRepo::create(&pool, "A").await.unwrap();
    let b = CampaignRepo::create(&pool, "B").await.unwrap();
    let status = status_id(&pool, "Abandonnes").await;

    CampaignStatusRepo::set_checked_boxes(&pool, a.id, status, "2")
        .await
        .unwrap();

    let found = CampaignStatusRepo::find_by_pair(&pool, b.id, status)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_status_by_id(pool: PgPool) {
    let id = status_id(&pool, "Abandonnes").await;
    let status = StatusRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(status.checkbox_count, 2);
    assert!(StatusRepo::find_by_id(&pool, 999_999).await.unwrap().is_none());
}
