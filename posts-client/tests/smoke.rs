use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use posts_client::{HttpClient, NewPost, PostStatus, PostsApi};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running Posts REST backend"]
async fn http_smoke_flow() {
    let base_url =
        std::env::var("POSTS_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let client = HttpClient::new(base_url, Duration::from_secs(10)).expect("client must build");

    let title = format!("smoke post {}", unique_suffix());
    let created = client
        .create_post(&NewPost {
            title: title.clone(),
            image: "https://example.com/smoke.png".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            status: PostStatus::Published,
        })
        .await
        .expect("create_post must succeed");
    assert_eq!(created.title, title);
    assert_eq!(created.status, PostStatus::Published);

    let listed = client
        .list_posts(&title)
        .await
        .expect("list_posts must succeed");
    assert!(listed.iter().any(|post| post.id == created.id));

    let updated = client
        .update_status(&created.id, PostStatus::Unpublished)
        .await
        .expect("update_status must succeed");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.status, PostStatus::Unpublished);

    client
        .delete_post(&created.id)
        .await
        .expect("delete_post must succeed");

    let after_delete = client
        .list_posts(&title)
        .await
        .expect("list_posts must succeed");
    assert!(after_delete.iter().all(|post| post.id != created.id));
}
