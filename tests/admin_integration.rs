mod common;

use common::{spawn_app, spawn_app_with_settings, test_settings};

#[tokio::test]
async fn metrics_page_counts_fileserver_hits() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/admin/metrics", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("visited 0 times"));

    // Two hits against the static file server
    for _ in 0..2 {
        let response = client
            .get(&format!("{}/app/", &app.address))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(200, response.status().as_u16());
    }

    let body = client
        .get(&format!("{}/admin/metrics", &app.address))
        .send()
        .await
        .expect("Failed to execute request.")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("visited 2 times"));
}

#[tokio::test]
async fn reset_clears_the_hit_counter_on_dev() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .get(&format!("{}/app/", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    let response = client
        .post(&format!("{}/admin/reset", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());

    let body = client
        .get(&format!("{}/admin/metrics", &app.address))
        .send()
        .await
        .expect("Failed to execute request.")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("visited 0 times"));
}

#[tokio::test]
async fn reset_is_forbidden_outside_dev() {
    let mut settings = test_settings();
    settings.application.platform = "prod".to_string();
    let app = spawn_app_with_settings(settings).await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/admin/reset", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(403, response.status().as_u16());
}
