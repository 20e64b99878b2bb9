use serde_json::Value;

use crate::helper::{get_client, spawn_app};

#[tokio::test]
async fn status_returns_the_placeholder_for_any_id() {
    let app = spawn_app().await;
    app.provider_is_never_called().await;

    let response = get_client()
        .get(format!("{}/api/email/status/abc123", app.addr))
        .send()
        .await
        .expect("Request should succeed");

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["emailId"], "abc123");
    assert_eq!(
        body["message"],
        "Email status check not yet available in Resend API"
    );
    assert_eq!(body["note"], "Check your Resend dashboard for delivery status");
}
