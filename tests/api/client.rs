use std::time::Duration;

use resend_demo::client::{ApiClient, ApiStatus, EmailForm, FormResponse, HealthMonitor, NoticeKind};
use resend_demo::config::ClientSettings;
use wiremock::{matchers::any, Mock, MockServer, ResponseTemplate};

use crate::helper::{spawn_app, spawn_app_with};

async fn wait_for_status(monitor: &HealthMonitor, expected: ApiStatus) {
    let mut rx = monitor.subscribe();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| *s == expected))
        .await
        .expect("The status should change in time.")
        .expect("The monitor should still be running.");
}

#[tokio::test]
async fn health_check_reports_a_running_service_as_online() {
    let app = spawn_app().await;
    let client = ApiClient::new(&app.client_settings());

    assert_eq!(client.check_health().await, ApiStatus::Online);
}

#[tokio::test]
async fn health_check_reports_non_200_as_offline() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let client = ApiClient::new(&ClientSettings {
        api_url: server.uri(),
        ..Default::default()
    });

    assert_eq!(client.check_health().await, ApiStatus::Offline);
}

#[tokio::test]
async fn health_check_reports_a_slow_service_as_offline() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    let client = ApiClient::new(&ClientSettings {
        api_url: server.uri(),
        health_timeout: Duration::from_millis(100),
        ..Default::default()
    });

    assert_eq!(client.check_health().await, ApiStatus::Offline);
}

#[tokio::test]
async fn monitor_goes_online_for_a_running_service() {
    let app = spawn_app().await;
    let settings = app.client_settings();
    let monitor = HealthMonitor::start(ApiClient::new(&settings), settings.health_check_interval);

    wait_for_status(&monitor, ApiStatus::Online).await;
    assert_eq!(monitor.status(), ApiStatus::Online);

    monitor.stop();
}

#[tokio::test]
async fn monitor_goes_offline_when_the_service_fails() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let monitor = HealthMonitor::start(
        ApiClient::new(&ClientSettings {
            api_url: server.uri(),
            ..Default::default()
        }),
        Duration::from_secs(30),
    );

    wait_for_status(&monitor, ApiStatus::Offline).await;

    let form = EmailForm::new(ApiClient::new(&ClientSettings::default()));
    assert!(!form.submit_enabled(monitor.status()));
}

#[tokio::test]
async fn monitor_polls_until_stopped() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let monitor = HealthMonitor::start(
        ApiClient::new(&ClientSettings {
            api_url: server.uri(),
            ..Default::default()
        }),
        Duration::from_millis(50),
    );

    tokio::time::sleep(Duration::from_millis(300)).await;
    monitor.stop();
    let polled = server.received_requests().await.unwrap().len();
    assert!(polled >= 2, "only {polled} health checks were made");

    tokio::time::sleep(Duration::from_millis(200)).await;
    let after_stop = server.received_requests().await.unwrap().len();
    assert!(after_stop <= polled + 1, "polling continued after stop");
}

#[tokio::test]
async fn monitor_keeps_running_with_a_zero_interval() {
    let app = spawn_app().await;
    let monitor = HealthMonitor::start(ApiClient::new(&app.client_settings()), Duration::ZERO);

    wait_for_status(&monitor, ApiStatus::Online).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(monitor.subscribe().has_changed().is_ok(), "the polling task stopped");
    assert_eq!(monitor.status(), ApiStatus::Online);
}

#[tokio::test]
async fn successful_submission_clears_the_form() {
    let app = spawn_app().await;
    app.provider_accepts("abc123", 1).await;
    let mut form = EmailForm::new(ApiClient::new(&app.client_settings()));
    form.test.to = "u@v.com".into();
    form.test.message = "hello".into();

    let notice = form.submit_test(ApiStatus::Online).await;

    assert_eq!(notice.kind, NoticeKind::Success);
    assert!(form.test.to.is_empty());
    assert!(form.test.message.is_empty());
    match form.response() {
        Some(FormResponse::Success(body)) => assert_eq!(body["emailId"], "abc123"),
        other => panic!("expected a success response, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_submission_keeps_the_form_and_shows_the_service_error() {
    let app = spawn_app_with(|config| config.email_client.authorization_token = None).await;
    app.provider_is_never_called().await;
    let mut form = EmailForm::new(ApiClient::new(&app.client_settings()));
    form.custom.to = "u@v.com".into();
    form.custom.subject = "Hello".into();
    form.custom.message = "Body".into();

    let notice = form.submit_custom(ApiStatus::Online).await;

    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice
        .message
        .starts_with("Failed to send email: Resend API key not configured"));
    assert_eq!(form.custom.subject, "Hello");
    match form.response() {
        Some(FormResponse::Error { status, details, .. }) => {
            assert_eq!(*status, Some(500));
            assert_eq!(details, "Please check your configuration");
        }
        other => panic!("expected an error response, got {other:?}"),
    }
}

#[tokio::test]
async fn custom_submission_reports_the_sent_subject() {
    let app = spawn_app().await;
    app.provider_accepts("msg_1", 1).await;
    let mut form = EmailForm::new(ApiClient::new(&app.client_settings()));
    form.custom.to = "u@v.com".into();
    form.custom.subject = "Hello".into();
    form.custom.message = "Body".into();

    let notice = form.submit_custom(ApiStatus::Online).await;

    assert!(!notice.is_error());
    assert!(form.custom.subject.is_empty());
    match form.response() {
        Some(FormResponse::Success(body)) => assert_eq!(body["subject"], "Hello"),
        other => panic!("expected a success response, got {other:?}"),
    }
}
