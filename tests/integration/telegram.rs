//! Integration tests for the Telegram notifier against a mocked Bot API

use macd_alert::config::TelegramConfig;
use macd_alert::error::NotifyError;
use macd_alert::notify::{Notifier, TelegramNotifier};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> TelegramConfig {
    TelegramConfig {
        bot_token: "123:abc".to_string(),
        chat_id: "-100200".to_string(),
        api_url: server.uri(),
    }
}

#[tokio::test]
async fn sends_message_to_configured_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_json(json!({"chat_id": "-100200", "text": "🟢 BUY WITH PRICE 5"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(config(&server));
    notifier.send("🟢 BUY WITH PRICE 5").await.expect("delivered");
}

#[tokio::test]
async fn api_rejection_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"})),
        )
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(config(&server));
    let result = notifier.send("hello").await;

    match result {
        Err(NotifyError::Rejected(reason)) => assert!(reason.contains("chat not found")),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(config(&server));

    assert!(matches!(notifier.send("hello").await, Err(NotifyError::Rejected(_))));
}
