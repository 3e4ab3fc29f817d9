use crate::channels::telegram::{TelegramChannel, TelegramConfig};
use crate::utils::{mask_secret, truncate_string};
use crate::{NotificationChannel, NotifyError};
use chrono::NaiveDate;
use hostmon_common::types::{AlertEvent, AlertKind, MetricKind, Severity};
use httpmock::prelude::*;

fn make_alert(message: &str) -> AlertEvent {
    AlertEvent {
        kind: AlertKind::Threshold,
        severity: Severity::Warning,
        message: message.to_string(),
        timestamp: NaiveDate::from_ymd_opt(2026, 2, 3)
            .unwrap()
            .and_hms_opt(4, 5, 6)
            .unwrap(),
        breached: vec![MetricKind::Cpu],
    }
}

fn config_for(server: &MockServer) -> TelegramConfig {
    TelegramConfig {
        bot_token: Some("123:secret-token".to_string()),
        chat_id: Some("42".to_string()),
        api_base: server.base_url(),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn telegram_posts_markdown_message() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/bot123:secret-token/sendMessage")
                .body_contains("\"chat_id\":\"42\"")
                .body_contains("\"parse_mode\":\"Markdown\"")
                .body_contains("CPU Usage: 90%");
            then.status(200).json_body(serde_json::json!({ "ok": true }));
        })
        .await;

    let channel = TelegramChannel::from_config(&config_for(&server))
        .unwrap()
        .unwrap();
    channel
        .send(&make_alert("*Server Alert*\n\nCPU Usage: 90% (Limit: 80%)"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(channel.channel_name(), "telegram");
}

#[tokio::test]
async fn telegram_rejection_is_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(400)
                .body(r#"{"ok":false,"description":"Bad Request: chat not found"}"#);
        })
        .await;

    let channel = TelegramChannel::from_config(&config_for(&server))
        .unwrap()
        .unwrap();
    match channel.send(&make_alert("hello")).await {
        Err(NotifyError::ApiError {
            service,
            status,
            body,
        }) => {
            assert_eq!(service, "telegram");
            assert_eq!(status, 400);
            assert!(body.contains("chat not found"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_hides_token() {
    let config = TelegramConfig {
        bot_token: Some("123:secret-token".to_string()),
        chat_id: Some("42".to_string()),
        api_base: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
    };
    let channel = TelegramChannel::from_config(&config).unwrap().unwrap();
    let err = channel.send(&make_alert("hello")).await.unwrap_err();
    assert!(matches!(err, NotifyError::HttpError(_)));
    assert!(!err.to_string().contains("secret-token"));
}

#[test]
fn missing_credentials_disable_channel() {
    assert!(TelegramChannel::from_config(&TelegramConfig::default())
        .unwrap()
        .is_none());

    let half = TelegramConfig {
        bot_token: Some("123:abc".to_string()),
        ..TelegramConfig::default()
    };
    assert!(matches!(
        TelegramChannel::from_config(&half),
        Err(NotifyError::InvalidConfig(_))
    ));
}

#[test]
fn telegram_config_defaults_from_toml() {
    let config: TelegramConfig = toml::from_str(r#"chat_id = "7""#).unwrap();
    assert_eq!(config.api_base, "https://api.telegram.org");
    assert_eq!(config.timeout_secs, 10);
    assert_eq!(config.chat_id.as_deref(), Some("7"));
    assert!(config.bot_token.is_none());
}

#[test]
fn truncation_and_masking() {
    assert_eq!(truncate_string("short", 10), "short");
    assert_eq!(truncate_string("ééé", 3), "é... [truncated]");
    assert_eq!(mask_secret("abc"), "***");
    assert_eq!(mask_secret("123456:ABCDEF"), "*********CDEF");
}
