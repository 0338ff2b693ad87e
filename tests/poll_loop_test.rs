use anyhow::Result;
use homework_notifier::core::{FailurePolicy, TickOutcome};
use homework_notifier::{NotifierError, PracticumClient, Poller, TelegramNotifier};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

const STATUS_PATH: &str = "/api/user_api/homework_statuses/";
const SEND_PATH: &str = "/bottest-token/sendMessage";

fn build_poller(
    practicum: &MockServer,
    telegram: &MockServer,
    from_date: i64,
) -> Result<Poller<PracticumClient, TelegramNotifier>> {
    let source = PracticumClient::new(practicum.url(STATUS_PATH), "practicum-token", Duration::from_secs(5))?;
    let notifier = TelegramNotifier::new(telegram.base_url(), "test-token", "100500", Duration::from_secs(5))?;
    Ok(Poller::new(
        source,
        notifier,
        from_date,
        Duration::ZERO,
        FailurePolicy::Continue,
    ))
}

/// Two identical responses produce one notification.
#[tokio::test]
async fn test_approved_homework_is_reported_once() -> Result<()> {
    let practicum = MockServer::start();
    let telegram = MockServer::start();

    let api_mock = practicum.mock(|when, then| {
        when.method(GET)
            .path(STATUS_PATH)
            .header("Authorization", "OAuth practicum-token");
        then.status(200).json_body(json!({
            "homeworks": [{"homework_name": "proj1", "status": "approved", "id": 7}],
            "current_date": 2000
        }));
    });

    let bot_mock = telegram.mock(|when, then| {
        when.method(POST).path(SEND_PATH).json_body(json!({
            "chat_id": "100500",
            "text": "Изменился статус проверки работы \"proj1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        }));
        then.status(200).json_body(json!({"ok": true}));
    });

    let mut poller = build_poller(&practicum, &telegram, 1000)?;

    let first = assert_ok!(poller.tick().await);
    assert!(matches!(first, TickOutcome::Notified(_)));
    assert_eq!(poller.state().next_from_timestamp, 2000);

    let second = assert_ok!(poller.tick().await);
    assert_eq!(second, TickOutcome::Unchanged);

    api_mock.assert_hits(2);
    bot_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_timestamp_follows_current_date() -> Result<()> {
    let practicum = MockServer::start();
    let telegram = MockServer::start();

    let first_mock = practicum.mock(|when, then| {
        when.method(GET).path(STATUS_PATH).query_param("from_date", "500");
        then.status(200)
            .json_body(json!({"homeworks": [], "current_date": 1000}));
    });
    let second_mock = practicum.mock(|when, then| {
        when.method(GET).path(STATUS_PATH).query_param("from_date", "1000");
        then.status(200)
            .json_body(json!({"homeworks": [], "current_date": 1600}));
    });
    let bot_mock = telegram.mock(|when, then| {
        when.method(POST).path(SEND_PATH);
        then.status(200).json_body(json!({"ok": true}));
    });

    let mut poller = build_poller(&practicum, &telegram, 500)?;
    assert_ok!(poller.tick().await);
    assert_ok!(poller.tick().await);

    first_mock.assert();
    second_mock.assert();
    // "no submission yet" goes out only once
    bot_mock.assert_hits(1);
    assert_eq!(poller.state().next_from_timestamp, 1600);
    Ok(())
}

#[tokio::test]
async fn test_missing_current_date_sends_failure_report() -> Result<()> {
    let practicum = MockServer::start();
    let telegram = MockServer::start();

    practicum.mock(|when, then| {
        when.method(GET).path(STATUS_PATH);
        then.status(200).json_body(json!({"homeworks": []}));
    });
    let bot_mock = telegram.mock(|when, then| {
        when.method(POST)
            .path(SEND_PATH)
            .body_contains("Сбой в работе программы.");
        then.status(200).json_body(json!({"ok": true}));
    });

    let mut poller = build_poller(&practicum, &telegram, 1000)?;
    let error = assert_err!(poller.tick().await);

    assert!(matches!(error, NotifierError::MissingFieldError { .. }));
    assert_eq!(poller.state().next_from_timestamp, 1000);
    bot_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_server_error_is_reported_and_loop_continues() -> Result<()> {
    let practicum = MockServer::start();
    let telegram = MockServer::start();

    let api_mock = practicum.mock(|when, then| {
        when.method(GET).path(STATUS_PATH);
        then.status(503).body("unavailable");
    });
    let bot_mock = telegram.mock(|when, then| {
        when.method(POST).path(SEND_PATH).body_contains("503");
        then.status(200).json_body(json!({"ok": true}));
    });

    let mut poller = build_poller(&practicum, &telegram, 0)?;
    poller.run(Some(3)).await?;

    api_mock.assert_hits(3);
    // identical failures are reported once
    bot_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_dead_chat_surfaces_delivery_error() -> Result<()> {
    let practicum = MockServer::start();
    let telegram = MockServer::start();

    practicum.mock(|when, then| {
        when.method(GET).path(STATUS_PATH);
        then.status(200).json_body(json!({
            "homeworks": [{"homework_name": "proj1", "status": "reviewing"}],
            "current_date": 10
        }));
    });
    let bot_mock = telegram.mock(|when, then| {
        when.method(POST).path(SEND_PATH);
        then.status(400)
            .json_body(json!({"ok": false, "description": "Bad Request: chat not found"}));
    });

    let mut poller = build_poller(&practicum, &telegram, 0)?;
    let error = assert_err!(poller.tick().await);

    assert!(matches!(error, NotifierError::DeliveryError { .. }));
    // the status message and the failure report were both attempted
    bot_mock.assert_hits(2);
    assert_eq!(poller.state().last_seen_status_key, "");
    Ok(())
}

#[tokio::test]
async fn test_malformed_older_record_is_ignored() -> Result<()> {
    let practicum = MockServer::start();
    let telegram = MockServer::start();

    practicum.mock(|when, then| {
        when.method(GET).path(STATUS_PATH);
        then.status(200).json_body(json!({
            "homeworks": [
                {"homework_name": "proj2", "status": "rejected"},
                "legacy-entry",
                {"homework_name": 17, "status": 3}
            ],
            "current_date": 30
        }));
    });
    let bot_mock = telegram.mock(|when, then| {
        when.method(POST)
            .path(SEND_PATH)
            .body_contains("Работа проверена: у ревьюера есть замечания.");
        then.status(200).json_body(json!({"ok": true}));
    });

    let mut poller = build_poller(&practicum, &telegram, 0)?;
    let outcome = assert_ok!(poller.tick().await);

    assert!(matches!(outcome, TickOutcome::Notified(_)));
    bot_mock.assert();
    assert_eq!(poller.state().last_seen_status_key, "rejected");
    Ok(())
}
