// SPDX-FileCopyrightText: 2026 OffChain Luxembourg
//
// SPDX-License-Identifier: MIT

//! Integration tests for ordered endpoint fallback
//!
//! These tests use wiremock mirrors to exercise the fallback orchestrator and
//! the consumer client: priority order, input-order alignment, zero-record
//! defaults, validation-driven disqualification, and the batch degrade path.

use engine_rpc::{
    BalanceRecord, Dialect, Endpoint, EngineClient, EngineError, EngineSettings, LogicalQuery,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method},
};

fn standard(uri: &str) -> Endpoint {
    Endpoint::new(uri, "", Dialect::Standard)
}

fn test_settings(endpoints: Vec<Endpoint>) -> EngineSettings {
    EngineSettings {
        endpoints,
        max_retries: 0,
        base_delay_ms: 10,
        timeout_seconds: 5,
        ..EngineSettings::default()
    }
}

fn accounts(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

fn alice_row() -> serde_json::Value {
    json!({ "account": "alice", "symbol": "OCLT", "balance": "10.000", "stake": "5.000" })
}

#[tokio::test]
async fn single_balance_falls_back_to_next_endpoint() {
    let failing = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&failing)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [alice_row()] })))
        .mount(&healthy)
        .await;

    let client = EngineClient::new(test_settings(vec![
        standard(&failing.uri()),
        standard(&healthy.uri()),
    ]))
    .unwrap();

    let record = client.single_balance("alice").await.unwrap();
    assert_eq!(record.account, "alice");
    assert_eq!(record.balance, "10.000");
    assert_eq!(record.stake, "5.000");

    // The outcome reports which mirror ultimately answered.
    let outcome = client
        .orchestrator()
        .execute::<BalanceRecord>(&LogicalQuery::single("alice", "OCLT"), None)
        .await
        .unwrap();
    assert_eq!(outcome.source_endpoint.base_url, healthy.uri());
}

#[tokio::test]
async fn batch_preserves_input_order_and_duplicates() {
    let mirror = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                { "account": "bob", "balance": "1.000", "stake": "2.000" },
                alice_row(),
            ]
        })))
        .mount(&mirror)
        .await;

    let client = EngineClient::new(test_settings(vec![standard(&mirror.uri())])).unwrap();
    let records = client
        .batch_balances(&accounts(&["alice", "bob", "alice"]))
        .await;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].account, "alice");
    assert_eq!(records[1].account, "bob");
    assert_eq!(records[2], records[0]);
}

#[tokio::test]
async fn absent_accounts_default_to_zero_records() {
    let mirror = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [alice_row()] })))
        .mount(&mirror)
        .await;

    let client = EngineClient::new(test_settings(vec![standard(&mirror.uri())])).unwrap();
    let records = client.batch_balances(&accounts(&["alice", "ghost"])).await;

    assert_eq!(records[1].account, "ghost");
    assert_eq!(records[1].balance, "0");
    assert_eq!(records[1].stake, "0");
}

#[tokio::test]
async fn single_balance_is_idempotent_against_a_stable_mirror() {
    let mirror = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [alice_row()] })))
        .expect(2)
        .mount(&mirror)
        .await;

    let client = EngineClient::new(test_settings(vec![standard(&mirror.uri())])).unwrap();
    let first = client.single_balance("alice").await.unwrap();
    let second = client.single_balance("alice").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn batch_exhaustion_degrades_to_single_queries() {
    let failing = MockServer::start().await;
    let partial = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&failing)
        .await;
    // Only alice's single query succeeds here; batch and bob get 500.
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "params": { "query": { "account": "alice" } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [alice_row()] })))
        .mount(&partial)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&partial)
        .await;

    let client = EngineClient::new(test_settings(vec![
        standard(&failing.uri()),
        standard(&partial.uri()),
    ]))
    .unwrap();

    let records = client.batch_balances(&accounts(&["alice", "bob"])).await;

    assert_eq!(records[0].account, "alice");
    assert_eq!(records[0].stake, "5.000");
    // Bob failed everywhere, so bulk display still gets a zero record.
    assert_eq!(records[1], BalanceRecord::zero("bob"));
}

#[tokio::test]
async fn zero_supply_disqualifies_endpoint_for_token_info() {
    let stale = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "supply": "0", "circulatingSupply": "0" }]
        })))
        .expect(1)
        .mount(&stale)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "supply": "1000000.000", "circulatingSupply": "750000.000" }]
        })))
        .mount(&healthy)
        .await;

    let client = EngineClient::new(test_settings(vec![
        standard(&stale.uri()),
        standard(&healthy.uri()),
    ]))
    .unwrap();

    let info = client.token_info().await.unwrap();
    assert_eq!(info.supply, "1000000.000");
    assert_eq!(info.circulating_amount(), 750_000.0);
}

#[tokio::test]
async fn all_zero_stakes_fail_batch_validation_and_fall_through() {
    let zeroed = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "account": "alice", "balance": "3.000", "stake": "0" }]
        })))
        .mount(&zeroed)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [alice_row()] })))
        .mount(&healthy)
        .await;

    let client = EngineClient::new(test_settings(vec![
        standard(&zeroed.uri()),
        standard(&healthy.uri()),
    ]))
    .unwrap();

    let records = client.batch_balances(&accounts(&["alice"])).await;
    assert_eq!(records[0].stake, "5.000");
}

#[tokio::test]
async fn caller_predicate_can_accept_an_all_zero_membership() {
    let zeroed = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "account": "alice", "balance": "3.000", "stake": "0" }]
        })))
        .mount(&zeroed)
        .await;

    let client = EngineClient::new(test_settings(vec![standard(&zeroed.uri())])).unwrap();
    let records = client
        .batch_balances_with(&accounts(&["alice"]), |_| true)
        .await;

    assert_eq!(records[0].balance, "3.000");
    assert_eq!(records[0].stake, "0");
}

#[tokio::test]
async fn empty_single_result_exhausts_the_registry() {
    let mirror = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .mount(&mirror)
        .await;

    let client = EngineClient::new(test_settings(vec![standard(&mirror.uri())])).unwrap();
    let result = client.single_balance("nobody").await;

    match result.unwrap_err() {
        EngineError::Exhausted(exhausted) => {
            assert_eq!(exhausted.attempts.len(), 1);
            assert!(exhausted.to_string().contains("empty result"));
        }
        other => panic!("expected Exhausted, got: {other:?}"),
    }
}
