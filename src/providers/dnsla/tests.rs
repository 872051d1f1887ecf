//! End-to-end tests for the dns.la provider against a mocked HTTP API

use super::*;
use crate::core::record::RecordType;
use assert_matches::assert_matches;
use httpmock::prelude::*;
use serde_json::{Value, json};
use std::time::Duration;

const ZONE: &str = "example.com.";

fn ok(data: Value) -> Value {
    json!({ "code": 200, "msg": "", "data": data })
}

fn remote(id: &str, host: &str, record_type: u16, data: &str) -> Value {
    json!({
        "id": id,
        "domainId": "dom-1",
        "host": host,
        "displayHost": format!("{host}.example.com"),
        "type": record_type,
        "data": data,
        "ttl": 600,
        "weight": 1,
        "preference": 1,
        "system": false,
        "disable": false
    })
}

fn provider_for(server: &MockServer) -> DnslaProvider {
    DnslaProvider::new(DnslaConfig::new("id", "secret").with_api_url(server.base_url())).unwrap()
}

async fn mock_domain(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/domain")
                .query_param("domain", "example.com")
                .header("Authorization", "Basic aWQ6c2VjcmV0");
            then.status(200)
                .json_body(ok(json!({ "id": "dom-1", "domain": "example.com" })));
        })
        .await
}

#[tokio::test]
async fn test_get_records_paginates() {
    let server = MockServer::start_async().await;
    let domain_mock = mock_domain(&server).await;
    let all: Vec<Value> = (0..23)
        .map(|i| remote(&format!("rec-{i}"), &format!("host{i}"), 1, "10.0.0.1"))
        .collect();
    let first_page = all[..10].to_vec();

    let first_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/recordList")
                .query_param("domainId", "dom-1")
                .query_param("pageIndex", "1")
                .query_param("pageSize", "10");
            then.status(200)
                .json_body(ok(json!({ "total": 23, "results": first_page.clone() })));
        })
        .await;
    let full_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/recordList")
                .query_param("domainId", "dom-1")
                .query_param("pageIndex", "1")
                .query_param("pageSize", "23");
            then.status(200)
                .json_body(ok(json!({ "total": 23, "results": all.clone() })));
        })
        .await;

    let provider = provider_for(&server);
    let getter: &dyn RecordGetter = &provider;
    let records = getter.get_records(ZONE).await.unwrap();

    assert_eq!(records.len(), 23);
    assert_eq!(records[22].id.as_deref(), Some("rec-22"));
    domain_mock.assert_async().await;
    first_mock.assert_hits_async(1).await;
    full_mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_set_records_over_http() {
    let server = MockServer::start_async().await;
    mock_domain(&server).await;
    let lookup_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/recordList")
                .query_param("type", "16")
                .query_param("host", "_acme-challenge");
            then.status(200)
                .json_body(ok(json!({ "total": 0, "results": [] })));
        })
        .await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/record")
                .json_body_partial(r#"{ "domainId": "dom-1", "type": 16, "host": "_acme-challenge", "ttl": 600 }"#);
            then.status(200).json_body(ok(json!({ "id": "rec-new" })));
        })
        .await;
    let update_mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/record")
                .json_body_partial(r#"{ "id": "rec-1", "type": 1, "host": "www", "data": "10.0.0.2", "ttl": 3600, "preference": 1, "weight": 1 }"#);
            then.status(200).json_body(ok(Value::Null));
        })
        .await;

    let records = [
        Record::new("www.example.com.", RecordType::A, "10.0.0.2")
            .with_id("rec-1")
            .with_ttl(Duration::from_secs(3600)),
        Record::new("_acme-challenge", RecordType::TXT, "token").with_ttl(Duration::from_secs(30)),
    ];
    let provider = provider_for(&server);
    let changed = provider.set_records(ZONE, &records).await.unwrap();

    assert_eq!(changed.len(), 2);
    assert_eq!(changed[0].id.as_deref(), Some("rec-new"));
    assert_eq!(changed[0].ttl, Duration::from_secs(600));
    assert_eq!(changed[1].name, "www");
    lookup_mock.assert_async().await;
    create_mock.assert_async().await;
    update_mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_records_by_lookup_over_http() {
    let server = MockServer::start_async().await;
    mock_domain(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/recordList")
                .query_param("type", "16")
                .query_param("host", "_acme-challenge");
            then.status(200).json_body(ok(json!({
                "total": 2,
                "results": [
                    remote("rec-1", "_acme-challenge", 16, "a"),
                    remote("rec-2", "_acme-challenge", 16, "b")
                ]
            })));
        })
        .await;
    let delete_one = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/record").query_param("id", "rec-1");
            then.status(200).json_body(ok(json!({})));
        })
        .await;
    let delete_two = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/record").query_param("id", "rec-2");
            then.status(200).json_body(ok(json!({})));
        })
        .await;

    let provider = provider_for(&server);
    let deleted = provider
        .delete_records(ZONE, &[Record::new("_acme-challenge", RecordType::TXT, "")])
        .await
        .unwrap();

    assert_eq!(deleted.len(), 2);
    delete_one.assert_async().await;
    delete_two.assert_async().await;
}

#[tokio::test]
async fn test_append_reports_provider_failure() {
    let server = MockServer::start_async().await;
    mock_domain(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/record");
            then.status(200)
                .json_body(json!({ "code": 403, "msg": "quota exceeded", "data": null }));
        })
        .await;

    let provider = provider_for(&server);
    let err = provider
        .append_records(ZONE, &[Record::new("www", RecordType::A, "10.0.0.1")])
        .await
        .unwrap_err();

    assert!(err.applied.is_empty());
    assert_matches!(err.source, Error::Api { code: 403, message } if message == "quota exceeded");
}

#[tokio::test]
async fn test_transport_failure() {
    let provider =
        DnslaProvider::new(DnslaConfig::new("id", "secret").with_api_url("http://127.0.0.1:1"))
            .unwrap();
    let result = provider.get_records(ZONE).await;
    assert_matches!(result, Err(Error::Transport(_)));
}
