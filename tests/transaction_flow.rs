//! End-to-end submission tests: caller → gateway → mock node.

use axum::http::Method;
use futures_util::future::join_all;
use serde_json::{json, Value};
use std::time::Duration;

use wallet_gateway::blockchain::transaction::{canonical_message, parse_value};
use wallet_gateway::blockchain::{KeyMaterial, OutboundTransactionPayload, P256Keys};

mod common;
use common::Reply;

async fn post_transaction(url: &str, body: &Value) -> (u16, Value) {
    let res = common::client().post(url).json(body).send().await.expect("Gateway unreachable");
    let status = res.status().as_u16();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_accepted_transaction_reports_success() {
    let node = common::start_programmable_node(|_| Reply::status(201)).await;
    let gateway = common::start_gateway(&node.url()).await;

    let body = common::transfer_body("1Alice", "1Bob", "12.5");
    let (status, reply) = post_transaction(&gateway.url("/transaction"), &body).await;

    assert_eq!(status, 200);
    assert_eq!(reply, json!({"message": "success"}));

    let received = node.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].method, Method::POST);
    assert_eq!(received[0].path, "/transactions");

    let wire = received[0].json();
    let keys: Vec<&str> = wire.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 5);
    assert!(wire.get("sender_private_key").is_none());
    assert_eq!(wire["sender_public_key"], body["sender_public_key"]);

    // The node must be able to verify what it was sent.
    let payload: OutboundTransactionPayload = serde_json::from_value(wire).unwrap();
    assert_eq!(payload.value.to_bits(), parse_value("12.5").unwrap().to_bits());

    let public_key = P256Keys.decode_public_key(&payload.sender_public_key).unwrap();
    let signature = P256Keys.decode_signature(&payload.signature).unwrap();
    let message = canonical_message(
        &payload.sender_blockchain_address,
        &payload.recipient_blockchain_address,
        payload.value,
    );
    assert!(P256Keys.verify(&message, &signature, &public_key));

    let tampered = canonical_message("1Alice", "1Mallory", payload.value);
    assert!(!P256Keys.verify(&tampered, &signature, &public_key));
}

#[tokio::test]
async fn test_rejected_transaction_reports_fail() {
    for node_status in [200, 400, 500] {
        let node = common::start_programmable_node(move |_| Reply::status(node_status)).await;
        let gateway = common::start_gateway(&node.url()).await;

        let body = common::transfer_body("1Alice", "1Bob", "1");
        let (status, reply) = post_transaction(&gateway.url("/transaction"), &body).await;

        assert_eq!(status, 200, "node status {}", node_status);
        assert_eq!(reply, json!({"message": "fail"}), "node status {}", node_status);
        assert_eq!(node.received().len(), 1);
    }
}

#[tokio::test]
async fn test_unreachable_node_reports_fail() {
    let gateway = common::start_gateway(&common::dead_node_url()).await;

    let body = common::transfer_body("1Alice", "1Bob", "3");
    let (status, reply) = post_transaction(&gateway.url("/transaction"), &body).await;

    assert_eq!(status, 200);
    assert_eq!(reply, json!({"message": "fail"}));
}

#[tokio::test]
async fn test_slow_node_times_out_as_fail() {
    let node = common::start_programmable_node(|_| {
        Reply::status(201).delayed(Duration::from_secs(3))
    })
    .await;
    let gateway = common::start_gateway(&node.url()).await;

    let body = common::transfer_body("1Alice", "1Bob", "3");
    let (_, reply) = post_transaction(&gateway.url("/transaction"), &body).await;

    assert_eq!(reply, json!({"message": "fail"}));
}

#[tokio::test]
async fn test_invalid_requests_never_reach_node() {
    let node = common::start_programmable_node(|_| Reply::status(201)).await;
    let gateway = common::start_gateway(&node.url()).await;
    let url = gateway.url("/transaction");

    let complete = common::transfer_body("1Alice", "1Bob", "5");
    let mut cases = Vec::new();
    for field in [
        "sender_blockchain_address",
        "recipient_blockchain_address",
        "sender_public_key",
        "sender_private_key",
        "value",
    ] {
        let mut missing = complete.clone();
        missing.as_object_mut().unwrap().remove(field);
        cases.push(missing);

        let mut empty = complete.clone();
        empty[field] = json!("");
        cases.push(empty);
    }

    let mut bad_value = complete.clone();
    bad_value["value"] = json!("five");
    cases.push(bad_value);

    let mut numeric_value = complete.clone();
    numeric_value["value"] = json!(5);
    cases.push(numeric_value);

    let mut foreign_key = complete.clone();
    foreign_key["sender_private_key"] = json!(common::fresh_keys().1);
    cases.push(foreign_key);

    for body in &cases {
        let (status, reply) = post_transaction(&url, body).await;
        assert_eq!(status, 200);
        assert_eq!(reply, json!({"message": "fail"}), "body {}", body);
    }

    assert!(node.received().is_empty());
}

#[tokio::test]
async fn test_unparsable_body_reports_fail() {
    let node = common::start_programmable_node(|_| Reply::status(201)).await;
    let gateway = common::start_gateway(&node.url()).await;

    let res = common::client()
        .post(gateway.url("/transaction"))
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"message": "fail"}));
}

#[tokio::test]
async fn test_wrong_method_is_bad_request() {
    let gateway = common::start_gateway(&common::dead_node_url()).await;

    let res = common::client().get(gateway.url("/transaction")).send().await.unwrap();
    assert_eq!(res.status(), 400);

    let res = common::client().delete(gateway.url("/wallet/amount")).send().await.unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let gateway = common::start_gateway(&common::dead_node_url()).await;

    let res = common::client()
        .post(gateway.url("/transaction"))
        .header("x-request-id", "wallet-42")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), "wallet-42");

    let res = common::client().post(gateway.url("/transaction")).body("{}").send().await.unwrap();
    let generated = res.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(generated.len(), 36);
}

#[tokio::test]
async fn test_concurrent_submissions_get_their_own_verdict() {
    // Even whole amounts are accepted, odd ones rejected.
    let node = common::start_programmable_node(|request| {
        let payload: OutboundTransactionPayload = serde_json::from_slice(&request.body).unwrap();
        if (payload.value as u32) % 2 == 0 {
            Reply::status(201)
        } else {
            Reply::status(400)
        }
    })
    .await;
    let gateway = common::start_gateway(&node.url()).await;
    let url = gateway.url("/transaction");

    let requests = (0..24u32).map(|i| {
        let url = url.clone();
        async move {
            let body = common::transfer_body(&format!("1Sender{}", i), &format!("1Recipient{}", i), &i.to_string());
            let (_, reply) = post_transaction(&url, &body).await;
            (i, reply)
        }
    });

    for (i, reply) in join_all(requests).await {
        let expected = if i % 2 == 0 { "success" } else { "fail" };
        assert_eq!(reply, json!({"message": expected}), "request {}", i);
    }
    assert_eq!(node.received().len(), 24);
}
