mod helpers;

use axum::body::Body;
use axum::http::{Request, header};
use futures::StreamExt;
use serde_json::json;
use serial_test::serial;
use tokio::time::{Duration, timeout};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;
use tower::ServiceExt;

use db::models::{employee, organization};
use helpers::{make_app, make_test_state, spawn_server, token_for};

async fn next_json<S>(ws: &mut S) -> serde_json::Value
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let frame = timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("timed out waiting for ws frame")
            .expect("ws stream ended")
            .expect("ws error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).expect("frame was not JSON");
        }
    }
}

#[tokio::test]
#[serial]
async fn joining_observer_gets_a_fresh_snapshot() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();
    employee::Model::set_presence(
        state.db(),
        emp.id,
        &employee::Presence::InZone("Work Zone".into()),
    )
    .await
    .unwrap();

    let addr = spawn_server(make_app(state)).await;
    let token = token_for(emp.id, org.id, false);

    let (mut ws, _) = connect_async(format!(
        "ws://{addr}/ws/organizations/{}/presence?token={token}",
        org.id
    ))
    .await
    .expect("ws connect failed");

    let msg = next_json(&mut ws).await;
    assert_eq!(msg["event"], "presence.roster");
    assert_eq!(msg["payload"]["organization_id"], org.id);
    assert_eq!(msg["payload"]["employees"][0]["zone"], "Work Zone");
}

#[tokio::test]
#[serial]
async fn accepted_scan_fans_out_to_observers() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();

    let addr = spawn_server(make_app(state.clone())).await;
    let token = token_for(emp.id, org.id, false);

    let (mut ws, _) = connect_async(format!(
        "ws://{addr}/ws/organizations/{}/presence?token={token}",
        org.id
    ))
    .await
    .expect("ws connect failed");

    // skip the join snapshot
    let _ = next_json(&mut ws).await;

    // submit a scan through the HTTP surface sharing the same state
    let rest = make_app(state);
    let res = rest
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/scans")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "employee_id": emp.id, "zone": "In" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), axum::http::StatusCode::OK);

    let msg = next_json(&mut ws).await;
    assert_eq!(msg["event"], "presence.roster");
    assert_eq!(msg["payload"]["employees"][0]["zone"], "In");
}

#[tokio::test]
#[serial]
async fn request_roster_rebroadcasts_on_the_topic() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();

    let addr = spawn_server(make_app(state)).await;
    let token = token_for(emp.id, org.id, false);

    let (mut ws, _) = connect_async(format!(
        "ws://{addr}/ws/organizations/{}/presence?token={token}",
        org.id
    ))
    .await
    .expect("ws connect failed");

    let _ = next_json(&mut ws).await; // join snapshot

    use futures::SinkExt;
    ws.send(Message::Text(
        json!({ "type": "request_roster" }).to_string().into(),
    ))
    .await
    .unwrap();

    let msg = next_json(&mut ws).await;
    assert_eq!(msg["event"], "presence.roster");
}

#[tokio::test]
#[serial]
async fn observers_cannot_subscribe_to_another_organization() {
    let state = make_test_state().await;
    let org_a = organization::Model::create(state.db(), "Acme").await.unwrap();
    let org_b = organization::Model::create(state.db(), "Globex").await.unwrap();

    let addr = spawn_server(make_app(state)).await;
    let token_b = token_for(1, org_b.id, false);

    let result = connect_async(format!(
        "ws://{addr}/ws/organizations/{}/presence?token={token_b}",
        org_a.id
    ))
    .await;
    assert!(result.is_err(), "cross-org subscription must be refused");
}

#[tokio::test]
#[serial]
async fn snapshot_endpoint_broadcasts_without_a_scan() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();

    let addr = spawn_server(make_app(state.clone())).await;
    let token = token_for(emp.id, org.id, false);

    let (mut ws, _) = connect_async(format!(
        "ws://{addr}/ws/organizations/{}/presence?token={token}",
        org.id
    ))
    .await
    .expect("ws connect failed");

    let _ = next_json(&mut ws).await; // join snapshot

    let rest = make_app(state);
    let res = rest
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/organizations/{}/presence/snapshot", org.id))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), axum::http::StatusCode::OK);

    let msg = next_json(&mut ws).await;
    assert_eq!(msg["event"], "presence.roster");
    assert_eq!(msg["payload"]["employees"][0]["employee_number"], "EMP-1");
}
