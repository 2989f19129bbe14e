mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

use db::models::{employee, organization};
use helpers::{body_json, make_app, make_test_state, token_for};

async fn post_scan(
    app: &axum::Router,
    token: &str,
    employee_id: i64,
    zone: &str,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/scans")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "employee_id": employee_id, "zone": zone }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
#[serial]
async fn interior_scan_before_entry_is_access_denied() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();
    let app = make_app(state);
    let token = token_for(emp.id, org.id, false);

    let res = post_scan(&app, &token, emp.id, "Meeting Zone").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = body_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["accepted"], false);
    assert_eq!(body["data"]["reason"], "ACCESS_DENIED");
}

#[tokio::test]
#[serial]
async fn entry_then_interior_then_exit_moves_presence() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();
    let app = make_app(state.clone());
    let token = token_for(emp.id, org.id, false);

    let res = post_scan(&app, &token, emp.id, "In").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"]["accepted"], true);
    assert_eq!(body["data"]["zone"], "In");

    let res = post_scan(&app, &token, emp.id, "Meeting Zone").await;
    assert_eq!(res.status(), StatusCode::OK);

    // presence endpoint reflects the move
    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/organizations/{}/presence", org.id))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"][0]["zone"], "Meeting Zone");

    let res = post_scan(&app, &token, emp.id, "Out").await;
    assert_eq!(res.status(), StatusCode::OK);

    let reloaded = employee::Model::find_by_id(state.db(), emp.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.current_zone, Some("Out".to_string()));
}

#[tokio::test]
#[serial]
async fn unknown_zone_is_a_validation_error() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();
    let app = make_app(state);
    let token = token_for(emp.id, org.id, false);

    let res = post_scan(&app, &token, emp.id, "Server Room").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(res).await;
    assert_eq!(body["data"]["reason"], "VALIDATION_ERROR");
}

#[tokio::test]
#[serial]
async fn employees_cannot_scan_for_someone_else() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();
    let other = employee::Model::create(state.db(), org.id, "EMP-2", "Anna B", "anna@acme.test")
        .await
        .unwrap();
    let app = make_app(state);
    let token = token_for(emp.id, org.id, false);

    let res = post_scan(&app, &token, other.id, "In").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn admins_cannot_scan_across_organizations() {
    let state = make_test_state().await;
    let org_a = organization::Model::create(state.db(), "Acme").await.unwrap();
    let org_b = organization::Model::create(state.db(), "Globex").await.unwrap();
    let emp_b = employee::Model::create(state.db(), org_b.id, "EMP-1", "Other", "x@globex.test")
        .await
        .unwrap();
    let app = make_app(state);
    let admin_a = token_for(1000, org_a.id, true);

    let res = post_scan(&app, &admin_a, emp_b.id, "In").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn scans_require_authentication() {
    let state = make_test_state().await;
    let app = make_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/scans")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "employee_id": 1, "zone": "In" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn health_needs_no_token() {
    let state = make_test_state().await;
    let app = make_app(state);

    let res = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
