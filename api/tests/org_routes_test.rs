mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

use chrono::{TimeZone, Utc};
use db::models::{employee, organization, zone_session};
use helpers::{body_json, make_app, make_test_state, token_for};

fn get(uri: String, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
#[serial]
async fn presence_is_fenced_to_the_token_organization() {
    let state = make_test_state().await;
    let org_a = organization::Model::create(state.db(), "Acme").await.unwrap();
    let org_b = organization::Model::create(state.db(), "Globex").await.unwrap();
    let app = make_app(state);

    let token_b = token_for(1, org_b.id, false);
    let res = app
        .oneshot(get(format!("/api/organizations/{}/presence", org_a.id), &token_b))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn organization_analytics_require_admin_and_exclude_special_zones() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();

    // Seed closed sessions directly: 30 min Meeting, 10 min Work, plus
    // entry/exit rows that must not show up in totals.
    let t = |m: u32| Utc.with_ymd_and_hms(2026, 8, 4, 9, m, 0).unwrap();
    for (zone, start, end) in
        [("In", 0, 1), ("Meeting Zone", 1, 31), ("Work Zone", 31, 41), ("Out", 41, 41)]
    {
        let s = zone_session::Model::open(state.db(), emp.id, org.id, zone, t(start))
            .await
            .unwrap();
        zone_session::Model::close(state.db(), s, t(end)).await.unwrap();
    }

    let app = make_app(state);
    let employee_token = token_for(emp.id, org.id, false);
    let admin_token = token_for(1000, org.id, true);

    let res = app
        .clone()
        .oneshot(get(format!("/api/organizations/{}/analytics", org.id), &employee_token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .clone()
        .oneshot(get(format!("/api/organizations/{}/analytics", org.id), &admin_token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    let stats = body["data"].as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["zone"], "Meeting Zone");
    assert_eq!(stats[0]["total_minutes"], 30.0);
    assert_eq!(stats[1]["zone"], "Work Zone");

    // purge wipes the org's sessions
    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/organizations/{}/analytics", org.id))
                .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"]["deleted"], 4);

    let res = app
        .oneshot(get(format!("/api/organizations/{}/analytics", org.id), &admin_token))
        .await
        .unwrap();
    let body = body_json(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[serial]
async fn employee_analytics_are_visible_inside_the_org_only() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let other_org = organization::Model::create(state.db(), "Globex").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();
    let app = make_app(state);

    // coworker in the same org may read
    let coworker_token = token_for(emp.id + 1, org.id, false);
    let res = app
        .clone()
        .oneshot(get(format!("/api/employees/{}/analytics", emp.id), &coworker_token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // a token from another org may not
    let foreign_token = token_for(1, other_org.id, false);
    let res = app
        .clone()
        .oneshot(get(format!("/api/employees/{}/analytics", emp.id), &foreign_token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // unknown employee is a 404
    let res = app
        .oneshot(get("/api/employees/424242/analytics".to_string(), &coworker_token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn announcements_follow_admin_write_member_read() {
    let state = make_test_state().await;
    let org = organization::Model::create(state.db(), "Acme").await.unwrap();
    let emp = employee::Model::create(state.db(), org.id, "EMP-1", "Thabo M", "thabo@acme.test")
        .await
        .unwrap();
    let app = make_app(state);
    let admin_token = token_for(1000, org.id, true);
    let employee_token = token_for(emp.id, org.id, false);

    // member cannot post
    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/organizations/{}/announcements", org.id))
                .header(header::AUTHORIZATION, format!("Bearer {employee_token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "message": "hi" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // admin posts
    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/organizations/{}/announcements", org.id))
                .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "message": "Fire drill at noon" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body_json(res).await;
    let announcement_id = body["data"]["id"].as_i64().unwrap();

    // member reads
    let res = app
        .clone()
        .oneshot(get(format!("/api/organizations/{}/announcements", org.id), &employee_token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["message"], "Fire drill at noon");

    // admin deletes
    let res = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!(
                    "/api/organizations/{}/announcements/{announcement_id}",
                    org.id
                ))
                .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
