use axum::Router;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::net::SocketAddr;

use api::auth::claims::Claims;
use api::{routes::routes, ws::ws_routes};
use util::{config, state::AppState, ws::WebSocketManager};

/// Point the global config at test values. Every test sets the same values,
/// so initialization order between test threads does not matter.
pub fn init_test_env() {
    unsafe {
        std::env::set_var("JWT_SECRET", "test-secret");
        std::env::set_var("DATABASE_PATH", "sqlite::memory:");
    }
}

pub async fn make_test_state() -> AppState {
    init_test_env();
    let db = db::test_utils::setup_test_db().await;
    AppState::new(db, WebSocketManager::new())
}

pub fn make_app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes(state.clone()))
        .nest("/ws", ws_routes(state.clone()))
        .with_state(state)
}

pub fn token_for(sub: i64, organization_id: i64, admin: bool) -> String {
    let claims = Claims {
        sub,
        organization_id,
        admin,
        exp: (Utc::now().timestamp() as usize) + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )
    .expect("token encoding failed")
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body was not JSON")
}

/// Spawn the app on a random local port for WebSocket tests.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server crashed");
    });

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    addr
}
