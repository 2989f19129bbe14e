//! Shared application state for Axum route handlers and WebSocket serving.

use crate::ws::WebSocketManager;
use sea_orm::DatabaseConnection;

/// Central state handed to every handler via Axum's `State` extractor.
///
/// Holds the SeaORM connection pool and the topic-based `WebSocketManager`
/// used for presence broadcasts. Both are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    ws: WebSocketManager,
}

impl AppState {
    pub fn new(db: DatabaseConnection, ws: WebSocketManager) -> Self {
        Self { db, ws }
    }

    /// Shared reference to the database connection.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Shared reference to the WebSocket manager.
    pub fn ws(&self) -> &WebSocketManager {
        &self.ws
    }

    /// Owned clone of the database connection, for spawned tasks.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Owned clone of the WebSocket manager.
    pub fn ws_clone(&self) -> WebSocketManager {
        self.ws.clone()
    }
}
