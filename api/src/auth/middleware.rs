use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use tracing::info;

use crate::auth::claims::AuthUser;

/// Logs method, path and caller id for every incoming request; CORS
/// preflights are skipped.
pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if parts.method == Method::OPTIONS {
        let req = Request::from_parts(parts, body);
        return next.run(req).await;
    }

    let user_id = AuthUser::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|AuthUser(c)| c.sub)
        .unwrap_or(0);

    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();

    let req = Request::from_parts(parts, body);
    let response = next.run(req).await;

    info!(
        method = %method,
        path = %path,
        user = user_id,
        status = %response.status(),
        "request"
    );

    response
}
