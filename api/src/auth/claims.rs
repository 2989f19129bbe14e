use serde::{Deserialize, Serialize};

/// Verified actor context carried in every token.
///
/// Tokens are issued by the external identity service; this crate only
/// verifies them. `organization_id` scopes every request — an admin is an
/// admin of exactly one organization.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Employee id (or admin actor id) of the caller.
    pub sub: i64,
    pub organization_id: i64,
    pub admin: bool,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
