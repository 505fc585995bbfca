use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;
use crate::models::user::UserRole;
use crate::utils::jwt::Claims;

/// Allowed-role check, bound to a route at registration time.
///
/// Pure set-membership over the fixed slice; there is no privilege ordering.
/// Admin appears in every preset below, but only because each allow-list says
/// so explicitly.
async fn enforce(allowed: &[UserRole], req: Request, next: Next) -> Result<Response, ApiError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| ApiError::Unauthorized("Token is necessary".into()))?;

    if !allowed.contains(&claims.role) {
        return Err(ApiError::Forbidden("Access denied".into()));
    }

    Ok(next.run(req).await)
}

pub async fn allow_all_users(req: Request, next: Next) -> Result<Response, ApiError> {
    enforce(
        &[UserRole::Admin, UserRole::Organizer, UserRole::Visitor],
        req,
        next,
    )
    .await
}

pub async fn allow_organizer(req: Request, next: Next) -> Result<Response, ApiError> {
    enforce(&[UserRole::Admin, UserRole::Organizer], req, next).await
}

pub async fn only_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    enforce(&[UserRole::Admin], req, next).await
}
