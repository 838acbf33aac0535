use crate::middleware::authentication::ACCESS_TOKEN_COOKIE;
use actix_web::dev::ServiceRequest;

#[tracing::instrument(name = "Authenticate with cookie", skip(req))]
pub async fn try_cookie(req: &mut ServiceRequest) -> Result<bool, String> {
    let token = match req.cookie(ACCESS_TOKEN_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => return Ok(false),
    };

    tracing::debug!("Found access_token in cookies");
    super::authenticate(req, token).await
}
