use super::cookie::removal_cookie;
use crate::connectors::AuthConnector;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::{AccessToken, TokenCache};
use actix_web::{post, web, Responder, Result};
use std::sync::Arc;

/// Always ends the session on this side, even if the auth service fails.
#[tracing::instrument(name = "Sign out.", skip(token, auth, cache))]
#[post("/signout")]
pub async fn signout_handler(
    token: Option<web::ReqData<AccessToken>>,
    auth: web::Data<Arc<dyn AuthConnector>>,
    cache: web::Data<TokenCache>,
) -> Result<impl Responder> {
    if let Some(token) = token {
        let token = token.into_inner();
        cache.remove(token.as_str()).await;
        if let Err(err) = auth.sign_out(token.as_str()).await {
            tracing::warn!("Remote sign out failed: {}", err);
        }
    }

    let mut response = JsonResponse::<()>::build().ok("Signed out");
    response
        .add_cookie(&removal_cookie())
        .map_err(|err| JsonResponse::<()>::build().internal_server_error(err.to_string()))?;

    Ok(response)
}
