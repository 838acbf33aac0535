mod f_anonym;
mod f_cookie;
mod f_oauth;

pub use f_anonym::anonym;
pub use f_cookie::try_cookie;
pub use f_oauth::try_oauth;

use crate::connectors::{AuthConnector, ConnectorError};
use crate::middleware::authentication::{AccessToken, TokenCache};
use crate::models::SessionUser;
use crate::services::GateState;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use std::sync::Arc;

/// Resolve `token` to a user (cache first, then the auth service) and attach
/// it to the request. `Ok(false)` when the token is not accepted, so the next
/// method gets a chance.
async fn authenticate(req: &mut ServiceRequest, token: String) -> Result<bool, String> {
    let connector = req
        .app_data::<web::Data<Arc<dyn AuthConnector>>>()
        .ok_or_else(|| "auth connector is not configured".to_string())?
        .clone();
    let cache = req
        .app_data::<web::Data<TokenCache>>()
        .ok_or_else(|| "token cache is not configured".to_string())?
        .clone();

    let user = match cache.get(&token).await {
        Some(user) => user,
        None => match connector.get_user(&token).await {
            Ok(user) => {
                cache.insert(token.clone(), user.clone()).await;
                user
            }
            Err(ConnectorError::Unauthorized(msg)) => {
                tracing::debug!("Token rejected by auth service: {}", msg);
                return Ok(false);
            }
            Err(err) => {
                tracing::warn!("Could not verify token, continuing anonymously: {}", err);
                return Ok(false);
            }
        },
    };

    attach(req, user, token)
}

fn attach(req: &mut ServiceRequest, user: SessionUser, token: String) -> Result<bool, String> {
    let mut extensions = req.extensions_mut();
    extensions.insert(GateState::Authenticated(user.clone()));
    extensions.insert(AccessToken(token));
    if extensions.insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    Ok(true)
}
