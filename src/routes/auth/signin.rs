use super::cookie::session_cookie;
use crate::connectors::{AuthConnector, ConnectorError, Credentials};
use crate::forms::auth::SignIn;
use crate::helpers::JsonResponse;
use crate::views::AuthResult;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;

#[tracing::instrument(name = "Sign in.", skip(form, auth))]
#[post("/signin")]
pub async fn signin_handler(
    form: web::Json<SignIn>,
    auth: web::Data<Arc<dyn AuthConnector>>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<AuthResult>::build().bad_request(errors.to_string()));
    }

    let session = auth
        .sign_in(&Credentials::from(&*form))
        .await
        .map_err(|err| match err {
            ConnectorError::Rejected(msg) | ConnectorError::Unauthorized(msg) => {
                JsonResponse::<AuthResult>::build().unauthorized(msg)
            }
            err => err.into(),
        })?;

    tracing::info!("User {} signed in", session.user.id);
    let cookie = session_cookie(&session);
    let mut response = JsonResponse::build()
        .set_item(AuthResult::from(session))
        .ok("Signed in");
    response
        .add_cookie(&cookie)
        .map_err(|err| JsonResponse::<AuthResult>::build().internal_server_error(err.to_string()))?;

    Ok(response)
}
