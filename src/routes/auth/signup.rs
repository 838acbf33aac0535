use super::cookie::session_cookie;
use crate::connectors::{AuthConnector, ConnectorError, SignUpOutcome};
use crate::forms::auth::SignUp;
use crate::helpers::JsonResponse;
use crate::views::AuthResult;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;

#[tracing::instrument(name = "Sign up.", skip(form, auth))]
#[post("/signup")]
pub async fn signup_handler(
    form: web::Json<SignUp>,
    auth: web::Data<Arc<dyn AuthConnector>>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<AuthResult>::build().bad_request(errors.to_string()));
    }

    let outcome = auth
        .sign_up(&form.credentials(), &form.metadata())
        .await
        .map_err(|err| match err {
            ConnectorError::Rejected(msg) => JsonResponse::<AuthResult>::build().bad_request(msg),
            err => err.into(),
        })?;

    let cookie = match &outcome {
        SignUpOutcome::SignedIn(session) => Some(session_cookie(session)),
        SignUpOutcome::ConfirmationPending { .. } => None,
    };

    let mut response = JsonResponse::build()
        .set_item(AuthResult::from(outcome))
        .created("Signed up");
    if let Some(cookie) = cookie {
        response
            .add_cookie(&cookie)
            .map_err(|err| JsonResponse::<AuthResult>::build().internal_server_error(err.to_string()))?;
    }

    Ok(response)
}
