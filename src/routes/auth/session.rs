use crate::helpers::JsonResponse;
use crate::services::GateState;
use actix_web::{get, web, Responder, Result};

/// The gate state of the calling request.
#[tracing::instrument(name = "Get session.")]
#[get("/session")]
pub async fn session_handler(state: web::ReqData<GateState>) -> Result<impl Responder> {
    Ok(JsonResponse::build().set_item(state.into_inner()).ok("OK"))
}
