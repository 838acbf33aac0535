use crate::connectors::FeedbackStore;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AccessToken;
use crate::models::SessionUser;
use crate::services::dashboard;
use crate::views::Overview;
use actix_web::{get, web, Responder, Result};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Free-text filter over name, email and message
    pub q: Option<String>,
}

#[tracing::instrument(name = "Get dashboard.", skip(store, token))]
#[get("")]
pub async fn get_handler(
    user: Option<web::ReqData<Arc<SessionUser>>>,
    token: Option<web::ReqData<AccessToken>>,
    query: web::Query<DashboardQuery>,
    store: web::Data<Arc<dyn FeedbackStore>>,
) -> Result<impl Responder> {
    let (user, token) = match (user, token) {
        (Some(user), Some(token)) => (user.into_inner(), token.into_inner()),
        _ => {
            return Err(JsonResponse::<Overview>::build().unauthorized("Sign in to view the dashboard"));
        }
    };

    let snapshot = dashboard::load(store.get_ref().as_ref(), &user, token.as_str())
        .await
        .map_err(|err| {
            tracing::error!("Failed to load feedback: {}", err);
            JsonResponse::<Overview>::build().bad_gateway(err.to_string())
        })?;

    let overview = Overview::new(&snapshot, query.q.as_deref());
    Ok(JsonResponse::build().set_item(overview).ok("OK"))
}
