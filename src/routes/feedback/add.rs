use crate::connectors::FeedbackStore;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::{SubmissionFlow, SubmitError};
use crate::views::{self, Receipt};
use actix_web::{post, web, Responder, Result};
use std::sync::Arc;

/// Public submission form. No session required.
#[tracing::instrument(name = "Add feedback.", skip(store))]
#[post("")]
pub async fn add_handler(
    form: web::Json<forms::FeedbackForm>,
    store: web::Data<Arc<dyn FeedbackStore>>,
) -> Result<impl Responder> {
    let mut flow = SubmissionFlow::with_form(form.into_inner());

    let feedback = flow.begin().map_err(|err| match err {
        SubmitError::Invalid(errors) => {
            tracing::debug!("Invalid feedback received: {}", errors);
            JsonResponse::<Receipt>::build().form_error(errors)
        }
        other => JsonResponse::<Receipt>::build().bad_request(other.to_string()),
    })?;

    let receipt = Receipt::from(&feedback);
    let result = store.insert(&feedback).await;
    flow.finish(result)
        .map_err(|err| JsonResponse::<Receipt>::build().bad_gateway(err.to_string()))?;

    Ok(JsonResponse::build()
        .set_item(receipt)
        .created(views::feedback::RECEIVED_TITLE))
}
