pub mod forms;

use axum::routing::post;
use axum::Router;

use crate::state::SharedState;

pub fn form_routes() -> Router<SharedState> {
    Router::new()
        .route("/submit-contact", post(forms::submit_contact))
        .route("/submit-application", post(forms::submit_application))
        .route("/subscribe-newsletter", post(forms::subscribe_newsletter))
}
