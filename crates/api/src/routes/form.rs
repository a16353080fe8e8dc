//! Form Routes

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Form,
};
use feature_engine::CustomerForm;
use std::sync::Arc;

use crate::render::{self, Outcome};
use crate::routes::predict::run_prediction;
use crate::AppState;

/// Empty prediction form
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::page(
        state.pipeline.encoders(),
        &CustomerForm::default(),
        None,
    ))
}

/// Handle a form submission and render the result on the same page
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CustomerForm>,
) -> (StatusCode, Html<String>) {
    let encoders = state.pipeline.encoders();

    match run_prediction(&state, &form) {
        Ok((_, prediction)) => (
            StatusCode::OK,
            Html(render::page(
                encoders,
                &form,
                Some(Outcome::Prediction(&prediction)),
            )),
        ),
        Err(err) => {
            let message = err.to_string();
            (
                err.status(),
                Html(render::page(encoders, &form, Some(Outcome::Error(&message)))),
            )
        }
    }
}
