//! Prediction Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use feature_engine::{CustomerForm, PreparedFeatures};
use inference_engine::{ChurnLabel, Prediction};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

/// One named feature value
#[derive(Debug, Serialize)]
pub struct FeatureValue {
    pub name: &'static str,
    pub value: f64,
}

/// Response for the JSON predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: ChurnLabel,
    pub probability: f64,
    pub probability_rounded: f64,
    /// Unscaled features in model order
    pub features: Vec<FeatureValue>,
}

/// Run a submitted form through the pipeline and the model
pub fn run_prediction(
    state: &AppState,
    form: &CustomerForm,
) -> Result<(PreparedFeatures, Prediction), ApiError> {
    let outcome = state
        .pipeline
        .prepare_form(form)
        .map_err(ApiError::from)
        .and_then(|prepared| {
            let result = state.engine.predict(&prepared.scaled)?;
            metrics::histogram!("churn_inference_seconds").record(result.latency.as_secs_f64());
            Ok((prepared, result.prediction))
        });

    match &outcome {
        Ok((_, prediction)) => {
            metrics::counter!("churn_predictions_total", "label" => prediction.label.as_str())
                .increment(1);
            info!(
                "Predicted churn={} probability={:.2}",
                prediction.label, prediction.probability_rounded
            );
        }
        Err(err) => {
            metrics::counter!("churn_prediction_errors_total", "kind" => err.kind()).increment(1);
            warn!("Rejected submission: {}", err);
        }
    }

    outcome
}

/// Predict churn for a JSON body
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CustomerForm>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(form) = payload.map_err(|rejection| {
        let err = ApiError::from(rejection);
        metrics::counter!("churn_prediction_errors_total", "kind" => err.kind()).increment(1);
        warn!("Rejected request body: {}", err);
        err
    })?;
    let (prepared, prediction) = run_prediction(&state, &form)?;

    Ok(Json(PredictResponse {
        prediction: prediction.label,
        probability: prediction.probability,
        probability_rounded: prediction.probability_rounded,
        features: prepared
            .features
            .named()
            .map(|(name, value)| FeatureValue { name, value })
            .collect(),
    }))
}
