//! Prediction handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::models::{EmployeeRecord, PredictionResponse};
use crate::{AppError, AppResult, AppState};

/// POST /api/predict
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRecord>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Json(record) = payload.map_err(|e| AppError::InvalidBody(e.body_text()))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id);

    let response = async {
        let response = state.predictor.predict(&record).await?;

        tracing::info!(
            "Prediction: {} / {} risk (will_leave={:.2}, model={}, fallback={})",
            if response.result.will_leave() { "Will Leave" } else { "Will Stay" },
            response.result.risk_level,
            response.result.probability.will_leave,
            response.result.model_type,
            response.used_fallback()
        );

        Ok::<_, AppError>(response)
    }
    .instrument(span)
    .await?;

    Ok(Json(response))
}

/// Any non-POST method on a prediction route
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use crate::{create_router, AppState};
    use crate::predictor::FallbackPredictor;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState {
            config: Default::default(),
            predictor: Arc::new(FallbackPredictor::rule_based()),
        })
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_predict_success() {
        let (status, body) = send(
            app(),
            Method::POST,
            "/api/predict",
            Some(json!({
                "Age": "28", "DistanceFromHome": "22", "MonthlyIncome": "2900",
                "YearsAtCompany": "3", "OverTime": "Yes", "JobSatisfaction": "2",
                "WorkLifeBalance": "3", "Department": "Sales"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["prediction"], json!(1));
        assert_eq!(body["prediction_label"], json!("Will Leave"));
        assert_eq!(body["risk_level"], json!("High"));
        assert_eq!(body["model_type"], json!("Rule-Based Fallback Model"));
        assert_eq!(body["feature_importance"].as_object().unwrap().len(), 7);
        assert!(body["note"].is_string());
    }

    #[tokio::test]
    async fn test_predict_model_alias() {
        let (status, body) = send(
            app(),
            Method::POST,
            "/api/predict-model",
            Some(json!({
                "Age": 30, "DistanceFromHome": 10, "MonthlyIncome": 5000, "YearsAtCompany": 5
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"], json!(0));
        assert_eq!(body["risk_level"], json!("Low"));
    }

    #[tokio::test]
    async fn test_predict_missing_field() {
        let (status, body) = send(
            app(),
            Method::POST,
            "/api/predict",
            Some(json!({ "Age": 30, "DistanceFromHome": 10, "MonthlyIncome": "", "YearsAtCompany": 5 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Missing required field: MonthlyIncome"));
        assert_eq!(body["status"], json!(400));
    }

    #[tokio::test]
    async fn test_predict_invalid_body() {
        let (status, body) = send(app(), Method::POST, "/api/predict", Some(json!([1, 2, 3]))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_predict_wrong_method() {
        let (status, body) = send(app(), Method::GET, "/api/predict", None).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], json!("Method not allowed. Use POST."));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("healthy"));
        assert_eq!(body["predictor"], json!("rule-based"));
        assert_eq!(body["model_service_configured"], json!(false));
    }
}
