/// HTTP API сервиса прогнозирования

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog;
use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::service::{
    new_service_id, validate_request, Inventory, PredictionFeatures, ServiceCenter,
    ServiceTimePredictor,
};
use crate::types::{ErrorReply, ServicePrediction, ServiceRequest, WorkloadLevel};

#[derive(Clone)]
pub struct AppState {
    center: Arc<Mutex<ServiceCenter>>,
    inventory: Arc<Mutex<Inventory>>,
    predictor: Arc<ServiceTimePredictor>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_parts(
            ServiceCenter::new(config.total_workers),
            Inventory::open(&config.inventory_file),
            ServiceTimePredictor::default(),
        )
    }

    pub fn with_parts(center: ServiceCenter, inventory: Inventory, predictor: ServiceTimePredictor) -> Self {
        Self {
            center: Arc::new(Mutex::new(center)),
            inventory: Arc::new(Mutex::new(inventory)),
            predictor: Arc::new(predictor),
        }
    }

    pub async fn inventory_models(&self) -> Vec<String> {
        self.inventory.lock().await.models()
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServiceError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ServiceError::NotFound(id) => (StatusCode::NOT_FOUND, format!("Service not found: {}", id)),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Prediction failed: {}", other),
            ),
        };
        (status, Json(ErrorReply::new(message))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/test", get(test_route))
        .route("/predict", post(predict))
        .route("/api/tasks", get(tasks))
        .route("/api/inventory", get(inventory))
        .route("/api/system/status", get(system_status))
        .route("/api/service/:service_id/complete", post(complete_service))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Vehicle Service Time Predictor API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let (total_workers, current_queue) = {
        let center = state.center.lock().await;
        (center.total_workers(), center.queue_len())
    };
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Local::now().to_rfc3339(),
        "service": "Vehicle Service Time Predictor",
        "inventory_models": state.inventory_models().await,
        "total_workers": total_workers,
        "current_queue": current_queue,
    }))
}

async fn test_route(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Server is running!",
        "timestamp": Local::now().to_rfc3339(),
        "status": "OK",
        "inventory_models": state.inventory_models().await,
    }))
}

async fn tasks() -> impl IntoResponse {
    Json(catalog::grouped())
}

async fn inventory(State(state): State<AppState>) -> impl IntoResponse {
    let inventory = state.inventory.lock().await;
    Json(inventory.snapshot().clone())
}

async fn system_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.center.lock().await.queue_info())
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Endpoint not found" })),
    )
}

/// Завершает работу: убирает её из очереди и списывает запчасти со склада
async fn complete_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let job = state
        .center
        .lock()
        .await
        .complete(&service_id)
        .ok_or_else(|| ServiceError::NotFound(service_id.clone()))?;

    let parts = catalog::required_parts(job.selected_tasks.iter().map(String::as_str));
    let parts_consumed = match state.inventory.lock().await.consume(&job.car_model, &parts) {
        Ok(()) => true,
        Err(ServiceError::UnknownModel(model)) => {
            tracing::warn!("No inventory for {}, parts not consumed", model);
            false
        }
        Err(e) => return Err(e),
    };

    tracing::info!(service_id = %job.service_id, parts_consumed, "service completed");
    let queue_length = state.center.lock().await.queue_len();
    Ok(Json(serde_json::json!({
        "success": true,
        "service_id": job.service_id,
        "parts_consumed": parts_consumed,
        "queue_length": queue_length,
    })))
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<ServiceRequest>, JsonRejection>,
) -> Result<Json<ServicePrediction>, ServiceError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected predict payload: {}", rejection.body_text());
        ServiceError::Validation(format!("Invalid request: {}", rejection.body_text()))
    })?;
    validate_request(&request)?;

    tracing::info!(
        "Predict request: {} {}, {} tasks",
        request.car_model,
        request.car_number_plate,
        request.selected_tasks.len()
    );

    let service_id = new_service_id();

    let (queue_info, queue_position) = {
        let mut center = state.center.lock().await;
        let info = center.queue_info();
        let position = center.enqueue(
            service_id.clone(),
            request.car_model.clone(),
            request.selected_tasks.iter().cloned().collect(),
        );
        (info, position)
    };

    let predicted_service_time = {
        let features = PredictionFeatures::from_request(&request, queue_info.worker_availability);
        let mut rng = rand::thread_rng();
        state.predictor.predict(&features, &mut rng)
    };

    let parts = state.inventory.lock().await.check_tasks(
        &request.car_model,
        request.selected_tasks.iter().map(String::as_str),
    );

    tracing::debug!(
        service_id = %service_id,
        predicted_service_time,
        parts = %parts.text,
        "prediction ready"
    );

    let selected_tasks: Vec<String> = request.selected_tasks.into_iter().collect();
    Ok(Json(ServicePrediction {
        success: true,
        service_id,
        predicted_service_time,
        workload_percentage: queue_info.workload_percentage,
        workload_level: WorkloadLevel::from_percentage(queue_info.workload_percentage),
        queue_position,
        parts_availability: parts.text,
        parts_status: Some(parts.status),
        car_model: request.car_model,
        car_number_plate: request.car_number_plate,
        last_service_days: request.last_service_days,
        number_of_tasks: selected_tasks.len(),
        selected_tasks,
        error: None,
    }))
}
