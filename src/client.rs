/// HTTP клиент сервиса прогнозирования

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, PREDICTION_FAILED_MESSAGE};
use crate::types::{ServicePrediction, ServiceRequest};

/// Сервис, выдающий прогноз по запросу на обслуживание
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: &ServiceRequest) -> Result<ServicePrediction, ClientError>;
}

/// Один `POST /predict` на вызов, без повторов и без таймаута
pub struct PredictionClient {
    client: Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/predict", config.base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Разбирает тело ответа с кодом 2xx
fn interpret_reply(body: Value) -> Result<ServicePrediction, ClientError> {
    let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !success {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(PREDICTION_FAILED_MESSAGE)
            .to_string();
        return Err(ClientError::Application(message));
    }

    serde_json::from_value(body)
        .map_err(|e| ClientError::connectivity(format!("malformed prediction: {}", e)))
}

#[async_trait]
impl PredictionService for PredictionClient {
    async fn predict(&self, request: &ServiceRequest) -> Result<ServicePrediction, ClientError> {
        tracing::debug!(endpoint = %self.endpoint, plate = %request.car_number_plate, "sending prediction request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Network error: {}", e);
                ClientError::connectivity(e.to_string())
            })?;

        let status = response.status();
        tracing::debug!(%status, "prediction response");
        if !status.is_success() {
            tracing::warn!("HTTP error! status: {}", status);
            return Err(ClientError::connectivity(format!("HTTP status {}", status)));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::connectivity(format!("invalid json: {}", e)))?;

        interpret_reply(body)
    }
}
