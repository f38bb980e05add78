/// Ошибки сервиса прогнозирования и клиента

use thiserror::Error;

use crate::form::FormField;

/// Сообщение, которое видит пользователь при любой транспортной ошибке
pub const CONNECTIVITY_MESSAGE: &str =
    "Network error: Unable to connect to server. Please check if the server is running.";

/// Сообщение по умолчанию, если сервис не прислал текст ошибки
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed";

/// Первое нарушенное правило формы
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Поле, на которое переводится фокус
    pub field: FormField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Сеть недоступна, статус не 2xx или тело не разобрано
    #[error("{}", CONNECTIVITY_MESSAGE)]
    Connectivity { detail: String },

    /// Корректный ответ с `success = false`
    #[error("{0}")]
    Application(String),
}

impl ClientError {
    pub fn connectivity(detail: impl Into<String>) -> Self {
        ClientError::Connectivity {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A submission is already in progress")]
    Busy,

    #[error("Invalid submission transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// Ошибки серверной части
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Inventory IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Inventory JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown car model: {0}")]
    UnknownModel(String),

    #[error("Service not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
