//! Service Predictor - прогноз времени обслуживания автомобиля

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod render;
pub mod server;
pub mod service;
pub mod session;
pub mod types;

pub use types::*;

// Re-export для удобства
pub use client::{PredictionClient, PredictionService};
pub use config::{ClientConfig, ServerConfig};
pub use error::{ClientError, Error, Result, ServiceError, SessionError, ValidationError};
pub use form::{validate, ServiceForm};
pub use session::{SubmissionSession, SubmissionState};
