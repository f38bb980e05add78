/// Типы данных контракта между формой и сервисом прогнозирования

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Модели, которые предлагает форма записи
pub const KNOWN_CAR_MODELS: &[&str] = &["XC90", "XC60", "XC40", "S90", "S60", "V90", "V60", "C40"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "petrol",
            FuelType::Diesel => "diesel",
            FuelType::Hybrid => "hybrid",
            FuelType::Electric => "electric",
        }
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "petrol" => Ok(FuelType::Petrol),
            "diesel" => Ok(FuelType::Diesel),
            "hybrid" => Ok(FuelType::Hybrid),
            "electric" => Ok(FuelType::Electric),
            other => Err(format!("unknown fuel type: {}", other)),
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    General,
    Basic,
    Standard,
    Premium,
    Major,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::General => "general",
            ServiceType::Basic => "basic",
            ServiceType::Standard => "standard",
            ServiceType::Premium => "premium",
            ServiceType::Major => "major",
        }
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(ServiceType::General),
            "basic" => Ok(ServiceType::Basic),
            "standard" => Ok(ServiceType::Standard),
            "premium" => Ok(ServiceType::Premium),
            "major" => Ok(ServiceType::Major),
            other => Err(format!("unknown service type: {}", other)),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Тело запроса `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub car_number_plate: String,
    pub car_model: String,
    pub manufacture_year: i32,
    pub fuel_type: FuelType,
    pub service_type: ServiceType,
    pub total_kilometers: i64,
    pub km_since_last_service: i64,
    pub selected_tasks: BTreeSet<String>,
    pub number_of_tasks: usize,
    pub last_service_days: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkloadLevel {
    Low,
    Medium,
    High,
}

impl WorkloadLevel {
    /// Уровень загрузки по проценту занятости мастерской
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 40.0 {
            WorkloadLevel::Low
        } else if percentage < 70.0 {
            WorkloadLevel::Medium
        } else {
            WorkloadLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadLevel::Low => "Low",
            WorkloadLevel::Medium => "Medium",
            WorkloadLevel::High => "High",
        }
    }
}

/// Дискретное состояние склада для требуемых запчастей
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartsStatus {
    Available,
    Limited,
    Partial,
    OutOfStock,
    ModelNotFound,
}

/// Ответ сервиса прогнозирования при `success = true`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePrediction {
    pub success: bool,
    pub service_id: String,
    pub car_model: String,
    pub car_number_plate: String,
    pub last_service_days: i64,
    pub predicted_service_time: f64, // часы
    pub workload_level: WorkloadLevel,
    pub workload_percentage: f64,
    pub queue_position: u32,
    pub parts_availability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts_status: Option<PartsStatus>,
    #[serde(default)]
    pub selected_tasks: Vec<String>,
    #[serde(default)]
    pub number_of_tasks: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Ответ сервиса при ошибке
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
