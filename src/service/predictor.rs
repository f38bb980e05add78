/// Эвристическая модель времени обслуживания

use std::collections::BTreeSet;

use rand::Rng;
use rand_distr::StandardNormal;

use crate::catalog;
use crate::types::{ServiceRequest, ServiceType};

/// Признаки для прогноза
#[derive(Debug, Clone)]
pub struct PredictionFeatures<'a> {
    pub service_type: ServiceType,
    pub manufacture_year: i32,
    pub total_kilometers: i64,
    pub last_service_days: i64,
    pub number_of_tasks: usize,
    pub worker_availability: u32,
    pub selected_tasks: &'a BTreeSet<String>,
}

impl<'a> PredictionFeatures<'a> {
    pub fn from_request(request: &'a ServiceRequest, worker_availability: u32) -> Self {
        Self {
            service_type: request.service_type,
            manufacture_year: request.manufacture_year,
            total_kilometers: request.total_kilometers,
            last_service_days: request.last_service_days,
            number_of_tasks: request.selected_tasks.len(),
            worker_availability,
            selected_tasks: &request.selected_tasks,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceTimePredictor {
    reference_year: i32,
    variation_sigma: f64,
}

impl Default for ServiceTimePredictor {
    fn default() -> Self {
        Self::new(2024, 0.15)
    }
}

fn base_hours(service_type: ServiceType) -> f64 {
    match service_type {
        ServiceType::General => 2.5,
        ServiceType::Basic => 1.8,
        ServiceType::Standard => 3.2,
        ServiceType::Premium => 4.8,
        ServiceType::Major => 6.5,
    }
}

impl ServiceTimePredictor {
    pub fn new(reference_year: i32, variation_sigma: f64) -> Self {
        Self {
            reference_year,
            variation_sigma,
        }
    }

    /// Оценка без случайного разброса, в часах
    pub fn estimate(&self, features: &PredictionFeatures<'_>) -> f64 {
        // 1. База: тип обслуживания или сумма выбранных работ, что больше
        let task_hours = catalog::total_hours(features.selected_tasks.iter().map(String::as_str));
        let mut hours = base_hours(features.service_type).max(task_hours);

        // 2. Возраст автомобиля: +8% за год, не больше x2
        let age = f64::from(self.reference_year - features.manufacture_year);
        hours *= (1.0 + age * 0.08).min(2.0);

        // 3. Пробег, не больше x1.8
        let km_factor = 1.0 + (features.total_kilometers as f64 / 100_000.0) * 0.3;
        hours *= km_factor.min(1.8);

        // 4. Давность последнего сервиса
        hours *= if features.last_service_days > 365 {
            1.4
        } else if features.last_service_days > 180 {
            1.2
        } else {
            1.0
        };

        // 5. Количество работ
        hours *= 1.0 + features.number_of_tasks as f64 * 0.15;

        // 6. Свободные мастера
        hours *= match features.worker_availability {
            0..=1 => 1.4,
            2..=3 => 1.2,
            4..=5 => 1.0,
            _ => 0.9,
        };

        hours
    }

    /// Оценка с нормальным разбросом; не меньше часа, с точностью до 0.1
    pub fn predict<R: Rng>(&self, features: &PredictionFeatures<'_>, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        let variation = z * self.variation_sigma;
        let hours = (self.estimate(features) + variation).max(1.0);
        (hours * 10.0).round() / 10.0
    }
}
