/// Проверка входящего запроса на стороне сервиса

use crate::error::ServiceError;
use crate::form::is_valid_number_plate;
use crate::form::validator::{MAX_MANUFACTURE_YEAR, MIN_MANUFACTURE_YEAR};
use crate::types::ServiceRequest;

pub const MAX_LAST_SERVICE_DAYS: i64 = 3650;
pub const MAX_TASKS: usize = 20;

fn invalid(message: &str) -> ServiceError {
    ServiceError::Validation(message.to_string())
}

pub fn validate_request(request: &ServiceRequest) -> Result<(), ServiceError> {
    if !(MIN_MANUFACTURE_YEAR..=MAX_MANUFACTURE_YEAR).contains(&request.manufacture_year) {
        return Err(invalid("Manufacture year must be between 2000 and 2024"));
    }
    if request.last_service_days < 0 {
        return Err(invalid("Last service days cannot be negative"));
    }
    if request.last_service_days > MAX_LAST_SERVICE_DAYS {
        return Err(invalid("Last service date seems too far in the past"));
    }
    if request.total_kilometers < 0 {
        return Err(invalid("Total kilometers cannot be negative"));
    }
    if request.km_since_last_service < 0 {
        return Err(invalid("KM since last service cannot be negative"));
    }
    if request.number_of_tasks == 0 {
        return Err(invalid("Number of tasks must be greater than 0"));
    }
    if request.number_of_tasks > MAX_TASKS {
        return Err(invalid("Number of tasks cannot exceed 20"));
    }
    if request.car_model.trim().is_empty() {
        return Err(invalid("Missing required field: car_model"));
    }
    if !is_valid_number_plate(&request.car_number_plate) {
        return Err(invalid("Invalid car number plate format. Use format like MH12AB1234"));
    }
    if request.selected_tasks.is_empty() {
        return Err(invalid("Please select at least one service task"));
    }
    if request.number_of_tasks != request.selected_tasks.len() {
        return Err(invalid("Number of tasks does not match selected tasks"));
    }
    Ok(())
}
