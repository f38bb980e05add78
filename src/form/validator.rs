/// Валидация формы и сборка запроса

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::form::days::days_since;
use crate::types::{FuelType, ServiceRequest, ServiceType, KNOWN_CAR_MODELS};

static NUMBER_PLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{2}[0-9]{1,2}[A-Za-z]{1,2}[0-9]{1,4}$").expect("number plate pattern")
});

pub const MIN_MANUFACTURE_YEAR: i32 = 2000;
pub const MAX_MANUFACTURE_YEAR: i32 = 2024;

const REQUIRED_MESSAGE: &str = "Please fill in all required fields";

/// Поля формы в порядке их расположения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    CarNumberPlate,
    CarModel,
    ManufactureYear,
    FuelType,
    ServiceType,
    LastServiceDate,
    TotalKilometers,
    KmSinceLastService,
    Tasks,
}

impl FormField {
    /// Идентификатор поля в разметке
    pub fn id(&self) -> &'static str {
        match self {
            FormField::CarNumberPlate => "car_number_plate",
            FormField::CarModel => "car_model",
            FormField::ManufactureYear => "manufacture_year",
            FormField::FuelType => "fuel_type",
            FormField::ServiceType => "service_type",
            FormField::LastServiceDate => "last_service_date",
            FormField::TotalKilometers => "total_kilometers",
            FormField::KmSinceLastService => "km_since_last_service",
            FormField::Tasks => "tasks",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Значения полей в том виде, в каком их ввёл пользователь
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceForm {
    pub car_number_plate: String,
    pub car_model: String,
    pub manufacture_year: String,
    pub fuel_type: String,
    pub service_type: String,
    pub last_service_date: Option<NaiveDate>,
    pub total_kilometers: String,
    pub km_since_last_service: String,
    pub selected_tasks: BTreeSet<String>,
}

pub fn is_valid_number_plate(plate: &str) -> bool {
    NUMBER_PLATE.is_match(plate)
}

fn is_known_model(model: &str) -> bool {
    KNOWN_CAR_MODELS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(model.trim()))
}

fn parse_number<T: std::str::FromStr>(field: FormField, raw: &str) -> Result<T, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::new(field, "Invalid numeric value in input fields"))
}

/// Проверяет форму и собирает `ServiceRequest`.
///
/// Правила проверяются по порядку, возвращается первое нарушенное:
/// номер, дата последнего сервиса, обязательные поля, выбор работ,
/// год выпуска, общий пробег, пробег с последнего сервиса.
pub fn validate(form: &ServiceForm, today: NaiveDate) -> Result<ServiceRequest, ValidationError> {
    if !is_valid_number_plate(&form.car_number_plate) {
        return Err(ValidationError::new(
            FormField::CarNumberPlate,
            "Invalid car number plate format. Please use format like MH12AB1234",
        ));
    }

    let last_service_date = form.last_service_date.ok_or_else(|| {
        ValidationError::new(FormField::LastServiceDate, "Please select the last service date")
    })?;

    // Значение вне списка у select считается незаполненным
    let fuel_type = form.fuel_type.parse::<FuelType>().ok();
    let service_type = form.service_type.parse::<ServiceType>().ok();
    let required = [
        (FormField::CarModel, is_known_model(&form.car_model)),
        (FormField::ManufactureYear, !form.manufacture_year.trim().is_empty()),
        (FormField::FuelType, fuel_type.is_some()),
        (FormField::ServiceType, service_type.is_some()),
        (FormField::TotalKilometers, !form.total_kilometers.trim().is_empty()),
        (FormField::KmSinceLastService, !form.km_since_last_service.trim().is_empty()),
    ];
    if let Some((field, _)) = required.iter().find(|(_, filled)| !filled) {
        return Err(ValidationError::new(*field, REQUIRED_MESSAGE));
    }

    if form.selected_tasks.is_empty() {
        return Err(ValidationError::new(
            FormField::Tasks,
            "Please select at least one service task",
        ));
    }

    let manufacture_year: i32 = parse_number(FormField::ManufactureYear, &form.manufacture_year)?;
    if !(MIN_MANUFACTURE_YEAR..=MAX_MANUFACTURE_YEAR).contains(&manufacture_year) {
        return Err(ValidationError::new(
            FormField::ManufactureYear,
            "Manufacture year must be between 2000 and 2024",
        ));
    }

    let total_kilometers: i64 = parse_number(FormField::TotalKilometers, &form.total_kilometers)?;
    if total_kilometers < 0 {
        return Err(ValidationError::new(
            FormField::TotalKilometers,
            "Total kilometers cannot be negative",
        ));
    }

    let km_since_last_service: i64 =
        parse_number(FormField::KmSinceLastService, &form.km_since_last_service)?;
    if km_since_last_service < 0 {
        return Err(ValidationError::new(
            FormField::KmSinceLastService,
            "KM since last service cannot be negative",
        ));
    }

    let last_service_days = days_since(last_service_date, today);
    if last_service_days < 0 {
        return Err(ValidationError::new(
            FormField::LastServiceDate,
            "Last service date cannot be in the future",
        ));
    }

    let fuel_type = fuel_type.ok_or_else(|| ValidationError::new(FormField::FuelType, REQUIRED_MESSAGE))?;
    let service_type =
        service_type.ok_or_else(|| ValidationError::new(FormField::ServiceType, REQUIRED_MESSAGE))?;

    let car_model = KNOWN_CAR_MODELS
        .iter()
        .find(|known| known.eq_ignore_ascii_case(form.car_model.trim()))
        .map(|known| known.to_string())
        .unwrap_or_else(|| form.car_model.trim().to_string());

    Ok(ServiceRequest {
        car_number_plate: form.car_number_plate.trim().to_uppercase(),
        car_model,
        manufacture_year,
        fuel_type,
        service_type,
        total_kilometers,
        km_since_last_service,
        number_of_tasks: form.selected_tasks.len(),
        selected_tasks: form.selected_tasks.clone(),
        last_service_days,
    })
}
