/// Отображение результата прогноза

use std::time::Duration;

use crate::types::{PartsStatus, ServicePrediction};

pub const SERVICE_TIME_ANIMATION: Duration = Duration::from_millis(2000);
pub const QUEUE_ANIMATION: Duration = Duration::from_millis(1500);

/// Классификация текстового статуса склада.
///
/// Проверки идут сверху вниз, срабатывает первая:
/// "All parts available" вместе с "low stock" → Limited,
/// точное "All parts available" → Available,
/// "Some parts out of stock" → Partial,
/// "All parts out of stock" → OutOfStock,
/// точное "Model not found" → ModelNotFound,
/// всё остальное → OutOfStock.
pub fn classify_parts(text: &str) -> PartsStatus {
    if text.contains("All parts available") && text.contains("low stock") {
        PartsStatus::Limited
    } else if text == "All parts available" {
        PartsStatus::Available
    } else if text.contains("Some parts out of stock") {
        PartsStatus::Partial
    } else if text.contains("All parts out of stock") {
        PartsStatus::OutOfStock
    } else if text == "Model not found" {
        PartsStatus::ModelNotFound
    } else {
        PartsStatus::OutOfStock
    }
}

/// Статус склада из ответа: дискретное поле, если сервис его прислал, иначе по тексту
pub fn parts_status_of(prediction: &ServicePrediction) -> PartsStatus {
    prediction
        .parts_status
        .unwrap_or_else(|| classify_parts(&prediction.parts_availability))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartsBadge {
    pub css_class: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

impl From<PartsStatus> for PartsBadge {
    fn from(status: PartsStatus) -> Self {
        let (css_class, icon, label) = match status {
            PartsStatus::Available => ("parts-available", "fa-check-circle", "Available"),
            PartsStatus::Limited => ("parts-limited", "fa-exclamation-circle", "Limited Stock"),
            PartsStatus::Partial => ("parts-out-of-stock", "fa-exclamation-triangle", "Partial Stock"),
            PartsStatus::OutOfStock => ("parts-out-of-stock", "fa-times-circle", "Out of Stock"),
            PartsStatus::ModelNotFound => ("parts-out-of-stock", "fa-question-circle", "Model Not Found"),
        };
        Self {
            css_class,
            icon,
            label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenFormat {
    OneDecimal,
    Floor,
}

/// Линейная анимация числа от начального значения до итогового
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub format: TweenFormat,
}

impl Tween {
    pub fn new(to: f64, duration: Duration, format: TweenFormat) -> Self {
        Self {
            from: 0.0,
            to,
            duration,
            format,
        }
    }

    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        self.from + progress * (self.to - self.from)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    pub fn text_at(&self, elapsed: Duration) -> String {
        let value = self.value_at(elapsed);
        match self.format {
            TweenFormat::OneDecimal => format!("{:.1}", value),
            TweenFormat::Floor => format!("{}", value.floor() as i64),
        }
    }
}

/// Модель карточки результата
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub title: String,
    pub service_id_line: String,
    pub plate_line: String,
    pub days_line: String,
    pub service_time: Tween,
    pub duration_label: String,
    pub queue_position: Tween,
    pub workload_label: String,
    pub workload_class: String,
    pub workload_details: String,
    pub parts: PartsBadge,
    pub parts_details: String,
}

impl ResultView {
    pub fn from_prediction(prediction: &ServicePrediction) -> Self {
        let level = prediction.workload_level.as_str();
        Self {
            title: prediction.car_model.clone(),
            service_id_line: format!("Service ID: {}", prediction.service_id),
            plate_line: format!("Number Plate: {}", prediction.car_number_plate),
            days_line: format!("Days Since Last Service: {} days", prediction.last_service_days),
            service_time: Tween::new(
                prediction.predicted_service_time,
                SERVICE_TIME_ANIMATION,
                TweenFormat::OneDecimal,
            ),
            duration_label: format_hours(prediction.predicted_service_time),
            queue_position: Tween::new(
                f64::from(prediction.queue_position),
                QUEUE_ANIMATION,
                TweenFormat::Floor,
            ),
            workload_label: level.to_string(),
            workload_class: format!("workload-{}", level.to_lowercase()),
            workload_details: format!("{}% capacity", format_percentage(prediction.workload_percentage)),
            parts: PartsBadge::from(parts_status_of(prediction)),
            parts_details: prediction.parts_availability.clone(),
        }
    }
}

fn format_percentage(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Длительность в удобочитаемом виде
pub fn format_hours(hours: f64) -> String {
    if hours < 1.0 {
        format!("{} minutes", (hours * 60.0) as i64)
    } else if hours == 1.0 {
        "1 hour".to_string()
    } else {
        format!("{:.1} hours", hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkloadLevel;

    #[test]
    fn classification_precedence() {
        assert_eq!(classify_parts("All parts available (low stock: tires)"), PartsStatus::Limited);
        assert_eq!(classify_parts("All parts available"), PartsStatus::Available);
        assert_eq!(classify_parts("All parts available!"), PartsStatus::OutOfStock);
        assert_eq!(classify_parts("Some parts out of stock (battery)"), PartsStatus::Partial);
        assert_eq!(classify_parts("All parts out of stock"), PartsStatus::OutOfStock);
        assert_eq!(classify_parts("Model not found"), PartsStatus::ModelNotFound);
        assert_eq!(classify_parts("model not found"), PartsStatus::OutOfStock);
        assert_eq!(classify_parts("Parts out of stock: battery"), PartsStatus::OutOfStock);
        assert_eq!(classify_parts(""), PartsStatus::OutOfStock);
    }

    #[test]
    fn classification_is_idempotent() {
        for text in [
            "All parts available (low stock: tires)",
            "All parts available",
            "Some parts out of stock (a)",
            "Model not found",
            "whatever",
        ] {
            assert_eq!(classify_parts(text), classify_parts(text));
        }
    }

    fn prediction() -> ServicePrediction {
        ServicePrediction {
            success: true,
            service_id: "VOL20240615120000QW12".to_string(),
            car_model: "XC90".to_string(),
            car_number_plate: "KA05MX12".to_string(),
            last_service_days: 200,
            predicted_service_time: 4.3,
            workload_level: WorkloadLevel::High,
            workload_percentage: 77.5,
            queue_position: 7,
            parts_availability: "All parts available (low stock: brake_pads)".to_string(),
            parts_status: None,
            selected_tasks: vec!["brake_pads".to_string()],
            number_of_tasks: 1,
            error: None,
        }
    }

    #[test]
    fn result_view_lines() {
        let view = ResultView::from_prediction(&prediction());
        assert_eq!(view.title, "XC90");
        assert_eq!(view.service_id_line, "Service ID: VOL20240615120000QW12");
        assert_eq!(view.days_line, "Days Since Last Service: 200 days");
        assert_eq!(view.duration_label, "4.3 hours");
        assert_eq!(view.workload_class, "workload-high");
        assert_eq!(view.workload_details, "77.5% capacity");
        assert_eq!(view.parts.label, "Limited Stock");
        assert_eq!(view.parts_details, "All parts available (low stock: brake_pads)");
    }

    #[test]
    fn discrete_status_wins_over_text() {
        let mut p = prediction();
        p.parts_status = Some(PartsStatus::Partial);
        assert_eq!(parts_status_of(&p), PartsStatus::Partial);
        assert_eq!(ResultView::from_prediction(&p).parts.label, "Partial Stock");
    }

    #[test]
    fn tween_is_linear_and_clamped() {
        let view = ResultView::from_prediction(&prediction());
        let time = view.service_time;
        assert_eq!(time.text_at(Duration::ZERO), "0.0");
        assert!((time.value_at(Duration::from_millis(1000)) - 2.15).abs() < 1e-9);
        assert_eq!(time.text_at(Duration::from_secs(10)), "4.3");
        assert!(time.is_finished(SERVICE_TIME_ANIMATION));

        let queue = view.queue_position;
        assert_eq!(queue.text_at(Duration::from_millis(750)), "3");
        assert_eq!(queue.text_at(QUEUE_ANIMATION), "7");
    }

    #[test]
    fn whole_percentage_has_no_decimals() {
        let mut p = prediction();
        p.workload_percentage = 50.0;
        assert_eq!(ResultView::from_prediction(&p).workload_details, "50% capacity");
    }

    #[test]
    fn hours_formatting() {
        assert_eq!(format_hours(0.5), "30 minutes");
        assert_eq!(format_hours(1.0), "1 hour");
        assert_eq!(format_hours(2.5), "2.5 hours");
        assert_eq!(format_hours(3.0), "3.0 hours");
    }
}
