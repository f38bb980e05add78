/// Расчёт дней с последнего сервиса

use chrono::NaiveDate;

/// Полные календарные дни между датой сервиса и сегодняшним днём.
/// Время суток не учитывается, поэтому сегодняшняя дата даёт 0.
pub fn days_since(last_service_date: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(last_service_date).num_days()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysBand {
    Neutral,
    Warning,
    Alert,
}

impl DaysBand {
    pub fn classify(days: i64) -> Self {
        if days > 365 {
            DaysBand::Alert
        } else if days > 180 {
            DaysBand::Warning
        } else {
            DaysBand::Neutral
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            DaysBand::Neutral => "calculated-days show",
            DaysBand::Warning => "calculated-days show warning",
            DaysBand::Alert => "calculated-days show alert",
        }
    }
}

/// Подсказка рядом с полем даты; пересчитывается при каждом изменении поля
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaysIndicator {
    pub days: i64,
    pub band: DaysBand,
}

impl DaysIndicator {
    /// `None`, когда дата не выбрана и подсказка скрыта
    pub fn compute(last_service_date: Option<NaiveDate>, today: NaiveDate) -> Option<Self> {
        let days = days_since(last_service_date?, today);
        Some(Self {
            days,
            band: DaysBand::classify(days),
        })
    }
}
