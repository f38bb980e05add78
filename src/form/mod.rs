/// Форма записи на сервис: валидация, расчёт дней, уведомления

pub mod days;
pub mod notification;
pub mod summary;
pub mod validator;

pub use days::{days_since, DaysBand, DaysIndicator};
pub use notification::{Notification, NotificationSlot, NOTIFICATION_TTL};
pub use summary::TaskSummary;
pub use validator::{is_valid_number_plate, validate, FormField, ServiceForm};
