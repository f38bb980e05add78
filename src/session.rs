/// Состояние отправки формы
///
/// Заменяет блокировку кнопки явным автоматом состояний:
/// Idle → Validating → Submitting → Success | Failed. Пока запрос
/// в полёте, повторная отправка отклоняется.

use std::time::Instant;

use chrono::NaiveDate;

use crate::client::PredictionService;
use crate::error::{ClientError, SessionError};
use crate::form::{validate, Notification, NotificationSlot, ServiceForm};
use crate::render::ResultView;
use crate::types::{ServicePrediction, ServiceRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Success(ServicePrediction),
    Failed(String),
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Success(_) => "success",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug)]
pub struct SubmissionSession {
    state: SubmissionState,
    notifications: NotificationSlot,
}

impl Default for SubmissionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionSession {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            notifications: NotificationSlot::new(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SubmissionState::Validating | SubmissionState::Submitting)
    }

    pub fn submit_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub fn notification(&mut self, now: Instant) -> Option<&Notification> {
        self.notifications.active(now)
    }

    /// Результат последней успешной отправки в виде модели отображения
    pub fn result_view(&self) -> Option<ResultView> {
        match &self.state {
            SubmissionState::Success(prediction) => Some(ResultView::from_prediction(prediction)),
            _ => None,
        }
    }

    /// Idle | Success | Failed → Validating
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        self.state = SubmissionState::Validating;
        Ok(())
    }

    fn expect_state(&self, expected: &SubmissionState, to: &'static str) -> Result<(), SessionError> {
        if &self.state != expected {
            return Err(SessionError::InvalidTransition {
                from: self.state.name(),
                to,
            });
        }
        Ok(())
    }

    /// Validating → Submitting, либо Failed при ошибке валидации
    pub fn validate(
        &mut self,
        form: &ServiceForm,
        today: NaiveDate,
    ) -> Result<Option<ServiceRequest>, SessionError> {
        self.expect_state(&SubmissionState::Validating, "submitting")?;
        Ok(match validate(form, today) {
            Ok(request) => {
                self.state = SubmissionState::Submitting;
                Some(request)
            }
            Err(err) => {
                tracing::debug!(field = %err.field, "validation failed: {}", err.message);
                self.notifications
                    .raise(Notification::new(err.message.clone(), Some(err.field), Instant::now()));
                self.state = SubmissionState::Failed(err.message);
                None
            }
        })
    }

    /// Submitting → Success | Failed
    pub fn complete(&mut self, outcome: Result<ServicePrediction, ClientError>) -> Result<(), SessionError> {
        let to = if outcome.is_ok() { "success" } else { "failed" };
        self.expect_state(&SubmissionState::Submitting, to)?;
        match outcome {
            Ok(prediction) => {
                tracing::info!(service_id = %prediction.service_id, "prediction received");
                self.notifications.dismiss();
                self.state = SubmissionState::Success(prediction);
            }
            Err(err) => {
                let message = err.to_string();
                self.notifications
                    .raise(Notification::new(message.clone(), None, Instant::now()));
                self.state = SubmissionState::Failed(message);
            }
        }
        Ok(())
    }

    /// Полный цикл отправки: валидация, один запрос, итоговое состояние
    pub async fn submit<S>(
        &mut self,
        form: &ServiceForm,
        service: &S,
        today: NaiveDate,
    ) -> Result<&SubmissionState, SessionError>
    where
        S: PredictionService + ?Sized,
    {
        self.begin()?;
        if let Some(request) = self.validate(form, today)? {
            tracing::debug!(?request, "submitting");
            let outcome = service.predict(&request).await;
            self.complete(outcome)?;
        }
        Ok(&self.state)
    }
}
