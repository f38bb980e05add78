/// Очередь и загрузка мастерской

use chrono::{DateTime, Local};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    Waiting,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueuedService {
    pub service_id: String,
    pub car_model: String,
    pub selected_tasks: Vec<String>,
    pub enqueued_at: DateTime<Local>,
    pub status: QueueStatus,
}

/// Снимок состояния мастерской (ответ `GET /api/system/status`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueInfo {
    pub total_workers: u32,
    pub current_workload: u32,
    pub queue_length: usize,
    pub worker_availability: u32,
    pub workload_percentage: f64,
}

#[derive(Debug)]
pub struct ServiceCenter {
    total_workers: u32,
    current_workload: u32,
    queue: Vec<QueuedService>,
}

impl ServiceCenter {
    /// Текущая загрузка моделируется случайным числом активных работ от 2 до 6
    pub fn new(total_workers: u32) -> Self {
        let current = rand::thread_rng().gen_range(2..=6);
        Self::with_workload(total_workers, current)
    }

    pub fn with_workload(total_workers: u32, current_workload: u32) -> Self {
        Self {
            total_workers,
            current_workload,
            queue: Vec::new(),
        }
    }

    pub fn total_workers(&self) -> u32 {
        self.total_workers
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Ставит работу в очередь и возвращает её позицию (с единицы)
    pub fn enqueue(
        &mut self,
        service_id: impl Into<String>,
        car_model: impl Into<String>,
        selected_tasks: Vec<String>,
    ) -> u32 {
        self.queue.push(QueuedService {
            service_id: service_id.into(),
            car_model: car_model.into(),
            selected_tasks,
            enqueued_at: Local::now(),
            status: QueueStatus::Waiting,
        });
        self.queue.len() as u32
    }

    /// Убирает завершённую работу из очереди и возвращает её
    pub fn complete(&mut self, service_id: &str) -> Option<QueuedService> {
        let index = self.queue.iter().position(|job| job.service_id == service_id)?;
        Some(self.queue.remove(index))
    }

    pub fn queue_info(&self) -> QueueInfo {
        let queue_length = self.queue.len();

        let mut available = self.total_workers.saturating_sub(self.current_workload);
        // Чем длиннее очередь, тем меньше свободных мастеров
        if queue_length > 10 {
            available = available.saturating_sub(4);
        } else if queue_length > 5 {
            available = available.saturating_sub(2);
        }

        let percentage = if self.total_workers == 0 {
            100.0
        } else {
            let raw = f64::from(self.current_workload) / f64::from(self.total_workers) * 100.0
                + queue_length as f64 * 5.0;
            raw.min(100.0)
        };

        QueueInfo {
            total_workers: self.total_workers,
            current_workload: self.current_workload,
            queue_length,
            worker_availability: available,
            workload_percentage: (percentage * 10.0).round() / 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_workload_in_range() {
        for _ in 0..20 {
            let info = ServiceCenter::new(8).queue_info();
            assert!((2..=6).contains(&info.current_workload));
        }
    }

    #[test]
    fn empty_queue() {
        let info = ServiceCenter::with_workload(8, 3).queue_info();
        assert_eq!(info.worker_availability, 5);
        assert_eq!(info.workload_percentage, 37.5);
        assert_eq!(info.queue_length, 0);
    }

    #[test]
    fn queue_positions_are_sequential() {
        let mut center = ServiceCenter::with_workload(8, 2);
        assert_eq!(center.enqueue("A", "XC60", vec![]), 1);
        assert_eq!(center.enqueue("B", "XC90", vec!["oil_change".to_string()]), 2);
        assert_eq!(center.enqueue("C", "S90", vec![]), 3);

        let done = center.complete("B").unwrap();
        assert_eq!(done.car_model, "XC90");
        assert_eq!(done.selected_tasks, vec!["oil_change"]);
        assert!(center.complete("B").is_none());
        assert_eq!(center.queue_len(), 2);
        assert_eq!(center.enqueue("D", "XC40", vec![]), 3);
    }

    #[test]
    fn long_queue_reduces_availability() {
        let mut center = ServiceCenter::with_workload(8, 2);
        for i in 0..6 {
            center.enqueue(format!("S{}", i), "XC60", Vec::new());
        }
        let info = center.queue_info();
        assert_eq!(info.worker_availability, 4);
        assert_eq!(info.workload_percentage, 55.0);

        for i in 6..11 {
            center.enqueue(format!("S{}", i), "XC60", Vec::new());
        }
        let info = center.queue_info();
        assert_eq!(info.worker_availability, 2);
        assert_eq!(info.workload_percentage, 80.0);
    }

    #[test]
    fn percentage_is_capped() {
        let mut center = ServiceCenter::with_workload(8, 6);
        for i in 0..20 {
            center.enqueue(format!("S{}", i), "XC60", Vec::new());
        }
        let info = center.queue_info();
        assert_eq!(info.workload_percentage, 100.0);
        assert_eq!(info.worker_availability, 0);
    }
}
