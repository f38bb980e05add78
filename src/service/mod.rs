/// Серверная часть: очередь мастерской, склад, модель времени обслуживания

pub mod center;
pub mod ids;
pub mod inventory;
pub mod predictor;
pub mod validation;

pub use center::{QueueInfo, ServiceCenter};
pub use ids::{generate_service_id, new_service_id};
pub use inventory::{Inventory, PartStock, PartsReport};
pub use predictor::{PredictionFeatures, ServiceTimePredictor};
pub use validation::validate_request;
