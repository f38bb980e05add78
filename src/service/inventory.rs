/// Склад запчастей по моделям автомобилей

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::ServiceError;
use crate::types::PartsStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartStock {
    pub quantity: u32,
    pub min_threshold: u32,
}

pub type ModelStock = BTreeMap<String, PartStock>;

/// Итог проверки склада: дискретный статус и текст для отображения
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartsReport {
    pub status: PartsStatus,
    pub text: String,
}

impl PartsReport {
    fn new(status: PartsStatus, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }
}

#[derive(Debug)]
pub struct Inventory {
    path: Option<PathBuf>,
    models: BTreeMap<String, ModelStock>,
}

const PART_NAMES: [&str; 13] = [
    "oil_filter",
    "air_filter",
    "fuel_filter",
    "brake_pads",
    "spark_plugs",
    "battery",
    "engine_oil",
    "brake_fluid",
    "brake_discs",
    "ac_gas",
    "ac_filter",
    "coolant",
    "tires",
];

/// (модель, [(количество, порог)] в порядке PART_NAMES)
const DEFAULT_STOCK: [(&str, [(u32, u32); 13]); 4] = [
    ("XC90", [(15, 5), (12, 4), (8, 3), (20, 6), (25, 8), (10, 3), (30, 10), (18, 6), (12, 4), (25, 8), (15, 5), (22, 7), (8, 3)]),
    ("XC60", [(18, 6), (15, 5), (10, 4), (22, 7), (28, 9), (12, 4), (35, 12), (20, 7), (15, 5), (28, 9), (18, 6), (25, 8), (10, 4)]),
    ("XC40", [(20, 7), (18, 6), (12, 4), (25, 8), (30, 10), (15, 5), (40, 15), (22, 8), (18, 6), (30, 10), (20, 7), (28, 9), (12, 5)]),
    ("S90", [(12, 4), (10, 3), (6, 2), (18, 6), (22, 7), (8, 3), (25, 8), (15, 5), (10, 3), (20, 7), (12, 4), (18, 6), (6, 2)]),
];

pub fn default_stock() -> BTreeMap<String, ModelStock> {
    DEFAULT_STOCK
        .iter()
        .map(|(model, parts)| {
            let stock = PART_NAMES
                .iter()
                .zip(parts.iter())
                .map(|(name, (quantity, min_threshold))| {
                    (
                        name.to_string(),
                        PartStock {
                            quantity: *quantity,
                            min_threshold: *min_threshold,
                        },
                    )
                })
                .collect();
            (model.to_string(), stock)
        })
        .collect()
}

impl Inventory {
    /// Склад без файла, только в памяти
    pub fn in_memory(models: BTreeMap<String, ModelStock>) -> Self {
        Self { path: None, models }
    }

    /// Строгая загрузка из JSON-файла
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let data = std::fs::read_to_string(path)?;
        let models = serde_json::from_str(&data)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            models,
        })
    }

    /// Загружает склад; если файла нет или он повреждён, создаёт склад по умолчанию и сохраняет его
    pub fn open(path: &Path) -> Self {
        if path.exists() {
            match Self::load(path) {
                Ok(inventory) => return inventory,
                Err(e) => tracing::warn!("Error loading inventory {}: {}", path.display(), e),
            }
        }

        let inventory = Self {
            path: Some(path.to_path_buf()),
            models: default_stock(),
        };
        match inventory.save() {
            Ok(()) => tracing::info!("Default inventory created at {}", path.display()),
            Err(e) => tracing::warn!("Error saving default inventory: {}", e),
        }
        inventory
    }

    fn save(&self) -> Result<(), ServiceError> {
        if let Some(path) = &self.path {
            let data = serde_json::to_string_pretty(&self.models)?;
            std::fs::write(path, data)?;
        }
        Ok(())
    }

    pub fn models(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }

    pub fn snapshot(&self) -> &BTreeMap<String, ModelStock> {
        &self.models
    }

    /// Поиск модели без учёта регистра, затем по вхождению подстроки
    fn resolve_model(&self, model: &str) -> Option<&str> {
        let wanted = model.trim().to_uppercase();
        if wanted.is_empty() {
            return None;
        }
        self.models
            .keys()
            .find(|key| key.to_uppercase() == wanted)
            .or_else(|| {
                self.models.keys().find(|key| {
                    let key = key.to_uppercase();
                    wanted.contains(&key) || key.contains(&wanted)
                })
            })
            .map(String::as_str)
    }

    /// Проверяет наличие запчастей под выбранные работы
    pub fn check_tasks<'a, I>(&self, model: &str, tasks: I) -> PartsReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        let Some(actual) = self.resolve_model(model) else {
            tracing::debug!("Model {} not found in inventory", model);
            return PartsReport::new(PartsStatus::ModelNotFound, "Model not found");
        };
        let stock = &self.models[actual];
        let required = catalog::required_parts(tasks);
        tracing::debug!(model = actual, ?required, "checking parts");

        let mut missing = Vec::new();
        let mut low_stock = Vec::new();
        for (part, required_qty) in &required {
            match stock.get(*part) {
                Some(s) if s.quantity >= *required_qty => {
                    if s.quantity <= s.min_threshold {
                        low_stock.push(*part);
                    }
                }
                _ => missing.push(*part),
            }
        }

        if !missing.is_empty() {
            if missing.len() == required.len() {
                PartsReport::new(PartsStatus::OutOfStock, "All parts out of stock")
            } else {
                PartsReport::new(
                    PartsStatus::Partial,
                    format!("Some parts out of stock ({})", missing.join(", ")),
                )
            }
        } else if !low_stock.is_empty() {
            PartsReport::new(
                PartsStatus::Limited,
                format!("All parts available (low stock: {})", low_stock.join(", ")),
            )
        } else {
            PartsReport::new(PartsStatus::Available, "All parts available")
        }
    }

    /// Списывает израсходованные запчасти (не ниже нуля) и сохраняет склад
    pub fn consume(&mut self, model: &str, parts: &BTreeMap<&str, u32>) -> Result<(), ServiceError> {
        let actual = self
            .resolve_model(model)
            .map(str::to_string)
            .ok_or_else(|| ServiceError::UnknownModel(model.to_string()))?;
        let Some(stock) = self.models.get_mut(&actual) else {
            return Err(ServiceError::UnknownModel(model.to_string()));
        };
        for (part, qty) in parts {
            if let Some(s) = stock.get_mut(*part) {
                s.quantity = s.quantity.saturating_sub(*qty);
            }
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> Inventory {
        Inventory::in_memory(default_stock())
    }

    fn set(inv: &mut Inventory, model: &str, part: &str, quantity: u32) {
        inv.models.get_mut(model).unwrap().get_mut(part).unwrap().quantity = quantity;
    }

    #[test]
    fn default_stock_has_four_models() {
        assert_eq!(inventory().models(), vec!["S90", "XC40", "XC60", "XC90"]);
        assert_eq!(inventory().snapshot()["XC60"]["engine_oil"], PartStock { quantity: 35, min_threshold: 12 });
    }

    #[test]
    fn all_available() {
        let report = inventory().check_tasks("XC60", ["oil_change", "air_filter"]);
        assert_eq!(report.status, PartsStatus::Available);
        assert_eq!(report.text, "All parts available");
    }

    #[test]
    fn model_lookup_is_case_insensitive_with_substring_fallback() {
        assert_eq!(inventory().check_tasks("xc60", ["oil_change"]).status, PartsStatus::Available);
        assert_eq!(inventory().check_tasks("Volvo XC90", ["oil_change"]).status, PartsStatus::Available);
        let report = inventory().check_tasks("V60", ["oil_change"]);
        assert_eq!(report.status, PartsStatus::ModelNotFound);
        assert_eq!(report.text, "Model not found");
        assert_eq!(inventory().check_tasks("", ["oil_change"]).status, PartsStatus::ModelNotFound);
    }

    #[test]
    fn low_stock_is_limited() {
        let mut inv = inventory();
        set(&mut inv, "XC40", "tires", 5);
        let report = inv.check_tasks("XC40", ["tire_replacement", "oil_change"]);
        assert_eq!(report.status, PartsStatus::Limited);
        assert_eq!(report.text, "All parts available (low stock: tires)");
    }

    #[test]
    fn some_and_all_out_of_stock() {
        let mut inv = inventory();
        set(&mut inv, "S90", "battery", 0);
        let report = inv.check_tasks("S90", ["battery_replacement", "oil_change"]);
        assert_eq!(report.status, PartsStatus::Partial);
        assert_eq!(report.text, "Some parts out of stock (battery)");

        set(&mut inv, "S90", "spark_plugs", 3);
        let report = inv.check_tasks("S90", ["battery_replacement", "spark_plugs"]);
        assert_eq!(report.status, PartsStatus::OutOfStock);
        assert_eq!(report.text, "All parts out of stock");
    }

    #[test]
    fn tasks_without_parts_are_available() {
        let report = inventory().check_tasks("XC90", ["car_wash", "wheel_alignment"]);
        assert_eq!(report.status, PartsStatus::Available);
    }

    #[test]
    fn report_text_classifies_to_same_status() {
        let mut inv = inventory();
        set(&mut inv, "XC90", "ac_gas", 1);
        set(&mut inv, "XC90", "coolant", 0);
        for tasks in [
            vec!["oil_change"],
            vec!["ac_service"],
            vec!["ac_service", "coolant_flush"],
            vec!["coolant_flush"],
        ] {
            let report = inv.check_tasks("XC90", tasks);
            assert_eq!(crate::render::classify_parts(&report.text), report.status);
        }
        let missing = inv.check_tasks("Model Y", ["oil_change"]);
        assert_eq!(crate::render::classify_parts(&missing.text), missing.status);
    }

    #[test]
    fn open_creates_default_file_and_consume_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");

        let mut inv = Inventory::open(&path);
        assert!(path.exists());
        assert_eq!(inv.models().len(), 4);

        let parts = catalog::required_parts(["spark_plugs"]);
        inv.consume("XC60", &parts).unwrap();

        let reloaded = Inventory::load(&path).unwrap();
        assert_eq!(reloaded.snapshot()["XC60"]["spark_plugs"].quantity, 24);
    }

    #[test]
    fn consume_floors_at_zero_and_rejects_unknown_model() {
        let mut inv = inventory();
        let mut parts = BTreeMap::new();
        parts.insert("tires", 100);
        inv.consume("s90", &parts).unwrap();
        assert_eq!(inv.snapshot()["S90"]["tires"].quantity, 0);
        assert!(matches!(inv.consume("Model Y", &parts), Err(ServiceError::UnknownModel(_))));
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, "{ not json").unwrap();

        let inv = Inventory::open(&path);
        assert_eq!(inv.models().len(), 4);
        assert!(Inventory::load(&path).is_ok());
    }
}
