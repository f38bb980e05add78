/// Каталог сервисных работ: длительность и расход запчастей

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    EnginePerformance,
    BrakesSafety,
    WheelsAlignment,
    AcCooling,
    ElectricalBattery,
    AdditionalServices,
}

impl TaskCategory {
    pub fn key(&self) -> &'static str {
        match self {
            TaskCategory::EnginePerformance => "engine_performance",
            TaskCategory::BrakesSafety => "brakes_safety",
            TaskCategory::WheelsAlignment => "wheels_alignment",
            TaskCategory::AcCooling => "ac_cooling",
            TaskCategory::ElectricalBattery => "electrical_battery",
            TaskCategory::AdditionalServices => "additional_services",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskInfo {
    pub value: &'static str,
    pub name: &'static str,
    #[serde(rename = "time")]
    pub hours: f64,
    #[serde(skip)]
    pub category: TaskCategory,
    /// Запчасти и их количество на одну работу
    #[serde(skip)]
    pub parts: &'static [(&'static str, u32)],
}

macro_rules! task {
    ($value:literal, $name:literal, $hours:literal, $category:ident, [$(($part:literal, $qty:literal)),*]) => {
        TaskInfo {
            value: $value,
            name: $name,
            hours: $hours,
            category: TaskCategory::$category,
            parts: &[$(($part, $qty)),*],
        }
    };
}

pub static TASKS: &[TaskInfo] = &[
    task!("oil_change", "Engine Oil Change", 0.5, EnginePerformance, [("oil_filter", 1), ("engine_oil", 1)]),
    task!("air_filter", "Air Filter Replacement", 0.3, EnginePerformance, [("air_filter", 1)]),
    task!("spark_plugs", "Spark Plugs Replacement", 1.0, EnginePerformance, [("spark_plugs", 4)]),
    task!("fuel_filter", "Fuel Filter Replacement", 0.4, EnginePerformance, [("fuel_filter", 1)]),
    task!("brake_pads", "Brake Pads Replacement", 1.5, BrakesSafety, [("brake_pads", 1)]),
    task!("brake_fluid", "Brake Fluid Change", 0.5, BrakesSafety, [("brake_fluid", 1)]),
    task!("brake_discs", "Brake Discs Replacement", 2.0, BrakesSafety, [("brake_discs", 1)]),
    task!("wheel_alignment", "Wheel Alignment", 1.0, WheelsAlignment, []),
    task!("tire_rotation", "Tire Rotation", 0.5, WheelsAlignment, []),
    task!("wheel_balancing", "Wheel Balancing", 0.8, WheelsAlignment, []),
    task!("tire_replacement", "Tire Replacement", 1.2, WheelsAlignment, [("tires", 1)]),
    task!("ac_service", "AC Service", 1.5, AcCooling, [("ac_gas", 1)]),
    task!("ac_filter", "AC Filter Replacement", 0.3, AcCooling, [("ac_filter", 1)]),
    task!("coolant_flush", "Coolant Flush", 1.0, AcCooling, [("coolant", 1)]),
    task!("battery_replacement", "Battery Replacement", 0.5, ElectricalBattery, [("battery", 1)]),
    task!("bulb_replacement", "Bulb Replacement", 0.4, ElectricalBattery, []),
    task!("electrical_check", "Electrical System Check", 0.8, ElectricalBattery, []),
    task!("car_wash", "Car Wash & Cleaning", 0.5, AdditionalServices, []),
    task!("diagnostic_scan", "Diagnostic Scan", 0.6, AdditionalServices, []),
    task!("suspension_check", "Suspension Check", 1.2, AdditionalServices, []),
];

pub fn find(value: &str) -> Option<&'static TaskInfo> {
    TASKS.iter().find(|t| t.value == value)
}

/// Работы, сгруппированные по категориям (ответ `GET /api/tasks`)
pub fn grouped() -> BTreeMap<&'static str, Vec<&'static TaskInfo>> {
    let mut groups: BTreeMap<&'static str, Vec<&'static TaskInfo>> = BTreeMap::new();
    for task in TASKS {
        groups.entry(task.category.key()).or_default().push(task);
    }
    groups
}

/// Суммарная потребность в запчастях для набора работ; неизвестные работы пропускаются
pub fn required_parts<'a, I>(tasks: I) -> BTreeMap<&'static str, u32>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut required = BTreeMap::new();
    for task in tasks.into_iter().filter_map(find) {
        for (part, qty) in task.parts {
            *required.entry(*part).or_insert(0) += qty;
        }
    }
    required
}

/// Сумма длительностей выбранных работ в часах
pub fn total_hours<'a, I>(tasks: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    tasks.into_iter().filter_map(find).map(|t| t.hours).sum()
}
