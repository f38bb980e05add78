/// Сводка выбранных работ под списком чекбоксов

use std::collections::BTreeSet;

use crate::catalog;

#[derive(Debug, Clone, PartialEq)]
pub struct TaskSummary {
    /// "1 task" / "3 tasks"
    pub count_label: String,
    /// Название работы и её длительность в часах
    pub items: Vec<(String, f64)>,
    pub total_hours: f64,
}

impl TaskSummary {
    /// `None` при пустом выборе: сводка скрыта
    pub fn from_selection(selected: &BTreeSet<String>) -> Option<Self> {
        if selected.is_empty() {
            return None;
        }

        let count = selected.len();
        let count_label = format!("{} task{}", count, if count > 1 { "s" } else { "" });

        let items: Vec<(String, f64)> = selected
            .iter()
            .filter_map(|value| catalog::find(value))
            .map(|task| (task.name.to_string(), task.hours))
            .collect();
        let total_hours = items.iter().map(|(_, hours)| hours).sum();

        Some(Self {
            count_label,
            items,
            total_hours,
        })
    }

    pub fn total_label(&self) -> String {
        format!("Estimated time: {:.1} hours", self.total_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_selection_hides_summary() {
        assert!(TaskSummary::from_selection(&BTreeSet::new()).is_none());
    }

    #[test]
    fn singular_and_plural_labels() {
        let one = TaskSummary::from_selection(&selection(&["oil_change"])).unwrap();
        assert_eq!(one.count_label, "1 task");

        let two = TaskSummary::from_selection(&selection(&["oil_change", "air_filter"])).unwrap();
        assert_eq!(two.count_label, "2 tasks");
        assert_eq!(two.total_label(), "Estimated time: 0.8 hours");
        assert_eq!(two.items.len(), 2);
    }
}
