use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::department::{Department, DepartmentValues};

/// Per-day department figures (needed or booked), ordered by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyMetrics {
    days: BTreeMap<NaiveDate, DepartmentValues>,
}

impl DailyMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, date: NaiveDate, department: Department, value: f64) {
        self.days.entry(date).or_default().add(department, value);
    }

    /// Sums another series into this one, day by day.
    pub fn merge(&mut self, other: &DailyMetrics) {
        for (date, values) in &other.days {
            self.days.entry(*date).or_default().merge(values);
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DepartmentValues> {
        self.days.get(&date)
    }

    pub fn value(&self, date: NaiveDate, department: Department) -> f64 {
        self.get(date)
            .map(|values| values.get(department))
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DepartmentValues)> {
        self.days.iter()
    }
}
