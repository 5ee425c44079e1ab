use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Animation,
    Cg,
    Compositing,
    Fx,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Animation,
        Department::Cg,
        Department::Compositing,
        Department::Fx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Animation => "animation",
            Department::Cg => "cg",
            Department::Compositing => "compositing",
            Department::Fx => "fx",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Department {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "animation" | "anim" => Ok(Department::Animation),
            "cg" => Ok(Department::Cg),
            "compositing" | "comp" => Ok(Department::Compositing),
            "fx" => Ok(Department::Fx),
            other => Err(format!("unsupported department: {other}")),
        }
    }
}

/// One figure per department. Used for effort budgets, daily buckets and monthly averages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentValues {
    #[serde(default)]
    pub animation: f64,
    #[serde(default)]
    pub cg: f64,
    #[serde(default)]
    pub compositing: f64,
    #[serde(default)]
    pub fx: f64,
}

impl DepartmentValues {
    pub fn get(&self, department: Department) -> f64 {
        match department {
            Department::Animation => self.animation,
            Department::Cg => self.cg,
            Department::Compositing => self.compositing,
            Department::Fx => self.fx,
        }
    }

    pub fn get_mut(&mut self, department: Department) -> &mut f64 {
        match department {
            Department::Animation => &mut self.animation,
            Department::Cg => &mut self.cg,
            Department::Compositing => &mut self.compositing,
            Department::Fx => &mut self.fx,
        }
    }

    pub fn add(&mut self, department: Department, value: f64) {
        *self.get_mut(department) += value;
    }

    pub fn merge(&mut self, other: &DepartmentValues) {
        for department in Department::ALL {
            self.add(department, other.get(department));
        }
    }

    pub fn map(&self, mut f: impl FnMut(Department, f64) -> f64) -> DepartmentValues {
        let mut out = DepartmentValues::default();
        for department in Department::ALL {
            *out.get_mut(department) = f(department, self.get(department));
        }
        out
    }
}

/// Per-department maxima over a produced monthly series.
pub type Peaks = DepartmentValues;
