// src/linkedin/scoring.rs
use super::types::{ConnectionDegree, Employee};

/// Base score per degree plus a per-mutual-connection weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthFormula {
    pub first: u32,
    pub second: u32,
    pub third: u32,
    pub fallback: u32,
    pub per_mutual: u32,
}

impl StrengthFormula {
    /// Used with the faceted company search.
    pub const COMPANY_FACET: Self = Self {
        first: 100,
        second: 50,
        third: 10,
        fallback: 0,
        per_mutual: 5,
    };

    /// Used with the keyword search.
    pub const KEYWORDS: Self = Self {
        first: 100,
        second: 50,
        third: 10,
        fallback: 5,
        per_mutual: 2,
    };

    pub fn base(&self, degree: &ConnectionDegree) -> u32 {
        match degree {
            ConnectionDegree::First => self.first,
            ConnectionDegree::Second => self.second,
            ConnectionDegree::Third => self.third,
            ConnectionDegree::ThirdPlus | ConnectionDegree::Other(_) => self.fallback,
        }
    }

    pub fn score(&self, degree: &ConnectionDegree, mutual_connections: u32) -> u32 {
        self.base(degree)
            .saturating_add(self.per_mutual.saturating_mul(mutual_connections))
    }
}

/// Strongest connections first. Equal scores keep their fetch order.
pub fn prioritize(mut employees: Vec<Employee>) -> Vec<Employee> {
    employees.sort_by(|a, b| b.connection_strength.cmp(&a.connection_strength));
    employees
}
