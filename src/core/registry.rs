//! Ordered set of registered checks.
//!
//! Registration order defines report order only; scoring is order-independent.
//! The registry refuses to exist unless its weights sum to exactly 100, so the
//! composite score is always a percentage.

use crate::core::check::Check;
use crate::core::error::GateError;
use std::collections::HashSet;
use std::sync::Arc;

/// Sum every registry's weights must reach.
pub const TOTAL_WEIGHT: u32 = 100;

#[derive(Clone)]
pub struct RegisteredCheck {
    pub check: Arc<dyn Check>,
    pub weight: u32,
}

impl RegisteredCheck {
    pub fn new(check: Arc<dyn Check>, weight: u32) -> Self {
        Self { check, weight }
    }
}

impl std::fmt::Debug for RegisteredCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredCheck")
            .field("id", &self.check.id())
            .field("weight", &self.weight)
            .field("fixable", &self.check.fixable())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CheckRegistry {
    checks: Vec<RegisteredCheck>,
}

impl CheckRegistry {
    pub fn new(checks: Vec<RegisteredCheck>) -> Result<Self, GateError> {
        let mut seen = HashSet::new();
        for entry in &checks {
            if !seen.insert(entry.check.id()) {
                return Err(GateError::Registry(format!(
                    "duplicate check id '{}'",
                    entry.check.id()
                )));
            }
        }

        let total: u32 = checks.iter().map(|c| c.weight).sum();
        if total != TOTAL_WEIGHT {
            return Err(GateError::Registry(format!(
                "check weights sum to {}, expected {}",
                total, TOTAL_WEIGHT
            )));
        }

        Ok(Self { checks })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCheck> {
        self.checks.iter()
    }

    pub fn entries(&self) -> &[RegisteredCheck] {
        &self.checks
    }

    pub fn get(&self, id: &str) -> Option<&RegisteredCheck> {
        self.checks.iter().find(|c| c.check.id() == id)
    }
}
