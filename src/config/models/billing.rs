//! Billing configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Billing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Tax rate applied when computing invoice totals (0.10 = 10%)
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
        }
    }
}

impl BillingConfig {
    /// Merge billing configurations
    pub fn merge(mut self, other: Self) -> Self {
        if (other.tax_rate - default_tax_rate()).abs() > f64::EPSILON {
            self.tax_rate = other.tax_rate;
        }
        self
    }

    /// Validate billing configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(format!(
                "Tax rate must be between 0.0 and 1.0, got {}",
                self.tax_rate
            ));
        }
        Ok(())
    }
}
