//! Services module
//!
//! This module contains business logic and service implementations

pub mod billing;
pub mod projects;

pub use billing::{BillingAccountPatch, BillingService, InvoiceTotals};
pub use projects::{ProjectDetail, ProjectPatch, ProjectService};
