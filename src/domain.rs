//! Domain models for vacancy management.
//!
//! This module contains the validated [`Vacancy`] entity and the tool's
//! configuration.

/// The vacancy entity, its validation and its ordering.
pub mod vacancy;
pub use vacancy::{SalaryBound, ValidationError, Vacancy};

mod config;
pub use config::Config;
