//! ponto - Punch-clock reconciliation
//!
//! Matches raw punch-clock lines from several terminals against an employee
//! roster, keeps one attendance event per employee per day, and writes daily
//! reports grouped by section plus rolling multi-month retention exports.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::PontoError;
