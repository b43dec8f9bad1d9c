//! invigil-core — exam model, timed session engine, and scoring.
//!
//! This crate defines the data model, the session state machine, and the
//! boundary traits that the rest of invigil builds on.

pub mod answer;
pub mod error;
pub mod exam;
pub mod question;
pub mod report;
pub mod score;
pub mod session;
pub mod subject;
pub mod traits;
