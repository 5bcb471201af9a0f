//! Selic - compound interest over the Brazilian Selic daily rate
//!
//! This library fetches the daily Selic series from the Banco Central do
//! Brasil, compounds a capital amount over it, finds the best fixed-length
//! investment window, and reshapes the result to daily, monthly or yearly
//! snapshots.

pub mod calculator;
pub mod compound;
pub mod config;
pub mod error;
pub mod export;
pub mod reports;
pub mod series;
pub mod sources;
pub mod utils;
pub mod validation;
pub mod window;

pub use calculator::{calc_amount, run_example, CalcOptions, CalcRequest, Calculation};
pub use error::CalcError;
pub use reports::Frequency;
