// Reports module - reshaping of the compounded series for output

pub mod frequency;
pub mod summary;

pub use frequency::Frequency;
pub use summary::{reshape, SummaryRow};
