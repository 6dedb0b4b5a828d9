//! Domain models for the report engine.

mod fields;
mod report;

pub use fields::*;
pub use report::*;
