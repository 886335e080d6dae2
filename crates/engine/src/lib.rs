//! `sipot-engine` - SIPOT template validation engine.
//!
//! Pure engine crate: receives an already-loaded sheet, returns either the
//! consolidated cell findings or the extracted records. No CLI or IO
//! dependencies.

pub mod cell;
pub mod consolidate;
pub mod coord;
pub mod dates;
pub mod engine;
pub mod error;
pub mod extract;
pub mod layout;
pub mod model;
pub mod rules;
pub mod sheet;
pub mod validate;

#[cfg(test)]
pub mod harness;

pub use cell::CellValue;
pub use consolidate::consolidate;
pub use coord::{to_label, CellRef};
pub use engine::{run, validate};
pub use error::ValidationError;
pub use extract::extract;
pub use model::{CellError, ErrorBlock, Extraction, Findings, Outcome, Record};
pub use rules::Rule;
pub use sheet::Sheet;
pub use validate::validate_cells;
