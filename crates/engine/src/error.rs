use thiserror::Error;

/// Structural failure of a validation run. Cell-level findings are never
/// reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The loaded sheet has no non-blank row.
    #[error("sheet '{sheet}' is empty")]
    EmptySheet { sheet: String },
}
