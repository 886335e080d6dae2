use crate::consolidate::consolidate;
use crate::error::ValidationError;
use crate::extract::{extract_layout, read_metadata};
use crate::layout::Layout;
use crate::model::{ErrorBlock, Findings, Outcome};
use crate::sheet::Sheet;
use crate::validate::check_layout;

/// Validate `sheet` and consolidate its findings into blocks.
pub fn validate(sheet: &Sheet) -> Result<Vec<ErrorBlock>, ValidationError> {
    let layout = Layout::new(sheet)?;
    Ok(consolidate(&check_layout(&layout)))
}

/// Run a full validation: findings when any cell is rejected, otherwise the
/// extracted records. Structural failures abort with no partial result.
pub fn run(sheet: &Sheet) -> Result<Outcome, ValidationError> {
    let layout = Layout::new(sheet)?;
    let errors = check_layout(&layout);

    if errors.is_empty() {
        return Ok(Outcome::Clean(extract_layout(&layout)));
    }

    Ok(Outcome::Findings(Findings {
        short_name: read_metadata(&layout).short_name,
        cell_errors: errors.len(),
        blocks: consolidate(&errors),
    }))
}
