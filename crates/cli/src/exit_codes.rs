//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Every file validated clean                                |
//! | 1    | At least one file has cell findings                       |
//! | 2    | CLI usage error (bad args, unreadable `--config`)         |
//! | 3    | A file could not be loaded or has no usable sheet         |
//! | 4    | A result document or acuse could not be written           |
//!
//! With several input files the most severe code wins:
//! 4 over 3 over 1 over 0.
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `severity` and the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - every file passed validation.
pub const EXIT_SUCCESS: u8 = 0;

/// Validation finished and found rejected cells.
/// Like `diff(1)`, exit 1 means "the input needs fixing", not "the tool broke".
pub const EXIT_FINDINGS: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Run failures (3-4)
// =============================================================================

/// Input unreadable, unsupported format, or empty sheet.
pub const EXIT_LOAD: u8 = 3;

/// Success document or acuse could not be written.
pub const EXIT_OUTPUT: u8 = 4;

/// Rank used to combine per-file codes; higher is more severe.
pub fn severity(code: u8) -> u8 {
    match code {
        EXIT_SUCCESS => 0,
        EXIT_FINDINGS => 1,
        EXIT_USAGE => 2,
        EXIT_LOAD => 3,
        EXIT_OUTPUT => 4,
        _ => u8::MAX,
    }
}

/// Combine per-file exit codes into the process exit code.
pub fn combine(codes: impl IntoIterator<Item = u8>) -> u8 {
    codes
        .into_iter()
        .max_by_key(|&code| severity(code))
        .unwrap_or(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_picks_most_severe() {
        assert_eq!(combine([]), EXIT_SUCCESS);
        assert_eq!(combine([EXIT_SUCCESS, EXIT_FINDINGS]), EXIT_FINDINGS);
        assert_eq!(combine([EXIT_FINDINGS, EXIT_LOAD, EXIT_SUCCESS]), EXIT_LOAD);
        assert_eq!(combine([EXIT_OUTPUT, EXIT_LOAD]), EXIT_OUTPUT);
    }
}
