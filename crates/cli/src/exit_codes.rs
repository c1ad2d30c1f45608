//! CLI Exit Code Registry
//!
//! Single source of truth for `twinmap` exit codes. Batch wrappers rely on
//! them to tell a missing input apart from a broken one.
//!
//! # Exit Code Ranges
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success, both outputs written                       |
//! | 1    | General error (unspecified)                         |
//! | 2    | CLI usage error (bad args)                          |
//! | 3    | Input file missing or unreadable                    |
//! | 4    | Input file malformed (columns, row shape, encoding) |
//! | 5    | Config file unreadable or invalid                   |
//! | 6    | Output could not be written                         |
//!
//! Codes 3-5 abort before any output file is touched.

use twinmap_linkage::LinkageError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments. Also what clap exits with.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Run (3-6)
// =============================================================================

/// Roster or registry file does not exist or cannot be read.
pub const EXIT_INPUT_MISSING: u8 = 3;

/// Roster or registry file is not valid UTF-8 CSV with the required columns.
pub const EXIT_INPUT_MALFORMED: u8 = 4;

/// `--config` file cannot be read, parsed, or validated.
pub const EXIT_CONFIG_INVALID: u8 = 5;

/// Processed directory or an output file cannot be written.
pub const EXIT_OUTPUT_WRITE: u8 = 6;

/// Map an engine error to its exit code.
pub fn linkage_exit_code(err: &LinkageError) -> u8 {
    match err {
        LinkageError::ConfigParse(_) | LinkageError::ConfigValidation(_) => EXIT_CONFIG_INVALID,
        e if e.is_input_error() => EXIT_INPUT_MALFORMED,
        LinkageError::Csv { .. } => EXIT_OUTPUT_WRITE,
        _ => EXIT_ERROR,
    }
}
