use std::fmt;

use crate::model::Table;

#[derive(Debug)]
pub enum LinkageError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty file name, colliding outputs, etc.).
    ConfigValidation(String),
    /// Required column absent from an input header.
    MissingColumn { table: Table, column: String },
    /// Data row whose field count differs from the header's.
    RaggedRow { table: Table, row: usize, expected: u64, found: u64 },
    /// Twin identifier cell is empty.
    EmptyIdentifier { row: usize, column: String },
    /// CSV read/write error not covered above.
    Csv { table: Table, message: String },
}

impl fmt::Display for LinkageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { table, column } => {
                write!(f, "{table}: missing column '{column}'")
            }
            Self::RaggedRow { table, row, expected, found } => {
                write!(f, "{table}, row {row}: expected {expected} fields, found {found}")
            }
            Self::EmptyIdentifier { row, column } => {
                write!(f, "paper roster, row {row}: empty identifier in column '{column}'")
            }
            Self::Csv { table, message } => write!(f, "{table}: CSV error: {message}"),
        }
    }
}

impl std::error::Error for LinkageError {}

impl LinkageError {
    /// True for errors caused by the shape or content of an input table.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::MissingColumn { .. } | Self::RaggedRow { .. } | Self::EmptyIdentifier { .. } => true,
            Self::Csv { table, .. } => table.is_input(),
            Self::ConfigParse(_) | Self::ConfigValidation(_) => false,
        }
    }
}
