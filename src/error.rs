use thiserror::Error;

pub type PadResult<T> = Result<T, PadError>;

#[derive(Error, Debug)]
pub enum PadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input bytes are not a parseable workbook, or the template file is missing.
    #[error("format error: {0}")]
    Format(String),

    /// A submitted row's keys do not match the target sheet's column set.
    #[error("column mismatch: {0}")]
    ColumnMismatch(String),

    /// The named sheet does not exist in the workbook.
    #[error("unknown sheet: {0}")]
    UnknownSheet(String),

    /// Export requested while every sheet is empty.
    #[error("nothing to export: every sheet is empty")]
    EmptyExport,

    /// Failure while serializing the output workbook.
    #[error("export error: {0}")]
    Export(String),
}
