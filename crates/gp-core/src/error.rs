use thiserror::Error;

pub type GpResult<T> = Result<T, GpError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GpError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}
