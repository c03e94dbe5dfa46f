/// Error types for the pricing comparison.
/// The pricing functions themselves never fail; errors only come from
/// configuration, input validation in the driver, and report rendering.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid input: {field} = {value}")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("non-finite result: {0}")]
    NonFinite(String),

    #[error("report error: {0}")]
    Report(String),
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::Report(e.to_string())
    }
}

pub type PricingResult<T> = Result<T, PricingError>;
