use thiserror::Error;

/// Defines the errors reported by the soil column models
///
/// All errors fail fast at the point of detection; nothing is retried
/// internally.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SiteError {
    /// An input or a lookup request is inconsistent with the column state
    #[error("invalid configuration: {0}")]
    Configuration(&'static str),

    /// A named model or operation is not available
    #[error("unsupported model: {0}")]
    UnsupportedModel(&'static str),

    /// A value is degenerate and would propagate NaN through the column
    #[error("degenerate value: {0}")]
    DegenerateValue(&'static str),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
