use error_info::ErrorInfo;
use http::StatusCode;

/// Error codes when using pagination
#[derive(Debug, ErrorInfo)]
#[allow(clippy::enum_variant_names)]
pub enum PaginationErrorCode {
    #[error(status = StatusCode::BAD_REQUEST, message = "The \"{field}\" parameter must be a non-negative number")]
    PageNegativeInput { field: &'static str },
    #[error(status = StatusCode::BAD_REQUEST, message = "The \"{field}\" parameter can't exceed {max}")]
    PageExceedsLimit { field: &'static str, max: u64 },
    #[error(status = StatusCode::BAD_REQUEST, message = "The provided cursor is not recognized")]
    PageInvalidCursor,
}
