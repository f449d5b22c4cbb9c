use error_info::ErrorInfo;
use http::StatusCode;

use super::OrganisationRole;

/// Authentication and authorization related errors
#[derive(Debug, ErrorInfo)]
#[allow(clippy::enum_variant_names)]
pub enum AuthErrorCode {
    #[error(status = StatusCode::UNAUTHORIZED, message = "Missing authentication")]
    AuthMissing,
    #[error(status = StatusCode::FORBIDDEN, message = "The user is not a member of the organisation")]
    AuthNotMember,
    #[error(status = StatusCode::FORBIDDEN, message = "The action requires the {required} role")]
    AuthInsufficientRole { required: OrganisationRole },
}
