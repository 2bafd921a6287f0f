//! Shared error type across idgov crates.

use thiserror::Error;

/// Stable error codes (used by test vectors and CLI output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Membership list was empty.
    EmptyMembership,
    /// Enforcement name or code not recognised.
    InvalidEnforcement,
    /// Parameter type name not recognised.
    InvalidParameterType,
    /// Parameter values do not fit the parameter type.
    InvalidParameterValues,
    /// Wire parameter arrays are inconsistent.
    MalformedParameter,
    /// Scope code not recognised.
    InvalidScope,
    /// Policy has no service-assigned identifier yet.
    MissingIdentifier,
    /// A collaborator could not resolve a reference.
    UnresolvedReference,
    /// Lookup returned nothing.
    NotFound,
    /// Lookup returned more than one result.
    Ambiguous,
    /// Invalid input document / config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in vectors and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyMembership => "EMPTY_MEMBERSHIP",
            ErrorCode::InvalidEnforcement => "INVALID_ENFORCEMENT",
            ErrorCode::InvalidParameterType => "INVALID_PARAMETER_TYPE",
            ErrorCode::InvalidParameterValues => "INVALID_PARAMETER_VALUES",
            ErrorCode::MalformedParameter => "MALFORMED_PARAMETER",
            ErrorCode::InvalidScope => "INVALID_SCOPE",
            ErrorCode::MissingIdentifier => "MISSING_IDENTIFIER",
            ErrorCode::UnresolvedReference => "UNRESOLVED_REFERENCE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Ambiguous => "AMBIGUOUS",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, IdGovError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum IdGovError {
    #[error("a provisioning policy must have at least one member")]
    EmptyMembership,
    #[error("invalid enforcement: {0}")]
    InvalidEnforcement(String),
    #[error("invalid enforcement code: {0}")]
    InvalidEnforcementCode(i32),
    #[error("invalid parameter type: {0}")]
    InvalidParameterType(String),
    #[error("invalid parameter values: {0}")]
    InvalidParameterValues(String),
    #[error("malformed wire parameter: {0}")]
    MalformedParameter(String),
    #[error("invalid scope: {0}")]
    InvalidScope(i64),
    #[error("policy has no identifier (itimDN)")]
    MissingIdentifier,
    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("ambiguous: {0}")]
    Ambiguous(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl IdGovError {
    /// Map error to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            IdGovError::EmptyMembership => ErrorCode::EmptyMembership,
            IdGovError::InvalidEnforcement(_) | IdGovError::InvalidEnforcementCode(_) => {
                ErrorCode::InvalidEnforcement
            }
            IdGovError::InvalidParameterType(_) => ErrorCode::InvalidParameterType,
            IdGovError::InvalidParameterValues(_) => ErrorCode::InvalidParameterValues,
            IdGovError::MalformedParameter(_) => ErrorCode::MalformedParameter,
            IdGovError::InvalidScope(_) => ErrorCode::InvalidScope,
            IdGovError::MissingIdentifier => ErrorCode::MissingIdentifier,
            IdGovError::UnresolvedReference(_) => ErrorCode::UnresolvedReference,
            IdGovError::NotFound(_) => ErrorCode::NotFound,
            IdGovError::Ambiguous(_) => ErrorCode::Ambiguous,
            IdGovError::BadRequest(_) => ErrorCode::BadRequest,
            IdGovError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            IdGovError::Internal(_) => ErrorCode::Internal,
        }
    }
}
