//! Error taxonomy shared by every pharmacy operation.
use crate::order::RequestStatus;
use crate::validation::FieldErrors;
use thiserror::Error;

/// Failures surfaced to the storefront.
///
/// Validation failures are shown inline per field; the rest are blocking
/// notices. None of them are fatal.
#[derive(Debug, Error)]
pub enum PharmacyError {
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),
    #[error("Please login first")]
    NotLoggedIn,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Please enter a 6-digit code")]
    OtpTooShort,
    #[error("Invalid verification code")]
    OtpMismatch,
    #[error("no signup is awaiting verification")]
    NoPendingSignup,
    #[error("Resend is available in {remaining_secs}s")]
    ResendTooEarly { remaining_secs: u32 },
    #[error("Please upload only image (JPG, PNG) or PDF files (got {mime})")]
    FileType { mime: String },
    #[error("File size must be less than 5MB (got {size} bytes)")]
    FileTooLarge { size: u64 },
    #[error("Invalid credentials or account not activated")]
    InvalidCredentials,
    #[error("Please enter a valid price")]
    InvalidPrice,
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PharmacyError {
    /// Wrap a backend storage failure.
    pub fn storage(err: impl std::error::Error) -> Self {
        Self::Storage(err.to_string())
    }

    /// Translation key for the user-facing notice.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::Validation(_) => "errors.validation",
            Self::NotLoggedIn => "errors.login_required",
            Self::EmptyCart => "errors.cart_empty",
            Self::OtpTooShort => "errors.otp_length",
            Self::OtpMismatch => "errors.otp_invalid",
            Self::NoPendingSignup => "errors.no_pending_signup",
            Self::ResendTooEarly { .. } => "errors.resend_wait",
            Self::FileType { .. } => "errors.file_type",
            Self::FileTooLarge { .. } => "errors.file_size",
            Self::InvalidCredentials => "errors.invalid_credentials",
            Self::InvalidPrice => "errors.invalid_price",
            Self::InvalidTransition { .. } => "errors.invalid_transition",
            Self::NotFound { .. } => "errors.not_found",
            Self::Storage(_) | Self::Serialization(_) => "errors.storage",
        }
    }

    /// Per-field errors when this is a validation failure.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}
