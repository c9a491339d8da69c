use thiserror::Error;

/// Errors from opt-in form validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Strict update named a field the form was not built with
    #[error("unknown form field `{0}`")]
    UnknownField(String),

    /// A change handler received an event without a change payload
    #[error("event on `{target}` carries no field change")]
    NotAChange { target: String },
}
