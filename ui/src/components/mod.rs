//! Reusable UI components

pub mod alert;
pub mod loading;
pub mod text_field;

pub use alert::{Alert, MessageAlert, Severity};
pub use loading::{LoadingOverlay, LoadingSpinner};
pub use text_field::CredentialField;
