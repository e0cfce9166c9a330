//! Validation and filtering of the create/edit dialogs
//!
//! Each dialog converts its raw input to a JSON object, runs it through a
//! [`FormRules`] set (filters first, then validators) and deserializes the
//! result into the payload sent to the backend.

pub mod doctor;
pub mod filters;
pub mod patient;
pub mod rules;
pub mod validators;

pub use doctor::{DoctorForm, DoctorPayload};
pub use patient::{PatientForm, PatientPayload};
pub use rules::FormRules;

/// Whether a dialog creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}
