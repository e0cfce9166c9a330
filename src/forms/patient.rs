//! Create/edit dialog for patients

use crate::core::error::{FieldValidationError, ValidationError};
use crate::forms::rules::FormRules;
use crate::forms::{filters, validators};
use crate::records::{Gender, Patient};
use serde::{Deserialize, Serialize};

const GENDERS: &[&str] = &["Male", "Female", "Other"];
const MAX_AGE: f64 = 150.0;

/// Raw input of the patient dialog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientForm {
    pub username: String,
    /// Age as typed; blank means unknown
    pub age: String,
    pub gender: Option<String>,
    pub case_id: String,
    /// `None` leaves the patient unassigned
    pub doctor_id: Option<String>,
    pub notes: String,
}

/// Validated body sent to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientPayload {
    pub username: String,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub case_id: String,
    pub doctor_id: Option<String>,
    pub notes: Option<String>,
}

impl PatientForm {
    /// Prefill the edit dialog from an existing patient
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            username: patient.username.clone(),
            age: patient.age.map(|a| a.to_string()).unwrap_or_default(),
            gender: patient.gender.map(|g| g.as_str().to_string()),
            case_id: patient.case_id.clone(),
            doctor_id: patient.doctor_id.clone(),
            notes: patient.notes.clone().unwrap_or_default(),
        }
    }

    pub fn rules() -> FormRules {
        let mut rules = FormRules::new("patient");

        rules.add_filter("username", filters::trim());
        rules.add_validator("username", validators::required("Name is required."));
        rules.add_validator(
            "username",
            validators::min_length(2, "Name must be at least 2 characters."),
        );

        rules.add_filter("age", filters::trim());
        rules.add_filter("age", filters::empty_to_null());
        rules.add_filter("age", filters::to_integer("Age must be a whole number."));
        rules.add_validator("age", validators::min_value(0.0, "Age cannot be negative."));
        rules.add_validator("age", validators::max_value(MAX_AGE, "Age must be 150 or less."));

        rules.add_filter("gender", filters::empty_to_null());
        rules.add_validator(
            "gender",
            validators::in_list(GENDERS, "Gender must be Male, Female or Other."),
        );

        rules.add_filter("case_id", filters::trim());
        rules.add_validator("case_id", validators::required("Case ID is required."));
        rules.add_validator(
            "case_id",
            validators::min_length(3, "Case ID/MRN must be at least 3 characters."),
        );

        rules.add_filter("doctor_id", filters::empty_to_null());
        rules.add_filter("notes", filters::empty_to_null());

        rules
    }

    /// Validate the dialog and build the request body
    pub fn submit(&self) -> Result<PatientPayload, ValidationError> {
        let raw = serde_json::to_value(self).map_err(|e| payload_error(e.to_string()))?;
        let filtered = Self::rules().validate_and_filter(raw)?;
        serde_json::from_value(filtered).map_err(|e| payload_error(e.to_string()))
    }
}

fn payload_error(message: String) -> ValidationError {
    ValidationError::FieldErrors(vec![FieldValidationError {
        field: "patient".to_string(),
        message,
    }])
}
