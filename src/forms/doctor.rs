//! Create/edit dialog for doctor accounts

use crate::core::error::{FieldValidationError, ValidationError};
use crate::forms::rules::{FormRules, drop_null};
use crate::forms::{FormMode, filters, validators};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw input of the doctor dialog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctorForm {
    pub username: String,
    pub email: String,
    /// Blank on edit means "keep the current password"
    pub password: String,
    pub phone: String,
    pub department: String,
    pub role_id: Option<u32>,
    pub notes: String,
}

/// Validated body sent to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorPayload {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role_id: Option<u32>,
    pub notes: Option<String>,
}

impl DoctorForm {
    /// Prefill the edit dialog from an existing doctor
    pub fn from_doctor(doctor: &crate::records::Doctor) -> Self {
        Self {
            username: doctor.username.clone(),
            email: doctor.email.clone(),
            password: String::new(),
            phone: doctor.phone.clone().unwrap_or_default(),
            department: doctor.department.clone().unwrap_or_default(),
            role_id: doctor.role_id,
            notes: doctor.notes.clone().unwrap_or_default(),
        }
    }

    pub fn rules(mode: FormMode) -> FormRules {
        let mut rules = FormRules::new("doctor");

        rules.add_filter("username", filters::trim());
        rules.add_validator("username", validators::required("Username is required."));
        rules.add_validator(
            "username",
            validators::min_length(2, "Username must be at least 2 characters."),
        );

        rules.add_filter("email", filters::trim());
        rules.add_validator("email", validators::required("Email is required."));
        rules.add_validator("email", validators::email("Invalid email address."));

        rules.add_filter("password", filters::empty_to_null());
        match mode {
            FormMode::Create => {
                rules.add_validator(
                    "password",
                    validators::required("Password must be at least 6 characters."),
                );
                rules.add_validator(
                    "password",
                    validators::min_length(6, "Password must be at least 6 characters."),
                );
            }
            FormMode::Edit => {
                rules.add_validator(
                    "password",
                    validators::min_length(6, "New password must be at least 6 characters."),
                );
            }
        }

        for field in ["phone", "department", "notes"] {
            rules.add_filter(field, filters::empty_to_null());
        }

        rules
    }

    /// Validate the dialog and build the request body
    pub fn submit(&self, mode: FormMode) -> Result<DoctorPayload, ValidationError> {
        let raw = serde_json::to_value(self).map_err(|e| payload_error(e.to_string()))?;
        let filtered = Self::rules(mode).validate_and_filter(raw)?;

        let mut object = match filtered {
            Value::Object(map) => map,
            _ => return Err(payload_error("expected an object".to_string())),
        };
        drop_null(&mut object, "password");

        serde_json::from_value(Value::Object(object)).map_err(|e| payload_error(e.to_string()))
    }
}

fn payload_error(message: String) -> ValidationError {
    ValidationError::FieldErrors(vec![FieldValidationError {
        field: "doctor".to_string(),
        message,
    }])
}
