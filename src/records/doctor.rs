//! Doctor accounts, as listed on the users screen

use crate::core::record::Record;
use crate::core::value::FieldValue;
use crate::records::ids::string_or_int;
use serde::{Deserialize, Serialize};

crate::define_columns! {
    /// Sortable and searchable columns of the doctors table
    pub enum DoctorColumn for "doctor" {
        Id => "id",
        Username => "username",
        Email => "email",
        Phone => "phone",
        Department => "department",
        PatientCount => "patientCount",
        /// Role label derived from `role_id`
        Role => "role_id",
    }
}

/// Permission level of a doctor account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Doctor,
    Unknown,
}

impl Role {
    /// Map a backend role id (1 = admin, 2 = doctor)
    pub fn from_id(role_id: Option<u32>) -> Self {
        match role_id {
            Some(1) => Role::Admin,
            Some(2) => Role::Doctor,
            _ => Role::Unknown,
        }
    }

    /// The backend role id, if this role has one
    pub fn id(&self) -> Option<u32> {
        match self {
            Role::Admin => Some(1),
            Role::Doctor => Some(2),
            Role::Unknown => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Doctor => "Doctor",
            Role::Unknown => "Unknown",
        }
    }
}

/// A doctor as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(deserialize_with = "string_or_int")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role_id: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    /// Number of patients attended, joined by the backend
    #[serde(default, rename = "patientCount")]
    pub patient_count: Option<u32>,
}

impl Doctor {
    pub fn role(&self) -> Role {
        Role::from_id(self.role_id)
    }
}

impl Record for Doctor {
    type Column = DoctorColumn;

    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self, column: DoctorColumn) -> FieldValue {
        match column {
            DoctorColumn::Id => FieldValue::numeric_id(Some(&self.id)),
            DoctorColumn::Username => FieldValue::from(self.username.as_str()),
            DoctorColumn::Email => FieldValue::from(self.email.as_str()),
            DoctorColumn::Phone => FieldValue::text(self.phone.as_deref()),
            DoctorColumn::Department => FieldValue::text(self.department.as_deref()),
            DoctorColumn::PatientCount => FieldValue::number(self.patient_count),
            DoctorColumn::Role => FieldValue::from(self.role().label()),
        }
    }

    fn searchable_columns() -> &'static [DoctorColumn] {
        &[
            DoctorColumn::Username,
            DoctorColumn::Email,
            DoctorColumn::Department,
        ]
    }
}
