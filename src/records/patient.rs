//! Patients, as listed on the users screen

use crate::core::record::Record;
use crate::core::value::FieldValue;
use crate::records::ids::{opt_string_or_int, string_or_int};
use serde::{Deserialize, Serialize};

crate::define_columns! {
    /// Sortable and searchable columns of the patients table
    pub enum PatientColumn for "patient" {
        Id => "id",
        Username => "username",
        Age => "age",
        Gender => "gender",
        CaseId => "case_id",
        DoctorId => "doctor_id",
        AttendingDoctorName => "attendingDoctorName",
        VideoCount => "videoCount",
        AnalysisCount => "analysisCount",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

/// A patient as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(deserialize_with = "string_or_int")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Case id / medical record number
    pub case_id: String,
    #[serde(default, deserialize_with = "opt_string_or_int")]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default, rename = "attendingDoctorName")]
    pub attending_doctor_name: Option<String>,
    #[serde(default, rename = "videoCount")]
    pub video_count: Option<u32>,
    #[serde(default, rename = "analysisCount")]
    pub analysis_count: Option<u32>,
}

impl Record for Patient {
    type Column = PatientColumn;

    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self, column: PatientColumn) -> FieldValue {
        match column {
            PatientColumn::Id => FieldValue::numeric_id(Some(&self.id)),
            PatientColumn::Username => FieldValue::from(self.username.as_str()),
            PatientColumn::Age => FieldValue::number(self.age),
            PatientColumn::Gender => FieldValue::text(self.gender.as_ref().map(Gender::as_str)),
            PatientColumn::CaseId => FieldValue::from(self.case_id.as_str()),
            PatientColumn::DoctorId => FieldValue::text(self.doctor_id.as_deref()),
            PatientColumn::AttendingDoctorName => {
                FieldValue::text(self.attending_doctor_name.as_deref())
            }
            PatientColumn::VideoCount => FieldValue::number(self.video_count),
            PatientColumn::AnalysisCount => FieldValue::number(self.analysis_count),
        }
    }

    fn searchable_columns() -> &'static [PatientColumn] {
        &[
            PatientColumn::Username,
            PatientColumn::CaseId,
            PatientColumn::AttendingDoctorName,
        ]
    }

    fn param_filters() -> &'static [(&'static str, PatientColumn)] {
        &[
            ("doctorId", PatientColumn::DoctorId),
            ("patientId", PatientColumn::Id),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_joined_fields() {
        // Patient dict as listed by the backend, with the joined columns
        let patient: Patient = serde_json::from_value(serde_json::json!({
            "id": 17,
            "username": "Jane Roe",
            "age": 34,
            "gender": "Female",
            "case_id": "MRN-0017",
            "doctor_id": 3,
            "create_time": "2024-05-01 09:30:00",
            "update_time": "2024-05-01 09:30:00",
            "attendingDoctorName": "dr_house",
            "videoCount": 2,
            "analysisCount": 0
        }))
        .expect("deserialize");
        assert_eq!(patient.id, "17");
        assert_eq!(patient.doctor_id.as_deref(), Some("3"));
        assert_eq!(patient.gender, Some(Gender::Female));
        assert_eq!(patient.video_count, Some(2));
        assert_eq!(patient.analysis_count, Some(0));
        assert!(patient.value(PatientColumn::DoctorId).matches_exact("3"));
    }

    #[test]
    fn test_unassigned_doctor_defaults_to_na() {
        let patient: Patient = serde_json::from_value(serde_json::json!({
            "id": 4,
            "username": "Bo Park",
            "age": 61,
            "gender": "Male",
            "case_id": "MRN-0004",
            "doctor_id": null,
            "attendingDoctorName": "N/A",
            "videoCount": 0,
            "analysisCount": 0
        }))
        .expect("deserialize");
        assert!(patient.doctor_id.is_none());
        assert_eq!(
            patient.value(PatientColumn::AttendingDoctorName),
            FieldValue::from("N/A")
        );
    }

    #[test]
    fn test_unassigned_patient_has_null_doctor() {
        let patient: Patient = serde_json::from_value(serde_json::json!({
            "id": "1",
            "username": "x",
            "case_id": "abc",
            "doctor_id": null
        }))
        .expect("deserialize");
        assert!(patient.value(PatientColumn::DoctorId).is_null());
        assert!(patient.value(PatientColumn::Gender).is_null());
        assert!(!patient.value(PatientColumn::DoctorId).matches_exact("3"));
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("Other"), Some(Gender::Other));
        assert_eq!(Gender::parse("other"), None);
    }
}
