//! Analysis jobs run on uploaded videos

use crate::core::record::Record;
use crate::core::value::FieldValue;
use crate::records::ids::{opt_string_or_int, string_or_int};
use crate::records::video::file_name;
use serde::{Deserialize, Serialize};

crate::define_columns! {
    /// Sortable and searchable columns of the analyses table
    pub enum AnalysisColumn for "analysis" {
        /// Job id, compared numerically
        Id => "id",
        ParentId => "parent_id",
        PatientId => "patient_id",
        PatientUsername => "patient_username",
        /// File name of the analysed video
        Video => "video",
        VideoId => "video_id",
        Status => "status",
        Progress => "progress",
        CreateTime => "create_time",
    }
}

/// Coarse classification of the backend's free-form status text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Completed,
    Running,
    Failed,
    Waiting,
    Other,
}

impl StatusKind {
    pub fn classify(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "completed" | "finished" => StatusKind::Completed,
            "running" | "processing" => StatusKind::Running,
            "failed" | "error" => StatusKind::Failed,
            "waiting" => StatusKind::Waiting,
            _ => StatusKind::Other,
        }
    }

    /// Whether the job can still change state
    pub fn is_active(&self) -> bool {
        matches!(self, StatusKind::Running | StatusKind::Waiting)
    }
}

/// An analysis job as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(deserialize_with = "string_or_int")]
    pub id: String,
    /// Job this one was re-run from
    #[serde(default, deserialize_with = "opt_string_or_int")]
    pub parent_id: Option<String>,
    #[serde(deserialize_with = "string_or_int")]
    pub video_id: String,
    #[serde(default)]
    pub original_video_path: Option<String>,
    #[serde(deserialize_with = "string_or_int")]
    pub patient_id: String,
    #[serde(default)]
    pub patient_username: Option<String>,
    pub status: String,
    /// Progress as reported by the pipeline (e.g. `"45%"`)
    #[serde(default)]
    pub progress: Option<String>,
    pub create_time: String,
    pub update_time: String,
}

impl Analysis {
    pub fn status_kind(&self) -> StatusKind {
        StatusKind::classify(&self.status)
    }

    /// File name of the analysed video, if the backend joined its path
    pub fn video_filename(&self) -> Option<&str> {
        self.original_video_path.as_deref().and_then(file_name)
    }
}

impl Record for Analysis {
    type Column = AnalysisColumn;

    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self, column: AnalysisColumn) -> FieldValue {
        match column {
            AnalysisColumn::Id => FieldValue::numeric_id(Some(&self.id)),
            AnalysisColumn::ParentId => FieldValue::text(self.parent_id.as_deref()),
            AnalysisColumn::PatientId => FieldValue::from(self.patient_id.as_str()),
            AnalysisColumn::PatientUsername => FieldValue::text(self.patient_username.as_deref()),
            AnalysisColumn::Video => FieldValue::text(self.video_filename()),
            AnalysisColumn::VideoId => FieldValue::from(self.video_id.as_str()),
            AnalysisColumn::Status => FieldValue::from(self.status.as_str()),
            AnalysisColumn::Progress => FieldValue::text(self.progress.as_deref()),
            AnalysisColumn::CreateTime => FieldValue::from(self.create_time.as_str()),
        }
    }

    fn searchable_columns() -> &'static [AnalysisColumn] {
        &[
            AnalysisColumn::Id,
            AnalysisColumn::PatientUsername,
            AnalysisColumn::Status,
            AnalysisColumn::Progress,
            AnalysisColumn::Video,
        ]
    }

    fn param_filters() -> &'static [(&'static str, AnalysisColumn)] {
        &[
            ("patientId", AnalysisColumn::PatientId),
            ("videoId", AnalysisColumn::VideoId),
            ("parentId", AnalysisColumn::ParentId),
            ("analysisId", AnalysisColumn::Id),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(id: &str, status: &str) -> Analysis {
        Analysis {
            id: id.to_string(),
            parent_id: None,
            video_id: "12".to_string(),
            original_video_path: Some("/uploads/5/knee_flex.mp4".to_string()),
            patient_id: "5".to_string(),
            patient_username: Some("Jane".to_string()),
            status: status.to_string(),
            progress: Some("100%".to_string()),
            create_time: "2024-05-02".to_string(),
            update_time: "2024-05-02".to_string(),
        }
    }

    #[test]
    fn test_status_kind_is_case_insensitive() {
        assert_eq!(analysis("1", "Completed").status_kind(), StatusKind::Completed);
        assert_eq!(analysis("1", "FINISHED").status_kind(), StatusKind::Completed);
        assert_eq!(analysis("1", "processing").status_kind(), StatusKind::Running);
        assert_eq!(analysis("1", "Error").status_kind(), StatusKind::Failed);
        assert_eq!(analysis("1", "waiting").status_kind(), StatusKind::Waiting);
        assert_eq!(analysis("1", "queued").status_kind(), StatusKind::Other);
        assert!(StatusKind::Waiting.is_active());
        assert!(!StatusKind::Failed.is_active());
    }

    #[test]
    fn test_video_column_is_filename() {
        let a = analysis("1", "completed");
        assert_eq!(a.value(AnalysisColumn::Video), FieldValue::from("knee_flex.mp4"));
        assert_eq!(a.value(AnalysisColumn::VideoId), FieldValue::from("12"));

        let mut missing = a.clone();
        missing.original_video_path = None;
        assert!(missing.value(AnalysisColumn::Video).is_null());
    }

    #[test]
    fn test_id_is_numeric() {
        assert_eq!(analysis("10", "x").value(AnalysisColumn::Id), FieldValue::Number(10.0));
        assert!(analysis("abc", "x").value(AnalysisColumn::Id).is_null());
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let a: Analysis = serde_json::from_value(serde_json::json!({
            "id": 3,
            "parent_id": 1,
            "video_id": 12,
            "original_video_path": "/data/uploads/5/knee_flex.mp4",
            "patient_id": 5,
            "patient_username": "Jane",
            "status": "processing",
            "progress": "45%",
            "create_time": "2024-05-02 08:00:00",
            "update_time": "2024-05-02 08:10:00"
        }))
        .expect("deserialize");
        assert_eq!(a.id, "3");
        assert_eq!(a.parent_id.as_deref(), Some("1"));
        assert_eq!(a.video_id, "12");
        assert_eq!(a.patient_id, "5");
        assert_eq!(a.video_filename(), Some("knee_flex.mp4"));
        assert_eq!(a.value(AnalysisColumn::Id), FieldValue::Number(3.0));
        assert!(a.value(AnalysisColumn::VideoId).matches_exact("12"));
    }

    #[test]
    fn test_backend_placeholders() {
        let a: Analysis = serde_json::from_value(serde_json::json!({
            "id": 9,
            "parent_id": null,
            "video_id": 2,
            "original_video_path": "N/A",
            "patient_id": 1,
            "patient_username": "N/A",
            "status": "waiting",
            "progress": "0%",
            "create_time": "2024-06-01 00:00:00",
            "update_time": "2024-06-01 00:00:00"
        }))
        .expect("deserialize");
        assert!(a.parent_id.is_none());
        assert_eq!(a.video_filename(), Some("N/A"));
        assert!(a.status_kind().is_active());
    }

    #[test]
    fn test_deserialize_minimal() {
        let a: Analysis = serde_json::from_value(serde_json::json!({
            "id": "4",
            "video_id": "2",
            "patient_id": "1",
            "status": "running",
            "create_time": "2024-01-01",
            "update_time": "2024-01-01"
        }))
        .expect("deserialize");
        assert!(a.parent_id.is_none());
        assert!(a.video_filename().is_none());
        assert_eq!(a.status_kind(), StatusKind::Running);
    }
}
