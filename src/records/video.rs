//! Uploaded videos

use crate::core::record::Record;
use crate::core::value::FieldValue;
use crate::records::ids::{opt_string_or_int, string_or_int};
use serde::{Deserialize, Serialize};

crate::define_columns! {
    /// Sortable and searchable columns of the videos table
    pub enum VideoColumn for "video" {
        Id => "id",
        VideoPath => "video_path",
        /// Last segment of `video_path`
        Filename => "filename",
        PatientId => "patient_id",
        PatientUsername => "patient_username",
        CreateTime => "create_time",
        /// Derived from the original/inference flags
        VideoType => "video_type",
        /// Analysis id, compared numerically
        ActionId => "action_id",
    }
}

/// Whether a video is an upload or the output of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoKind {
    Original,
    Inference,
    Unknown,
}

impl VideoKind {
    /// Label shown in the table ("Analysis" for inference output)
    pub fn label(&self) -> &'static str {
        match self {
            VideoKind::Original => "Original",
            VideoKind::Inference => "Analysis",
            VideoKind::Unknown => "Unknown",
        }
    }

    /// Path segment used by the backend's media endpoints
    pub fn path_segment(&self) -> Option<&'static str> {
        match self {
            VideoKind::Original => Some("original"),
            VideoKind::Inference => Some("inference"),
            VideoKind::Unknown => None,
        }
    }
}

/// A video as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(deserialize_with = "string_or_int")]
    pub id: String,
    pub video_path: String,
    /// Upload date
    pub create_time: String,
    pub update_time: String,
    #[serde(deserialize_with = "string_or_int")]
    pub patient_id: String,
    #[serde(default)]
    pub patient_username: Option<String>,
    #[serde(default)]
    pub original_video: bool,
    #[serde(default)]
    pub inference_video: bool,
    #[serde(default, deserialize_with = "opt_string_or_int")]
    pub action_id: Option<String>,
}

impl Video {
    pub fn kind(&self) -> VideoKind {
        if self.original_video {
            VideoKind::Original
        } else if self.inference_video {
            VideoKind::Inference
        } else {
            VideoKind::Unknown
        }
    }

    /// File name of the video, falling back to the whole path
    pub fn filename(&self) -> &str {
        file_name(&self.video_path).unwrap_or(&self.video_path)
    }

    /// Thumbnail endpoint for this video, `None` when the kind is unknown
    pub fn thumbnail_url(&self, api_base_url: &str) -> Option<String> {
        self.media_url(api_base_url, "thumbnail_image")
    }

    /// Raw video endpoint for this video, `None` when the kind is unknown
    pub fn stream_url(&self, api_base_url: &str) -> Option<String> {
        self.media_url(api_base_url, "video")
    }

    fn media_url(&self, api_base_url: &str, endpoint: &str) -> Option<String> {
        let segment = self.kind().path_segment()?;
        Some(format!(
            "{}/videos/{}/{}/{}/{}",
            api_base_url.trim_end_matches('/'),
            endpoint,
            segment,
            self.patient_id,
            self.id
        ))
    }
}

/// Last non-empty `/` segment of a path
pub(crate) fn file_name(path: &str) -> Option<&str> {
    path.rsplit('/').next().filter(|s| !s.is_empty())
}

impl Record for Video {
    type Column = VideoColumn;

    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self, column: VideoColumn) -> FieldValue {
        match column {
            VideoColumn::Id => FieldValue::from(self.id.as_str()),
            VideoColumn::VideoPath => FieldValue::from(self.video_path.as_str()),
            VideoColumn::Filename => FieldValue::from(self.filename()),
            VideoColumn::PatientId => FieldValue::from(self.patient_id.as_str()),
            VideoColumn::PatientUsername => FieldValue::text(self.patient_username.as_deref()),
            VideoColumn::CreateTime => FieldValue::from(self.create_time.as_str()),
            VideoColumn::VideoType => FieldValue::from(self.kind().label()),
            VideoColumn::ActionId => FieldValue::numeric_id(self.action_id.as_deref()),
        }
    }

    fn searchable_columns() -> &'static [VideoColumn] {
        &[
            VideoColumn::VideoPath,
            VideoColumn::PatientUsername,
            VideoColumn::ActionId,
        ]
    }

    /// `videoId` is a deep link opened with `find`, not a filter
    fn param_filters() -> &'static [(&'static str, VideoColumn)] {
        &[("patientId", VideoColumn::PatientId)]
    }
}
