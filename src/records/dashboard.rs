//! Aggregates shown on the dashboard screen

use crate::records::{Analysis, Doctor, Patient, Video};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Record counts of the dashboard cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub doctor_count: u64,
    pub patient_count: u64,
    pub video_count: u64,
    pub data_analysis_count: u64,
}

impl DashboardMetrics {
    /// Count collections that are already loaded
    ///
    /// Lists served by the backend never contain deleted records, so the
    /// counts match the metrics endpoint for the same data.
    pub fn from_collections(
        doctors: &[Doctor],
        patients: &[Patient],
        videos: &[Video],
        analyses: &[Analysis],
    ) -> Self {
        Self {
            doctor_count: doctors.len() as u64,
            patient_count: patients.len() as u64,
            video_count: videos.len() as u64,
            data_analysis_count: analyses.len() as u64,
        }
    }
}

/// Number of analyses started in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAnalysisDataPoint {
    /// Month label such as `"May '24"`
    pub date: String,
    pub analyses: u64,
}

/// Monthly analysis counts, oldest month first
///
/// Analyses whose `create_time` is not a `YYYY-MM-DD[ HH:MM:SS]` timestamp
/// are left out.
pub fn analysis_trends(analyses: &[Analysis]) -> Vec<DataAnalysisDataPoint> {
    let mut months: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for analysis in analyses {
        match created_on(&analysis.create_time) {
            Some(date) => *months.entry((date.year(), date.month())).or_default() += 1,
            None => tracing::trace!(
                id = %analysis.id,
                create_time = %analysis.create_time,
                "analysis without a usable creation time"
            ),
        }
    }

    months
        .into_iter()
        .filter_map(|((year, month), analyses)| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(DataAnalysisDataPoint {
                date: first.format("%b '%y").to_string(),
                analyses,
            })
        })
        .collect()
}

fn created_on(create_time: &str) -> Option<NaiveDate> {
    let create_time = create_time.trim();
    NaiveDateTime::parse_from_str(create_time, TIMESTAMP_FORMAT)
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(create_time, "%Y-%m-%d"))
        .ok()
}
