//! Record types displayed by the console's list screens

#[macro_use]
pub mod macros;

pub mod analysis;
pub mod dashboard;
pub mod doctor;
mod ids;
pub mod patient;
pub mod video;

pub use analysis::{Analysis, AnalysisColumn, StatusKind};
pub use dashboard::{DashboardMetrics, DataAnalysisDataPoint, analysis_trends};
pub use doctor::{Doctor, DoctorColumn, Role};
pub use patient::{Gender, Patient, PatientColumn};
pub use video::{Video, VideoColumn, VideoKind};
