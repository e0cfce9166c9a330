//! # medadmin
//!
//! Presentation-side state for a medical-records administration console.
//!
//! The console lists doctors, patients, uploaded videos and analysis jobs
//! fetched from a REST backend. Every list screen is the same generic
//! [`CollectionView`](core::view::CollectionView): a raw collection narrowed
//! by exact-match navigation filters and a free-text search, then ordered by
//! a sort directive that cycles on header clicks.
//!
//! ## Features
//!
//! - **Closed column sets**: each record type declares its columns with
//!   [`define_columns!`]; unknown keys are rejected when parsed
//! - **One accessor per record**: sorting, searching and filtering all read
//!   [`Record::value`](core::record::Record::value)
//! - **Null-last stable sorting**: numbers numerically, text by collation order
//! - **Navigation queries**: `?patientId=5&sort=id:desc` resolved per record type
//! - **Form validation**: doctor and patient dialogs with per-field messages
//! - **Injected session**: explicit load/store/clear through a [`SessionStore`](session::SessionStore)
//! - **Last request wins**: overlapping fetches ordered by a [`FetchTracker`](source::FetchTracker)
//! - **Dashboard aggregates**: record counts and monthly analysis trends
//! - **YAML configuration**: per-screen search columns and default sort
//!
//! ## Quick Start
//!
//! ```rust
//! use medadmin::prelude::*;
//!
//! let query = ViewQuery::from_pairs([("patientId", "5"), ("sort", "create_time:desc")]);
//!
//! let mut view = CollectionView::<Video>::new();
//! view.apply_query(query.resolve::<Video>()?);
//! view.set_search_term("knee");
//!
//! for video in view.rows() {
//!     println!("{} ({})", video.filename(), video.kind().label());
//! }
//! # Ok::<(), ViewError>(())
//! ```

pub mod config;
pub mod core;
pub mod forms;
pub mod records;
pub mod session;
pub mod source;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ConfigError, ConsoleError, ConsoleResult, FieldValidationError, SessionError,
            SourceError, ValidationError, ViewError,
        },
        filter::{ParamFilters, apply_param_filters, apply_search},
        query::{ResolvedQuery, ViewQuery},
        record::{Column, Record},
        sort::{SortDirection, SortDirective, sort, toggle_sort},
        value::FieldValue,
        view::{CollectionView, ViewConfig},
    };

    // === Macros ===
    pub use crate::define_columns;

    // === Records ===
    pub use crate::records::{
        Analysis, AnalysisColumn, DashboardMetrics, DataAnalysisDataPoint, Doctor, DoctorColumn,
        Gender, Patient, PatientColumn, Role, StatusKind, Video, VideoColumn, VideoKind,
        analysis_trends,
    };

    // === Forms ===
    pub use crate::forms::{
        DoctorForm, DoctorPayload, FormMode, FormRules, PatientForm, PatientPayload,
    };

    // === Session ===
    pub use crate::session::{
        FileSessionStore, InMemorySessionStore, SessionContext, SessionStore, SessionUser,
    };

    // === Sources ===
    pub use crate::source::{FetchTicket, FetchTracker, InMemoryRecordSource, RecordSource};

    // === Config ===
    pub use crate::config::{ConsoleConfig, ScreenConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
}
