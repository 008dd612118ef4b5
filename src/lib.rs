//! `mentorlog` - a supervision record register for school mentors
//!
//! This library provides the core of a record-keeping application for
//! school supervision staff: append-only record collections (classroom
//! observations, teacher feedback, academic statistics, assessments,
//! professional development), dashboard aggregation, and an advisory
//! gateway to an external text-generation service.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod advisor;
pub mod cli;
pub mod config;
pub mod draft;
pub mod error;
pub mod logging;
pub mod record;
pub mod report;
pub mod store;

pub use advisor::{Advisor, AdviceBackend};
pub use config::Config;
pub use draft::{
    AcademicDraft, AssessmentDraft, FeedbackDraft, ObservationDraft, TrainingDraft,
};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{
    AcademicRecord, AssessmentRecord, FeedbackRecord, FeedbackStatus, Indicators, Language,
    ObservationRecord, Record, TrainingRecord, TrainingType,
};
pub use report::{observation_stats, overall_pass_rate, pass_rate, pending_follow_ups};
pub use store::RecordStore;
