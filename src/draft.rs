//! In-progress record drafts.
//!
//! A draft mirrors one record schema with every field optional, so a form
//! (or a JSON document handed to the CLI) can accumulate values in any
//! order. Conversion to the immutable record happens once, at submission,
//! via `build()`: required fields are checked, the rest fall back to the
//! same defaults the entry forms use, and the id and creation timestamp are
//! assigned.
//!
//! `build()` checks presence only. Range invariants such as rating bounds,
//! attendance percentages, or passed <= total are documented on the record
//! types but deliberately not enforced here.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::{
    new_record_id, AcademicRecord, AssessmentRecord, FeedbackRecord, FeedbackStatus, Indicators,
    ObservationRecord, Record, TrainingRecord, TrainingType,
};

/// Default grade when an observation or assessment form leaves it blank.
const DEFAULT_GRADE: &str = "5";

/// Default subject when an observation form leaves it blank.
const DEFAULT_SUBJECT: &str = "General";

/// Default observation rating (the slider midpoint).
const DEFAULT_RATING: u8 = 3;

fn require(value: Option<String>, record: &'static str, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::draft_incomplete(record, field)),
    }
}

/// Draft of an [`ObservationRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObservationDraft {
    /// Name of the observed teacher. Required.
    pub teacher_name: Option<String>,
    /// Subject of the lesson.
    pub subject: Option<String>,
    /// Grade observed.
    pub grade: Option<String>,
    /// Indicator checklist.
    pub indicators: Option<Indicators>,
    /// Deficiencies noticed.
    pub deficiencies: Option<String>,
    /// Mentoring advice given.
    pub mentoring_notes: Option<String>,
    /// Overall rating.
    pub rating: Option<u8>,
}

impl ObservationDraft {
    /// Convert the draft into a full record, stamping id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DraftIncomplete`] if the teacher name is missing.
    pub fn build(self) -> Result<ObservationRecord> {
        let teacher_name = require(self.teacher_name, ObservationRecord::KIND, "teacherName")?;
        Ok(ObservationRecord {
            id: new_record_id(),
            teacher_name,
            subject: self
                .subject
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            date: Utc::now(),
            grade: self.grade.unwrap_or_else(|| DEFAULT_GRADE.to_string()),
            indicators: self.indicators.unwrap_or_default(),
            deficiencies: self.deficiencies.unwrap_or_default(),
            mentoring_notes: self.mentoring_notes.unwrap_or_default(),
            rating: self.rating.unwrap_or(DEFAULT_RATING),
        })
    }
}

/// Draft of a [`FeedbackRecord`].
///
/// Carries no status field: a created record is always `Pending`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackDraft {
    /// Name of the teacher receiving feedback. Required.
    pub teacher_name: Option<String>,
    /// Strengths discussed.
    pub strengths: Option<String>,
    /// Areas needing improvement.
    pub areas_for_improvement: Option<String>,
    /// The action plan both parties agreed on.
    pub agreed_action_plan: Option<String>,
    /// Scheduled follow-up date.
    pub follow_up_date: Option<NaiveDate>,
}

impl FeedbackDraft {
    /// Convert the draft into a full record, stamping id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DraftIncomplete`] if the teacher name is missing.
    pub fn build(self) -> Result<FeedbackRecord> {
        let teacher_name = require(self.teacher_name, FeedbackRecord::KIND, "teacherName")?;
        Ok(FeedbackRecord {
            id: new_record_id(),
            teacher_name,
            date: Utc::now(),
            strengths: self.strengths.unwrap_or_default(),
            areas_for_improvement: self.areas_for_improvement.unwrap_or_default(),
            agreed_action_plan: self.agreed_action_plan.unwrap_or_default(),
            follow_up_date: self.follow_up_date,
            status: FeedbackStatus::Pending,
        })
    }
}

/// Draft of an [`AcademicRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AcademicDraft {
    /// Reporting month in `YYYY-MM` form; defaults to the current month.
    pub month: Option<String>,
    /// Number of enrolled boys.
    pub enrollment_boys: Option<u32>,
    /// Number of enrolled girls.
    pub enrollment_girls: Option<u32>,
    /// Student attendance percentage.
    pub student_attendance: Option<f64>,
    /// Teacher attendance percentage.
    pub teacher_attendance: Option<f64>,
    /// Activity-based learning sessions were held.
    pub abl_activities: Option<bool>,
    /// A community meeting was held.
    pub community_meeting: Option<bool>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl AcademicDraft {
    /// Convert the draft into a full record, stamping the id.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice (the month defaults to the current
    /// month), but kept fallible for parity with the other drafts.
    pub fn build(self) -> Result<AcademicRecord> {
        let month = self
            .month
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| Utc::now().format("%Y-%m").to_string());
        Ok(AcademicRecord {
            id: new_record_id(),
            month,
            enrollment_boys: self.enrollment_boys.unwrap_or(0),
            enrollment_girls: self.enrollment_girls.unwrap_or(0),
            student_attendance: self.student_attendance.unwrap_or(0.0),
            teacher_attendance: self.teacher_attendance.unwrap_or(0.0),
            abl_activities: self.abl_activities.unwrap_or(false),
            community_meeting: self.community_meeting.unwrap_or(false),
            notes: self.notes.unwrap_or_default(),
        })
    }
}

/// Draft of an [`AssessmentRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentDraft {
    /// Date the assessment was held; defaults to today.
    pub date: Option<NaiveDate>,
    /// Grade assessed.
    pub grade: Option<String>,
    /// Subject assessed. Required.
    pub subject: Option<String>,
    /// Number of students assessed.
    pub total_students: Option<u32>,
    /// Number of students who passed.
    pub passed_students: Option<u32>,
    /// Student learning outcome or topic covered.
    pub slo_topic: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

impl AssessmentDraft {
    /// Convert the draft into a full record, stamping the id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DraftIncomplete`] if the subject is missing.
    pub fn build(self) -> Result<AssessmentRecord> {
        let subject = require(self.subject, AssessmentRecord::KIND, "subject")?;
        Ok(AssessmentRecord {
            id: new_record_id(),
            date: self.date.unwrap_or_else(|| Utc::now().date_naive()),
            grade: self.grade.unwrap_or_else(|| DEFAULT_GRADE.to_string()),
            subject,
            total_students: self.total_students.unwrap_or(0),
            passed_students: self.passed_students.unwrap_or(0),
            slo_topic: self.slo_topic.unwrap_or_default(),
            remarks: self.remarks.unwrap_or_default(),
        })
    }
}

/// Draft of a [`TrainingRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingDraft {
    /// Name of the teacher. Required.
    pub teacher_name: Option<String>,
    /// Title of the training. Required.
    pub title: Option<String>,
    /// Date the training took place; defaults to today.
    pub date: Option<NaiveDate>,
    /// Category of the training; defaults to CPD.
    #[serde(rename = "type")]
    pub training_type: Option<TrainingType>,
    /// Outcome noted by the mentor.
    pub outcome: Option<String>,
}

impl TrainingDraft {
    /// Convert the draft into a full record, stamping the id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DraftIncomplete`] if the teacher name or title is
    /// missing.
    pub fn build(self) -> Result<TrainingRecord> {
        let teacher_name = require(self.teacher_name, TrainingRecord::KIND, "teacherName")?;
        let title = require(self.title, TrainingRecord::KIND, "title")?;
        Ok(TrainingRecord {
            id: new_record_id(),
            teacher_name,
            title,
            date: self.date.unwrap_or_else(|| Utc::now().date_naive()),
            training_type: self.training_type.unwrap_or(TrainingType::Cpd),
            outcome: self.outcome.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_build_fills_defaults() {
        let draft = ObservationDraft {
            teacher_name: Some("Asma Khan".to_string()),
            ..ObservationDraft::default()
        };
        let record = draft.build().unwrap();

        assert_eq!(record.subject, "General");
        assert_eq!(record.grade, "5");
        assert_eq!(record.rating, 3);
        assert_eq!(record.indicators, Indicators::default());
        assert!(record.deficiencies.is_empty());
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_observation_build_requires_teacher_name() {
        let err = ObservationDraft::default().build().unwrap_err();
        assert!(err.is_draft_incomplete());
        assert!(err.to_string().contains("teacherName"));
    }

    #[test]
    fn test_observation_build_rejects_blank_teacher_name() {
        let draft = ObservationDraft {
            teacher_name: Some("   ".to_string()),
            ..ObservationDraft::default()
        };
        assert!(draft.build().is_err());
    }

    #[test]
    fn test_observation_build_keeps_provided_values() {
        let draft = ObservationDraft {
            teacher_name: Some("Bilal Ahmed".to_string()),
            subject: Some("Math".to_string()),
            grade: Some("3".to_string()),
            rating: Some(5),
            deficiencies: Some("Weak questioning".to_string()),
            ..ObservationDraft::default()
        };
        let record = draft.build().unwrap();

        assert_eq!(record.subject, "Math");
        assert_eq!(record.grade, "3");
        assert_eq!(record.rating, 5);
        assert_eq!(record.deficiencies, "Weak questioning");
    }

    #[test]
    fn test_feedback_build_is_always_pending() {
        let draft = FeedbackDraft {
            teacher_name: Some("Asma Khan".to_string()),
            strengths: Some("Strong rapport with students".to_string()),
            ..FeedbackDraft::default()
        };
        let record = draft.build().unwrap();

        assert_eq!(record.status, FeedbackStatus::Pending);
        assert!(record.follow_up_date.is_none());
    }

    #[test]
    fn test_feedback_build_requires_teacher_name() {
        assert!(FeedbackDraft::default().build().is_err());
    }

    #[test]
    fn test_academic_build_defaults_to_current_month() {
        let record = AcademicDraft::default().build().unwrap();
        assert_eq!(record.month, Utc::now().format("%Y-%m").to_string());
        assert_eq!(record.enrollment_boys, 0);
        assert!(!record.abl_activities);
    }

    #[test]
    fn test_assessment_build_requires_subject() {
        let err = AssessmentDraft::default().build().unwrap_err();
        assert!(err.to_string().contains("subject"));
    }

    #[test]
    fn test_assessment_build_defaults_date_to_today() {
        let draft = AssessmentDraft {
            subject: Some("Science".to_string()),
            total_students: Some(20),
            passed_students: Some(15),
            ..AssessmentDraft::default()
        };
        let record = draft.build().unwrap();

        assert_eq!(record.date, Utc::now().date_naive());
        assert_eq!(record.total_students, 20);
        assert_eq!(record.passed_students, 15);
    }

    #[test]
    fn test_training_build_requires_title() {
        let draft = TrainingDraft {
            teacher_name: Some("Asma Khan".to_string()),
            ..TrainingDraft::default()
        };
        let err = draft.build().unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_training_build_defaults_to_cpd() {
        let draft = TrainingDraft {
            teacher_name: Some("Asma Khan".to_string()),
            title: Some("SLO refresher".to_string()),
            ..TrainingDraft::default()
        };
        let record = draft.build().unwrap();
        assert_eq!(record.training_type, TrainingType::Cpd);
    }

    #[test]
    fn test_builds_assign_distinct_ids() {
        let a = AcademicDraft::default().build().unwrap();
        let b = AcademicDraft::default().build().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_draft_parses_camel_case_json() {
        let json = r#"{
            "teacherName": "Asma Khan",
            "mentoringNotes": "Pair with senior teacher",
            "rating": 4
        }"#;
        let draft: ObservationDraft = serde_json::from_str(json).unwrap();
        let record = draft.build().unwrap();

        assert_eq!(record.teacher_name, "Asma Khan");
        assert_eq!(record.mentoring_notes, "Pair with senior teacher");
        assert_eq!(record.rating, 4);
    }
}
