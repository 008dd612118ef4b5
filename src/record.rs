//! Record schemas for mentorlog.
//!
//! This module defines the five record shapes the register stores, the
//! shared enums they use, and the [`Record`] trait that ties each shape to
//! its collection key. Records are immutable once created: every entry is
//! appended to the front of its collection and never edited or deleted.
//!
//! Field names serialize in camelCase so persisted data stays compatible
//! with existing register exports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Interface language for advisory responses and fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// English.
    #[default]
    #[serde(rename = "en")]
    English,
    /// Urdu.
    #[serde(rename = "ur")]
    Urdu,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::English => write!(f, "en"),
            Self::Urdu => write!(f, "ur"),
        }
    }
}

/// Follow-up status of a feedback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackStatus {
    /// The agreed action plan has not been reviewed yet.
    Pending,
    /// The follow-up took place and the plan was reviewed.
    Completed,
}

impl std::fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// Category of a professional-development event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingType {
    /// Initial induction training for newly appointed teachers.
    Induction,
    /// Continuous professional development session.
    #[serde(rename = "CPD")]
    Cpd,
    /// One-on-one mentoring session.
    Mentoring,
}

impl std::fmt::Display for TrainingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Induction => write!(f, "Induction"),
            Self::Cpd => write!(f, "CPD"),
            Self::Mentoring => write!(f, "Mentoring"),
        }
    }
}

/// Classroom indicator checklist ticked during an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    /// A written lesson plan was in use.
    pub lesson_plan: bool,
    /// Audio-visual aids were in use.
    pub av_aids: bool,
    /// Students were actively engaged.
    pub student_engagement: bool,
    /// Student notebooks were checked.
    pub notebook_check: bool,
}

impl Indicators {
    /// Count how many indicators were observed.
    #[must_use]
    pub fn observed(&self) -> u8 {
        u8::from(self.lesson_plan)
            + u8::from(self.av_aids)
            + u8::from(self.student_engagement)
            + u8::from(self.notebook_check)
    }
}

/// A record type stored in a named collection.
///
/// Every record carries an opaque string id, unique within its collection
/// and generated at creation time.
pub trait Record: Serialize + serde::de::DeserializeOwned {
    /// The collection key this record type is stored under.
    const COLLECTION: &'static str;

    /// Short human-readable schema name, used in errors and output.
    const KIND: &'static str;

    /// The record's unique identifier.
    fn id(&self) -> &str;
}

/// Generate a fresh opaque record id.
#[must_use]
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// One classroom observation visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    /// Unique identifier.
    pub id: String,
    /// Name of the observed teacher.
    pub teacher_name: String,
    /// Subject of the observed lesson.
    pub subject: String,
    /// When the observation was recorded.
    pub date: DateTime<Utc>,
    /// Grade (class level) observed.
    pub grade: String,
    /// Classroom indicator checklist.
    pub indicators: Indicators,
    /// Deficiencies noticed during the visit.
    pub deficiencies: String,
    /// Mentoring advice given to the teacher.
    pub mentoring_notes: String,
    /// Overall rating, expected in 1..=5.
    pub rating: u8,
}

impl Record for ObservationRecord {
    const COLLECTION: &'static str = "observations";
    const KIND: &'static str = "observation";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A structured feedback session with a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Unique identifier.
    pub id: String,
    /// Name of the teacher who received feedback.
    pub teacher_name: String,
    /// When the session was recorded.
    pub date: DateTime<Utc>,
    /// Strengths discussed.
    pub strengths: String,
    /// Areas needing improvement.
    pub areas_for_improvement: String,
    /// The action plan both parties agreed on.
    pub agreed_action_plan: String,
    /// Scheduled follow-up date, if one was set.
    pub follow_up_date: Option<NaiveDate>,
    /// Follow-up status; always `Pending` at creation.
    pub status: FeedbackStatus,
}

impl Record for FeedbackRecord {
    const COLLECTION: &'static str = "feedback";
    const KIND: &'static str = "feedback";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Monthly academic and enrollment statistics for the school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    /// Unique identifier.
    pub id: String,
    /// Reporting month in `YYYY-MM` form.
    pub month: String,
    /// Number of enrolled boys.
    pub enrollment_boys: u32,
    /// Number of enrolled girls.
    pub enrollment_girls: u32,
    /// Student attendance percentage, expected in 0..=100.
    pub student_attendance: f64,
    /// Teacher attendance percentage, expected in 0..=100.
    pub teacher_attendance: f64,
    /// Activity-based learning sessions were held this month.
    pub abl_activities: bool,
    /// A parent/community meeting was held this month.
    pub community_meeting: bool,
    /// Free-form notes.
    pub notes: String,
}

impl Record for AcademicRecord {
    const COLLECTION: &'static str = "academic";
    const KIND: &'static str = "academic";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Results of one student assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    /// Unique identifier.
    pub id: String,
    /// Date the assessment was held.
    pub date: NaiveDate,
    /// Grade (class level) assessed.
    pub grade: String,
    /// Subject assessed.
    pub subject: String,
    /// Number of students assessed.
    pub total_students: u32,
    /// Number of students who passed; expected `<= total_students`.
    pub passed_students: u32,
    /// Student learning outcome or topic covered.
    pub slo_topic: String,
    /// Free-form remarks.
    pub remarks: String,
}

impl Record for AssessmentRecord {
    const COLLECTION: &'static str = "assessment";
    const KIND: &'static str = "assessment";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A professional-development event attended by a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRecord {
    /// Unique identifier.
    pub id: String,
    /// Name of the teacher.
    pub teacher_name: String,
    /// Title of the training.
    pub title: String,
    /// Date the training took place.
    pub date: NaiveDate,
    /// Category of the training.
    #[serde(rename = "type")]
    pub training_type: TrainingType,
    /// Outcome or takeaway noted by the mentor.
    pub outcome: String,
}

impl Record for TrainingRecord {
    const COLLECTION: &'static str = "training";
    const KIND: &'static str = "training";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_observation() -> ObservationRecord {
        ObservationRecord {
            id: new_record_id(),
            teacher_name: "Asma Khan".to_string(),
            subject: "English".to_string(),
            date: Utc::now(),
            grade: "5".to_string(),
            indicators: Indicators {
                lesson_plan: true,
                av_aids: false,
                student_engagement: true,
                notebook_check: false,
            },
            deficiencies: "No AV aids in use".to_string(),
            mentoring_notes: "Suggested low-cost materials".to_string(),
            rating: 4,
        }
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::English.to_string(), "en");
        assert_eq!(Language::Urdu.to_string(), "ur");
    }

    #[test]
    fn test_language_serialization() {
        assert_eq!(serde_json::to_string(&Language::Urdu).unwrap(), "\"ur\"");
        assert_eq!(
            serde_json::from_str::<Language>("\"en\"").unwrap(),
            Language::English
        );
    }

    #[test]
    fn test_feedback_status_display() {
        assert_eq!(FeedbackStatus::Pending.to_string(), "Pending");
        assert_eq!(FeedbackStatus::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_training_type_serialization() {
        assert_eq!(serde_json::to_string(&TrainingType::Cpd).unwrap(), "\"CPD\"");
        assert_eq!(
            serde_json::from_str::<TrainingType>("\"Induction\"").unwrap(),
            TrainingType::Induction
        );
    }

    #[test]
    fn test_indicators_observed() {
        let none = Indicators::default();
        assert_eq!(none.observed(), 0);

        let some = Indicators {
            lesson_plan: true,
            av_aids: true,
            student_engagement: false,
            notebook_check: true,
        };
        assert_eq!(some.observed(), 3);
    }

    #[test]
    fn test_new_record_ids_are_unique() {
        let a = new_record_id();
        let b = new_record_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_observation_serializes_camel_case() {
        let record = sample_observation();
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"teacherName\""));
        assert!(json.contains("\"mentoringNotes\""));
        assert!(json.contains("\"lessonPlan\""));
        assert!(!json.contains("teacher_name"));
    }

    #[test]
    fn test_observation_round_trip() {
        let record = sample_observation();
        let json = serde_json::to_string(&record).unwrap();
        let back: ObservationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_training_type_field_serializes_as_type() {
        let record = TrainingRecord {
            id: new_record_id(),
            teacher_name: "Bilal Ahmed".to_string(),
            title: "Multigrade teaching basics".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            training_type: TrainingType::Mentoring,
            outcome: "Will pilot station rotation".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"Mentoring\""));
    }

    #[test]
    fn test_feedback_status_serializes_exact_literals() {
        let json = serde_json::to_string(&FeedbackStatus::Pending).unwrap();
        assert_eq!(json, "\"Pending\"");
    }

    #[test]
    fn test_collection_keys_are_distinct() {
        let keys = [
            ObservationRecord::COLLECTION,
            FeedbackRecord::COLLECTION,
            AcademicRecord::COLLECTION,
            AssessmentRecord::COLLECTION,
            TrainingRecord::COLLECTION,
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_record_trait_id() {
        let record = sample_observation();
        assert_eq!(Record::id(&record), record.id.as_str());
    }
}
