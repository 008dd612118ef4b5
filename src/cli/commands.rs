//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::record::{
    AcademicRecord, AssessmentRecord, FeedbackRecord, Language, ObservationRecord, Record,
    TrainingRecord,
};

/// Record kind argument, naming one of the five collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKindArg {
    /// Classroom observation records
    Observation,
    /// Teacher feedback records
    Feedback,
    /// Monthly academic statistics
    Academic,
    /// Assessment result records
    Assessment,
    /// Professional-development records
    Training,
}

impl RecordKindArg {
    /// The collection key this kind is stored under.
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::Observation => ObservationRecord::COLLECTION,
            Self::Feedback => FeedbackRecord::COLLECTION,
            Self::Academic => AcademicRecord::COLLECTION,
            Self::Assessment => AssessmentRecord::COLLECTION,
            Self::Training => TrainingRecord::COLLECTION,
        }
    }
}

/// Language argument for advisory requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LanguageArg {
    /// English
    #[default]
    En,
    /// Urdu
    Ur,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Self::English,
            LanguageArg::Ur => Self::Urdu,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Which record kind to add
    #[arg(value_enum)]
    pub kind: RecordKindArg,

    /// Path to a JSON draft file (reads stdin when omitted)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Which record kind to list
    #[arg(value_enum)]
    pub kind: RecordKindArg,

    /// Maximum number of records to show (0 for all)
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Advise command arguments.
#[derive(Debug, Args)]
pub struct AdviseCommand {
    /// The question to ask the advisory service
    pub query: String,

    /// Language for the response and fallback text
    #[arg(short, long, value_enum, default_value = "en")]
    pub language: LanguageArg,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_collections_match_record_types() {
        assert_eq!(
            RecordKindArg::Observation.collection(),
            ObservationRecord::COLLECTION
        );
        assert_eq!(RecordKindArg::Training.collection(), TrainingRecord::COLLECTION);
    }

    #[test]
    fn test_record_kind_collections_are_distinct() {
        let kinds = [
            RecordKindArg::Observation,
            RecordKindArg::Feedback,
            RecordKindArg::Academic,
            RecordKindArg::Assessment,
            RecordKindArg::Training,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.collection(), b.collection());
            }
        }
    }

    #[test]
    fn test_language_arg_conversion() {
        assert_eq!(Language::from(LanguageArg::En), Language::English);
        assert_eq!(Language::from(LanguageArg::Ur), Language::Urdu);
    }

    #[test]
    fn test_language_arg_default() {
        assert_eq!(LanguageArg::default(), LanguageArg::En);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            kind: RecordKindArg::Observation,
            file: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Observation"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
