//! `mlog` - CLI for mentorlog
//!
//! This binary provides the command-line interface for the supervision
//! record register: adding and listing records, dashboard statistics, and
//! the advisory assistant.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use mentorlog::cli::{
    AddCommand, AdviseCommand, Cli, Command, ConfigCommand, ListCommand, OutputFormat,
    RecordKindArg, StatsCommand, StatusCommand,
};
use mentorlog::record::{
    AcademicRecord, AssessmentRecord, FeedbackRecord, ObservationRecord, Record, TrainingRecord,
};
use mentorlog::{
    init_logging, observation_stats, overall_pass_rate, pass_rate, pending_follow_ups,
    AcademicDraft, Advisor, AssessmentDraft, Config, FeedbackDraft, ObservationDraft,
    RecordStore, TrainingDraft,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Add(cmd) => handle_add(&config, &cmd).await,
        Command::List(cmd) => handle_list(&config, &cmd).await,
        Command::Stats(cmd) => handle_stats(&config, &cmd).await,
        Command::Advise(cmd) => handle_advise(&config, &cmd).await,
        Command::Status(cmd) => handle_status(&config, &cmd).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<RecordStore> {
    RecordStore::open(config.database_path()).context("failed to open record store")
}

fn read_draft_input(cmd: &AddCommand) -> anyhow::Result<String> {
    match &cmd.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read draft from {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("failed to read draft from stdin"),
    }
}

async fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let input = read_draft_input(cmd)?;

    let (kind, id) = match cmd.kind {
        RecordKindArg::Observation => {
            let draft: ObservationDraft = serde_json::from_str(&input)?;
            let record = draft.build()?;
            store.append_record(&record).await?;
            (ObservationRecord::KIND, record.id)
        }
        RecordKindArg::Feedback => {
            let draft: FeedbackDraft = serde_json::from_str(&input)?;
            let record = draft.build()?;
            store.append_record(&record).await?;
            (FeedbackRecord::KIND, record.id)
        }
        RecordKindArg::Academic => {
            let draft: AcademicDraft = serde_json::from_str(&input)?;
            let record = draft.build()?;
            store.append_record(&record).await?;
            (AcademicRecord::KIND, record.id)
        }
        RecordKindArg::Assessment => {
            let draft: AssessmentDraft = serde_json::from_str(&input)?;
            let record = draft.build()?;
            store.append_record(&record).await?;
            (AssessmentRecord::KIND, record.id)
        }
        RecordKindArg::Training => {
            let draft: TrainingDraft = serde_json::from_str(&input)?;
            let record = draft.build()?;
            store.append_record(&record).await?;
            (TrainingRecord::KIND, record.id)
        }
    };

    println!("Recorded {kind} {id}");
    Ok(())
}

fn print_records<R: Record>(
    mut records: Vec<R>,
    limit: usize,
    format: OutputFormat,
    line: impl Fn(&R) -> String,
) -> anyhow::Result<()> {
    if limit > 0 {
        records.truncate(limit);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Plain => {
            if records.is_empty() {
                println!("No records found.");
            }
            for record in &records {
                println!("{}", line(record));
            }
        }
    }
    Ok(())
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;

    match cmd.kind {
        RecordKindArg::Observation => {
            let records: Vec<ObservationRecord> = store.records().await?;
            print_records(records, cmd.limit, cmd.format, |r| {
                format!(
                    "{}  {}  {} (grade {})  rating {}/5",
                    r.date.format("%Y-%m-%d"),
                    r.teacher_name,
                    r.subject,
                    r.grade,
                    r.rating
                )
            })
        }
        RecordKindArg::Feedback => {
            let records: Vec<FeedbackRecord> = store.records().await?;
            print_records(records, cmd.limit, cmd.format, |r| {
                format!(
                    "{}  {}  {}",
                    r.date.format("%Y-%m-%d"),
                    r.teacher_name,
                    r.status
                )
            })
        }
        RecordKindArg::Academic => {
            let records: Vec<AcademicRecord> = store.records().await?;
            print_records(records, cmd.limit, cmd.format, |r| {
                format!(
                    "{}  enrolled {}+{}  attendance {:.0}%/{:.0}%",
                    r.month,
                    r.enrollment_boys,
                    r.enrollment_girls,
                    r.student_attendance,
                    r.teacher_attendance
                )
            })
        }
        RecordKindArg::Assessment => {
            let records: Vec<AssessmentRecord> = store.records().await?;
            print_records(records, cmd.limit, cmd.format, |r| {
                format!(
                    "{}  {} (grade {})  passed {}/{} ({}%)",
                    r.date,
                    r.subject,
                    r.grade,
                    r.passed_students,
                    r.total_students,
                    pass_rate(r.total_students, r.passed_students)
                )
            })
        }
        RecordKindArg::Training => {
            let records: Vec<TrainingRecord> = store.records().await?;
            print_records(records, cmd.limit, cmd.format, |r| {
                format!(
                    "{}  {}  {} ({})",
                    r.date, r.teacher_name, r.title, r.training_type
                )
            })
        }
    }
}

async fn handle_stats(config: &Config, cmd: &StatsCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;

    let observations: Vec<ObservationRecord> = store.records().await?;
    let feedback: Vec<FeedbackRecord> = store.records().await?;
    let assessments: Vec<AssessmentRecord> = store.records().await?;

    let stats = observation_stats(&observations);
    let pending = pending_follow_ups(&feedback);
    let rate = overall_pass_rate(&assessments);

    if cmd.json {
        let summary = serde_json::json!({
            "total_observations": stats.total,
            "avg_rating": stats.avg_rating,
            "pending_follow_ups": pending,
            "overall_pass_rate": rate,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Register summary");
        println!("----------------");
        println!("Observations:       {}", stats.total);
        println!("Average rating:     {:.1}", stats.avg_rating);
        println!("Pending follow-ups: {pending}");
        println!("Overall pass rate:  {rate}%");
    }
    Ok(())
}

async fn handle_advise(config: &Config, cmd: &AdviseCommand) -> anyhow::Result<()> {
    let advisor = Advisor::new(&config.advisor);
    let text = advisor.advise(&cmd.query, cmd.language.into()).await;
    println!("{text}");
    Ok(())
}

async fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let counts = store.collection_counts().await?;

    if cmd.json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "collections": counts
                .iter()
                .map(|(name, count)| serde_json::json!({ "name": name, "records": count }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("mlog status");
        println!("-----------");
        println!("Database: {}", config.database_path().display());
        if counts.is_empty() {
            println!("No collections written yet.");
        }
        for (name, count) in counts {
            println!("  {name:<14} {count} records");
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path: {}", config.database_path().display());
                println!();
                println!("[Advisor]");
                println!("  Base URL:      {}", config.advisor.base_url);
                println!("  Model:         {}", config.advisor.model);
                println!(
                    "  API key:       {}",
                    if config.advisor.api_key.is_some() {
                        "set"
                    } else {
                        "not set"
                    }
                );
                println!("  Max tokens:    {}", config.advisor.max_tokens);
                println!("  Temperature:   {}", config.advisor.temperature);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
