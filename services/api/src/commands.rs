use crate::infra::load_pipeline;
use chrono::Local;
use clap::Args;
use placement_readiness::config::AppConfig;
use placement_readiness::error::AppError;
use placement_readiness::telemetry;
use placement_readiness::workflows::readiness::{
    assess_cohort_file, AssessmentReport, CohortReport, ReadinessLevel, StudentProfile,
};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding one student profile
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Artifact directory (defaults to APP_MODEL_DIR)
    #[arg(long)]
    pub(crate) artifacts: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CohortArgs {
    /// CSV export with one profile per row and profile field names as headers
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Artifact directory (defaults to APP_MODEL_DIR)
    #[arg(long)]
    pub(crate) artifacts: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

fn artifact_dir(overridden: Option<PathBuf>) -> Result<PathBuf, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(overridden.unwrap_or(config.model.artifact_dir))
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        profile,
        artifacts,
        json,
    } = args;

    let pipeline = load_pipeline(&artifact_dir(artifacts)?)?;
    let raw = fs::read_to_string(&profile)?;
    let student: StudentProfile = serde_json::from_str(&raw)?;
    let report = pipeline.assess(&student)?;

    if json {
        print_json(&report);
    } else {
        render_assessment(&student, &report);
    }
    Ok(())
}

pub(crate) fn run_cohort(args: CohortArgs) -> Result<(), AppError> {
    let CohortArgs {
        csv,
        artifacts,
        json,
    } = args;

    let pipeline = load_pipeline(&artifact_dir(artifacts)?)?;
    let report = assess_cohort_file(&pipeline, &csv)?;

    if json {
        print_json(&report);
    } else {
        render_cohort(&report);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("Report unavailable as JSON: {}", err),
    }
}

pub(crate) fn render_assessment(profile: &StudentProfile, report: &AssessmentReport) {
    println!("Placement readiness assessment");
    println!("Assessed at {}", Local::now().format("%Y-%m-%d %H:%M"));
    println!(
        "Level: {} ({}% confidence)",
        report.result.level, report.result.confidence
    );
    println!("Domain focus: {}", profile.domain_focus);

    println!("\nRecommended next steps");
    for (index, item) in report.recommendations.items().iter().enumerate() {
        println!("{}. {}", index + 1, item);
    }
}

pub(crate) fn render_cohort(report: &CohortReport) {
    println!("Cohort readiness summary");
    println!("Assessed at {}", Local::now().format("%Y-%m-%d %H:%M"));
    println!(
        "{} rows | {} assessed | {} rejected",
        report.entries.len(),
        report.assessed(),
        report.rejected
    );

    println!("\nLevel distribution");
    for level in ReadinessLevel::ALL {
        let count = report.level_counts.get(&level).copied().unwrap_or(0);
        println!("- {}: {}", level, count);
    }

    println!("\nRows");
    for entry in &report.entries {
        match (&entry.report, &entry.error) {
            (Some(assessment), _) => println!(
                "  {:>3}. {} ({}%) | {} | next: {}",
                entry.row,
                assessment.result.level,
                assessment.result.confidence,
                entry.domain_focus,
                assessment
                    .recommendations
                    .items()
                    .first()
                    .map(String::as_str)
                    .unwrap_or("-")
            ),
            (None, Some(error)) => println!("  {:>3}. rejected: {}", entry.row, error),
            (None, None) => println!("  {:>3}. no result", entry.row),
        }
    }
}
