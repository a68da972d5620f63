use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::classifier::ReadinessLevel;
use super::profile::StudentProfile;
use super::service::{AssessmentReport, ReadinessPipeline};

#[derive(Debug, thiserror::Error)]
pub enum CohortImportError {
    #[error("failed to open cohort file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse cohort CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A CSV row that could not be read as a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RowParseError {
    pub domain_focus: String,
    pub message: String,
}

/// Read profiles from a CSV export whose header row uses the profile field names. Only an
/// unreadable header row or an I/O failure stops the import; a malformed row becomes that
/// row's error.
pub fn parse_profiles<R: Read>(
    reader: R,
) -> Result<Vec<Result<StudentProfile, RowParseError>>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let domain_column = headers.iter().position(|header| header == "domain_focus");

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err),
            Err(err) => {
                rows.push(Err(RowParseError {
                    domain_focus: String::new(),
                    message: err.to_string(),
                }));
                continue;
            }
        };

        let domain_focus = domain_column
            .and_then(|index| record.get(index))
            .unwrap_or_default()
            .to_string();
        rows.push(
            record
                .deserialize::<StudentProfile>(Some(&headers))
                .map_err(|err| RowParseError {
                    domain_focus,
                    message: err.to_string(),
                }),
        );
    }

    Ok(rows)
}

/// Outcome for one CSV row; `row` is 1-based and excludes the header.
#[derive(Debug, Clone, Serialize)]
pub struct CohortEntry {
    pub row: usize,
    pub domain_focus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AssessmentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CohortReport {
    pub entries: Vec<CohortEntry>,
    pub level_counts: BTreeMap<ReadinessLevel, usize>,
    pub rejected: usize,
}

impl CohortReport {
    pub fn assessed(&self) -> usize {
        self.entries.len() - self.rejected
    }

    fn record(
        &mut self,
        pipeline: &ReadinessPipeline,
        row: Result<&StudentProfile, &RowParseError>,
    ) {
        let (domain_focus, outcome) = match row {
            Ok(profile) => (
                profile.domain_focus.clone(),
                pipeline.assess(profile).map_err(|err| err.to_string()),
            ),
            Err(err) => (err.domain_focus.clone(), Err(err.to_string())),
        };

        let (report, error) = match outcome {
            Ok(report) => {
                *self.level_counts.entry(report.result.level).or_insert(0) += 1;
                (Some(report), None)
            }
            Err(error) => {
                self.rejected += 1;
                (None, Some(error))
            }
        };

        self.entries.push(CohortEntry {
            row: self.entries.len() + 1,
            domain_focus,
            report,
            error,
        });
    }
}

/// Assess every profile independently; one bad row never hides the others.
pub fn assess_cohort(pipeline: &ReadinessPipeline, profiles: &[StudentProfile]) -> CohortReport {
    let mut report = CohortReport::default();
    for profile in profiles {
        report.record(pipeline, Ok(profile));
    }
    report
}

/// Parse and assess a CSV export; unreadable rows are reported alongside assessed ones.
pub fn assess_cohort_reader<R: Read>(
    pipeline: &ReadinessPipeline,
    reader: R,
) -> Result<CohortReport, CohortImportError> {
    let mut report = CohortReport::default();
    for row in parse_profiles(reader)? {
        report.record(pipeline, row.as_ref());
    }
    Ok(report)
}

pub fn assess_cohort_file(
    pipeline: &ReadinessPipeline,
    path: impl AsRef<Path>,
) -> Result<CohortReport, CohortImportError> {
    let file = File::open(path)?;
    assess_cohort_reader(pipeline, file)
}
