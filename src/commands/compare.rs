//! The `compare` command: load a ground-truth configuration and a trainee
//! submission from disk, run the comparison engine, render the result.
//!
//! All I/O happens at the edges of this module. Parsing the wire format
//! into the validated domain types is pure and separately testable.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::comparison::{compare, ComparisonResult};
use crate::errors::TaldlabError;
use crate::model::scale::{ItemId, Severity};
use crate::model::{ClinicalConfiguration, Mode, TraineeSubmission};

/// One row of a severity sheet as it appears on disk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SheetEntry {
    pub id: u8,
    pub severity: u8,
}

/// Wire format of a ground-truth configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTruthFile {
    pub mode: Mode,
    #[serde(default)]
    pub active: Vec<SheetEntry>,
}

/// Wire format of a trainee submission file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionFile {
    #[serde(default)]
    pub sheet: Vec<SheetEntry>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// JSON report wrapper emitted by `--format json`. The embedded result is
/// exactly what the engine produced; only provenance is added around it.
#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub generated_at: DateTime<Utc>,
    pub config_path: PathBuf,
    pub submission_path: PathBuf,
    pub result: ComparisonResult,
}

pub struct CompareConfig {
    pub config_path: PathBuf,
    pub submission_path: PathBuf,
    pub format: OutputFormat,
    pub output_path: Option<PathBuf>,
}

// I/O shell: read files, delegate to pure builders, render.

pub fn handle_compare(config: CompareConfig) -> Result<()> {
    log::info!(
        "comparing {} against {}",
        config.submission_path.display(),
        config.config_path.display()
    );

    let ground_truth: GroundTruthFile = load_json(&config.config_path)?;
    let submission_file: SubmissionFile = load_json(&config.submission_path)?;

    let configuration = build_configuration(&ground_truth)
        .with_context(|| format!("invalid configuration: {}", config.config_path.display()))?;
    let submission = build_submission(&submission_file, &configuration)
        .with_context(|| format!("invalid submission: {}", config.submission_path.display()))?;

    let result = compare(&submission, &configuration);
    log::debug!(
        "scored {} with {} classification error(s)",
        result.score,
        result.error_count()
    );

    let rendered = match config.format {
        OutputFormat::Terminal => render_terminal(&result),
        OutputFormat::Json => render_json(&config, result)?,
    };

    write_output(config.output_path.as_deref(), &rendered)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
            }
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            Ok(())
        }
    }
}

// Pure builders: wire format to validated domain types.

/// Validate a parsed ground-truth file into a `ClinicalConfiguration`.
///
/// Guided files must carry exactly one active entry. Exploratory files may
/// carry any number, including none for a healthy patient.
pub fn build_configuration(file: &GroundTruthFile) -> Result<ClinicalConfiguration, TaldlabError> {
    let active = build_sheet(&file.active)?;

    match file.mode {
        Mode::Guided => {
            if active.len() != 1 {
                return Err(TaldlabError::GuidedShape(active.len()));
            }
            // len() == 1 was just checked.
            let (&target, &severity) = active
                .iter()
                .next()
                .ok_or(TaldlabError::GuidedShape(0))?;
            Ok(ClinicalConfiguration::guided(target, severity))
        }
        Mode::Exploratory => Ok(ClinicalConfiguration::exploratory(active)),
    }
}

/// Validate a parsed submission file against the configuration's mode.
///
/// Guided submissions must grade exactly the configured target disorder.
pub fn build_submission(
    file: &SubmissionFile,
    configuration: &ClinicalConfiguration,
) -> Result<TraineeSubmission, TaldlabError> {
    let sheet = build_sheet(&file.sheet)?;

    match configuration.mode() {
        Mode::Guided => {
            if sheet.len() != 1 {
                return Err(TaldlabError::GuidedShape(sheet.len()));
            }
            let (&graded, &severity) = sheet
                .iter()
                .next()
                .ok_or(TaldlabError::GuidedShape(0))?;
            let (target, _) = configuration
                .primary_disorder()
                .ok_or(TaldlabError::GuidedShape(0))?;
            if graded != target {
                return Err(TaldlabError::GuidedTargetMismatch {
                    expected: target.get(),
                    got: graded.get(),
                });
            }
            TraineeSubmission::guided(target, severity, file.notes.clone())
        }
        Mode::Exploratory => TraineeSubmission::exploratory(sheet, file.notes.clone()),
    }
}

fn build_sheet(entries: &[SheetEntry]) -> Result<BTreeMap<ItemId, Severity>, TaldlabError> {
    let mut sheet = BTreeMap::new();
    for entry in entries {
        let id = ItemId::new(entry.id)?;
        let severity = Severity::new(entry.severity)?;
        if sheet.insert(id, severity).is_some() {
            return Err(TaldlabError::DuplicateItem(entry.id));
        }
    }
    Ok(sheet)
}

// Rendering.

fn render_json(config: &CompareConfig, result: ComparisonResult) -> Result<String> {
    let report = CompareReport {
        generated_at: Utc::now(),
        config_path: config.config_path.clone(),
        submission_path: config.submission_path.clone(),
        result,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

fn render_terminal(result: &ComparisonResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=== TALD Comparison Report ===".bold()));
    out.push_str(&format!(
        "Mode:  {}\n",
        match result.mode {
            Mode::Guided => "guided",
            Mode::Exploratory => "exploratory",
        }
    ));
    out.push_str(&format!("Score: {}\n", colored_score(result)));

    if result.mode == Mode::Exploratory {
        out.push_str(&format!(
            "Correct: {}  Missed: {}  False alarms: {}\n",
            result.true_positives.len(),
            result.false_negatives.len(),
            result.false_positives.len()
        ));
    }

    out.push('\n');
    out.push_str(&result.rationale);
    out.push('\n');
    out
}

fn colored_score(result: &ComparisonResult) -> String {
    use crate::model::PerformanceLevel;

    let text = format!("{}/100", result.score.value());
    match result.score.performance_level() {
        PerformanceLevel::Excellent => text.green().bold().to_string(),
        PerformanceLevel::Good => text.green().to_string(),
        PerformanceLevel::Sufficient => text.yellow().to_string(),
        PerformanceLevel::Insufficient => text.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn entry(id: u8, severity: u8) -> SheetEntry {
        SheetEntry { id, severity }
    }

    #[test]
    fn guided_configuration_round_trip() {
        let file = GroundTruthFile {
            mode: Mode::Guided,
            active: vec![entry(7, 3)],
        };

        let configuration = build_configuration(&file).unwrap();

        assert_eq!(configuration.mode(), Mode::Guided);
        let (target, severity) = configuration.primary_disorder().unwrap();
        assert_eq!(target.get(), 7);
        assert_eq!(severity.get(), 3);
    }

    #[test]
    fn guided_configuration_rejects_wrong_entry_count() {
        let file = GroundTruthFile {
            mode: Mode::Guided,
            active: vec![entry(7, 3), entry(9, 2)],
        };

        assert!(matches!(
            build_configuration(&file),
            Err(TaldlabError::GuidedShape(2))
        ));
    }

    #[test]
    fn configuration_rejects_out_of_range_id() {
        let file = GroundTruthFile {
            mode: Mode::Exploratory,
            active: vec![entry(31, 2)],
        };

        assert!(matches!(
            build_configuration(&file),
            Err(TaldlabError::ItemIdOutOfRange(31))
        ));
    }

    #[test]
    fn configuration_rejects_duplicate_ids() {
        let file = GroundTruthFile {
            mode: Mode::Exploratory,
            active: vec![entry(7, 2), entry(7, 3)],
        };

        assert!(matches!(
            build_configuration(&file),
            Err(TaldlabError::DuplicateItem(7))
        ));
    }

    #[test]
    fn guided_submission_must_grade_the_target() {
        let configuration = build_configuration(&GroundTruthFile {
            mode: Mode::Guided,
            active: vec![entry(7, 3)],
        })
        .unwrap();
        let file = SubmissionFile {
            sheet: vec![entry(9, 3)],
            notes: None,
        };

        assert!(matches!(
            build_submission(&file, &configuration),
            Err(TaldlabError::GuidedTargetMismatch {
                expected: 7,
                got: 9
            })
        ));
    }

    #[test]
    fn exploratory_submission_accepts_empty_sheet() {
        let configuration = build_configuration(&GroundTruthFile {
            mode: Mode::Exploratory,
            active: vec![],
        })
        .unwrap();
        let file = SubmissionFile {
            sheet: vec![],
            notes: Some("No abnormalities observed.".to_string()),
        };

        let submission = build_submission(&file, &configuration).unwrap();
        assert!(submission.sheet().is_empty());
        assert_eq!(submission.notes(), Some("No abnormalities observed."));
    }

    #[test]
    fn wire_format_parses_from_json() {
        let raw = indoc! {r#"
            {
              "mode": "exploratory",
              "active": [
                { "id": 3, "severity": 2 },
                { "id": 9, "severity": 4 }
              ]
            }
        "#};

        let file: GroundTruthFile = serde_json::from_str(raw).unwrap();
        let configuration = build_configuration(&file).unwrap();

        assert_eq!(configuration.active_disorders().len(), 2);
    }

    #[test]
    fn compare_command_writes_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let submission_path = dir.path().join("submission.json");
        let output_path = dir.path().join("report.json");

        fs::write(
            &config_path,
            r#"{"mode":"guided","active":[{"id":7,"severity":3}]}"#,
        )
        .unwrap();
        fs::write(&submission_path, r#"{"sheet":[{"id":7,"severity":3}]}"#).unwrap();

        handle_compare(CompareConfig {
            config_path,
            submission_path,
            format: OutputFormat::Json,
            output_path: Some(output_path.clone()),
        })
        .unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(report["result"]["score"], 100);
        assert_eq!(report["result"]["mode"], "guided");
    }
}
