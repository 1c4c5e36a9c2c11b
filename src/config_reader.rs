// Readers for the two JSON inputs: the rubric catalog and a monitoring
// submission. Validation happens here, before any record is constructed,
// so a rejected submission never reaches the store.

use std::collections::HashMap;
use std::fs;

use log::debug;
use serde::{Deserialize, Serialize};
use snafu::{prelude::*, Snafu};

use rubric_scoring::{parse_date, AreaConfig, RubricCatalog};

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Error opening the file {path}"))]
    Opening {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the file {path}"))]
    Parsing {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Unknown area {area:?}"))]
    UnknownArea { area: String },
    #[snafu(display("Unknown channel {channel:?} for area {area:?}"))]
    UnknownChannel { area: String, channel: String },
    #[snafu(display("Monitor {monitor:?} is not registered for area {area:?}"))]
    UnknownMonitor { area: String, monitor: String },
    #[snafu(display("Advisor {advisor:?} is not registered for area {area:?}"))]
    UnknownAdvisor { area: String, advisor: String },
    #[snafu(display("The interaction code is required"))]
    MissingCode {},
    #[snafu(display("Both feedback fields (positives and improvements) are required"))]
    MissingFeedback {},
    #[snafu(display("The date {date:?} is not in YYYY-MM-DD format"))]
    BadDate { date: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ******** Catalog file ********

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CatalogQuestion {
    pub text: String,
    pub weight: u32,
}

/// One rubric shared by one or more channels of the same area.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRubric {
    pub channels: Vec<String>,
    pub questions: Vec<CatalogQuestion>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CatalogArea {
    pub name: String,
    pub channels: Vec<String>,
    pub monitors: Vec<String>,
    pub advisors: Vec<String>,
    pub rubrics: Vec<CatalogRubric>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub areas: Vec<CatalogArea>,
}

impl CatalogFile {
    pub fn into_catalog(self) -> RubricCatalog {
        let mut catalog = RubricCatalog::new();
        for area in self.areas {
            catalog.add_area(
                &area.name,
                AreaConfig {
                    channels: area.channels.clone(),
                    monitors: area.monitors.clone(),
                    advisors: area.advisors.clone(),
                },
            );
            for rubric in area.rubrics {
                let questions: Vec<(String, u32)> = rubric
                    .questions
                    .iter()
                    .map(|q| (q.text.clone(), q.weight))
                    .collect();
                for channel in rubric.channels.iter() {
                    catalog.add_rubric(&area.name, channel, questions.clone());
                }
            }
        }
        catalog
    }
}

pub fn read_catalog(path: &str) -> ConfigResult<RubricCatalog> {
    let contents = fs::read_to_string(path).context(OpeningSnafu { path })?;
    let file: CatalogFile = serde_json::from_str(&contents).context(ParsingSnafu { path })?;
    debug!("read_catalog: {} areas", file.areas.len());
    Ok(file.into_catalog())
}

// ******** Submission file ********

/// One filled monitoring form, as collected by the UI layer.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub area: String,
    pub channel: String,
    pub monitor: String,
    pub advisor: String,
    #[serde(rename = "interactionCode")]
    pub interaction_code: String,
    /// The interaction date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(rename = "criticalError")]
    pub critical_error: bool,
    /// One judgment per rubric question: true when the criterion is met.
    pub answers: HashMap<String, bool>,
    pub positives: String,
    pub improvements: String,
}

pub fn read_submission(path: &str) -> ConfigResult<Submission> {
    let contents = fs::read_to_string(path).context(OpeningSnafu { path })?;
    let submission: Submission =
        serde_json::from_str(&contents).context(ParsingSnafu { path })?;
    debug!(
        "read_submission: {} / {} with {} answers",
        submission.area,
        submission.channel,
        submission.answers.len()
    );
    Ok(submission)
}

/// The mandatory-field checks the original form applies before saving.
pub fn validate_submission(submission: &Submission, catalog: &RubricCatalog) -> ConfigResult<()> {
    let area = catalog
        .area(&submission.area)
        .context(UnknownAreaSnafu {
            area: submission.area.clone(),
        })?;
    ensure!(
        area.channels.iter().any(|c| c == &submission.channel),
        UnknownChannelSnafu {
            area: submission.area.clone(),
            channel: submission.channel.clone(),
        }
    );
    ensure!(
        area.monitors.iter().any(|m| m == &submission.monitor),
        UnknownMonitorSnafu {
            area: submission.area.clone(),
            monitor: submission.monitor.clone(),
        }
    );
    ensure!(
        area.advisors.iter().any(|a| a == &submission.advisor),
        UnknownAdvisorSnafu {
            area: submission.area.clone(),
            advisor: submission.advisor.clone(),
        }
    );
    ensure!(
        !submission.interaction_code.trim().is_empty(),
        MissingCodeSnafu {}
    );
    ensure!(
        !submission.positives.trim().is_empty() && !submission.improvements.trim().is_empty(),
        MissingFeedbackSnafu {}
    );
    ensure!(
        parse_date(&submission.date).is_some(),
        BadDateSnafu {
            date: submission.date.clone(),
        }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubric_scoring::AreaConfig;

    fn catalog() -> RubricCatalog {
        let mut catalog = RubricCatalog::new();
        catalog.add_area(
            "CASA UR",
            AreaConfig {
                channels: vec!["Chat".to_string()],
                monitors: vec!["M1".to_string()],
                advisors: vec!["Ana".to_string()],
            },
        );
        catalog
    }

    fn submission() -> Submission {
        Submission {
            area: "CASA UR".to_string(),
            channel: "Chat".to_string(),
            monitor: "M1".to_string(),
            advisor: "Ana".to_string(),
            interaction_code: "C-42".to_string(),
            date: "2026-08-20".to_string(),
            critical_error: false,
            answers: HashMap::new(),
            positives: "bien".to_string(),
            improvements: "mejorar".to_string(),
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert!(validate_submission(&submission(), &catalog()).is_ok());
    }

    #[test]
    fn unknown_names_are_rejected() {
        let catalog = catalog();
        let mut s = submission();
        s.area = "Otra".to_string();
        assert!(matches!(
            validate_submission(&s, &catalog),
            Err(ConfigError::UnknownArea { .. })
        ));
        let mut s = submission();
        s.channel = "Fax".to_string();
        assert!(matches!(
            validate_submission(&s, &catalog),
            Err(ConfigError::UnknownChannel { .. })
        ));
        let mut s = submission();
        s.advisor = "Luis".to_string();
        assert!(matches!(
            validate_submission(&s, &catalog),
            Err(ConfigError::UnknownAdvisor { .. })
        ));
    }

    #[test]
    fn empty_mandatory_fields_are_rejected() {
        let catalog = catalog();
        let mut s = submission();
        s.interaction_code = "  ".to_string();
        assert!(matches!(
            validate_submission(&s, &catalog),
            Err(ConfigError::MissingCode { .. })
        ));
        let mut s = submission();
        s.improvements = "".to_string();
        assert!(matches!(
            validate_submission(&s, &catalog),
            Err(ConfigError::MissingFeedback { .. })
        ));
    }

    #[test]
    fn bad_date_is_rejected() {
        let catalog = catalog();
        let mut s = submission();
        s.date = "20/08/2026".to_string();
        assert!(matches!(
            validate_submission(&s, &catalog),
            Err(ConfigError::BadDate { .. })
        ));
    }

    #[test]
    fn submission_json_parses() {
        let js = r#"{
            "area": "CASA UR",
            "channel": "Chat",
            "monitor": "M1",
            "advisor": "Ana",
            "interactionCode": "C-42",
            "date": "2026-08-20",
            "criticalError": true,
            "answers": {"¿Saluda?": true, "¿Resuelve?": false},
            "positives": "bien",
            "improvements": "mejorar"
        }"#;
        let s: Submission = serde_json::from_str(js).unwrap();
        assert!(s.critical_error);
        assert_eq!(s.answers.get("¿Saluda?"), Some(&true));
    }

    #[test]
    fn catalog_file_expands_shared_rubrics_per_channel() {
        let js = r#"{
            "areas": [{
                "name": "CASA UR",
                "channels": ["Chat", "Presencial", "Back Office"],
                "monitors": ["M1"],
                "advisors": ["Ana"],
                "rubrics": [
                    {"channels": ["Chat", "Presencial"],
                     "questions": [{"text": "¿Saluda?", "weight": 100}]},
                    {"channels": ["Back Office"],
                     "questions": [{"text": "¿Cumple ANS?", "weight": 100}]}
                ]
            }]
        }"#;
        let file: CatalogFile = serde_json::from_str(js).unwrap();
        let catalog = file.into_catalog();
        assert_eq!(catalog.rubric("CASA UR", "Chat").len(), 1);
        assert_eq!(catalog.rubric("CASA UR", "Presencial").len(), 1);
        assert_eq!(
            catalog.rubric("CASA UR", "Back Office")[0].0,
            "¿Cumple ANS?"
        );
    }
}
