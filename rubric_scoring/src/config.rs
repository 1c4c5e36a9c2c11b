// ********* Catalog data structures ***********

use std::fmt::Display;

/// The separator used to derive a table identity from an (area, channel)
/// pair. Splitting an identity on the first occurrence of this separator
/// must recover the original pair, which is why catalog validation rejects
/// names containing it.
pub const TABLE_SEPARATOR: &str = " - ";

/// The configuration attached to one area: the interaction channels it
/// offers and the people registered on both sides of a monitoring session.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AreaConfig {
    pub channels: Vec<String>,
    pub monitors: Vec<String>,
    pub advisors: Vec<String>,
}

/// The closed table of areas, channels and rubrics known to the engine.
///
/// The catalog is built once at startup and passed by reference into the
/// scoring functions. Unknown (area, channel) combinations are not errors:
/// they resolve to an empty rubric and callers must treat that as "no
/// applicable criteria yet".
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RubricCatalog {
    areas: Vec<(String, AreaConfig)>,
    rubrics: Vec<(String, String, Vec<(String, u32)>)>,
}

impl RubricCatalog {
    pub fn new() -> RubricCatalog {
        RubricCatalog::default()
    }

    pub fn add_area(&mut self, name: &str, config: AreaConfig) {
        self.areas.push((name.to_string(), config));
    }

    /// Registers the ordered list of (question, weight) pairs for one
    /// (area, channel) combination. A later registration for the same pair
    /// replaces the earlier one.
    pub fn add_rubric(&mut self, area: &str, channel: &str, questions: Vec<(String, u32)>) {
        self.rubrics
            .retain(|(a, c, _)| !(a == area && c == channel));
        self.rubrics
            .push((area.to_string(), channel.to_string(), questions));
    }

    /// All the areas, in registration order.
    pub fn areas(&self) -> impl Iterator<Item = (&str, &AreaConfig)> {
        self.areas.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn area(&self, name: &str) -> Option<&AreaConfig> {
        self.areas
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// The rubric for an (area, channel) pair, in question order. An empty
    /// slice for any combination that was never registered.
    pub fn rubric(&self, area: &str, channel: &str) -> &[(String, u32)] {
        self.rubrics
            .iter()
            .find(|(a, c, _)| a == area && c == channel)
            .map(|(_, _, qs)| qs.as_slice())
            .unwrap_or(&[])
    }

    /// Every question text appearing in any registered rubric, deduplicated,
    /// in first-seen order.
    pub fn all_questions(&self) -> Vec<String> {
        let mut res: Vec<String> = Vec::new();
        for (_, _, questions) in self.rubrics.iter() {
            for (q, _) in questions.iter() {
                if !res.iter().any(|x| x == q) {
                    res.push(q.clone());
                }
            }
        }
        res
    }

    /// Checks the conventions that the catalog is expected to follow but
    /// that scoring does not enforce. Callers typically log the warnings at
    /// startup and proceed.
    pub fn validate(&self) -> Vec<CatalogWarning> {
        let mut warnings: Vec<CatalogWarning> = Vec::new();
        for (name, config) in self.areas.iter() {
            if name.contains(TABLE_SEPARATOR) {
                warnings.push(CatalogWarning::SeparatorInName { name: name.clone() });
            }
            for channel in config.channels.iter() {
                if channel.contains(TABLE_SEPARATOR) {
                    warnings.push(CatalogWarning::SeparatorInName {
                        name: channel.clone(),
                    });
                }
            }
        }
        for (area, channel, questions) in self.rubrics.iter() {
            let known_channel = self
                .area(area)
                .map(|c| c.channels.iter().any(|x| x == channel))
                .unwrap_or(false);
            if !known_channel {
                warnings.push(CatalogWarning::RubricForUnknownChannel {
                    area: area.clone(),
                    channel: channel.clone(),
                });
            }
            let sum: u32 = questions.iter().map(|(_, w)| *w).sum();
            if sum != 100 {
                warnings.push(CatalogWarning::WeightSumNot100 {
                    area: area.clone(),
                    channel: channel.clone(),
                    sum,
                });
            }
        }
        warnings
    }
}

/// Deviations from the catalog conventions. None of these prevent scoring;
/// they flag configuration gaps worth surfacing at startup.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CatalogWarning {
    /// The rubric weights for this channel do not sum to 100, so totals
    /// cannot be read directly as percentages.
    WeightSumNot100 {
        area: String,
        channel: String,
        sum: u32,
    },
    /// An area or channel name contains the table separator, which would
    /// make its table identity ambiguous.
    SeparatorInName { name: String },
    /// A rubric was registered for a channel its area does not declare.
    RubricForUnknownChannel { area: String, channel: String },
}

impl Display for CatalogWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogWarning::WeightSumNot100 { area, channel, sum } => write!(
                f,
                "rubric weights for {} / {} sum to {} instead of 100",
                area, channel, sum
            ),
            CatalogWarning::SeparatorInName { name } => write!(
                f,
                "name {:?} contains the table separator {:?}",
                name, TABLE_SEPARATOR
            ),
            CatalogWarning::RubricForUnknownChannel { area, channel } => write!(
                f,
                "rubric registered for {} / {} but the area does not declare that channel",
                area, channel
            ),
        }
    }
}
