use crate::ScoreOutcome;

// Fixed metadata columns, in the order they appear in every stored row.
pub const COL_AREA: &str = "Área";
pub const COL_MONITOR: &str = "Monitor";
pub const COL_ADVISOR: &str = "Asesor";
pub const COL_CODE: &str = "Código";
pub const COL_DATE: &str = "Fecha";
pub const COL_CHANNEL: &str = "Canal";
pub const COL_CRITICAL: &str = "Error crítico";
pub const COL_TOTAL: &str = "Total";
pub const COL_POSITIVES: &str = "Aspectos positivos";
pub const COL_IMPROVEMENTS: &str = "Aspectos por Mejorar";

// Literal encodings for the critical-error flag. Existing tables already
// hold these values, so they must be preserved exactly.
pub const CRITICAL_YES: &str = "Sí";
pub const CRITICAL_NO: &str = "No";

/// One completed monitoring session, flattened to an ordered list of
/// (column, value) pairs: the fixed metadata block first, then one numeric
/// column per rubric question. Immutable once built; the store serializes
/// it key by key.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoredRecord {
    fields: Vec<(String, String)>,
}

impl ScoredRecord {
    /// The column names, in record order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn area(&self) -> &str {
        self.get(COL_AREA).unwrap_or("")
    }

    pub fn channel(&self) -> &str {
        self.get(COL_CHANNEL).unwrap_or("")
    }
}

/// Assembles a [ScoredRecord] from the session metadata and a scoring
/// outcome.
///
/// ```
/// use rubric_scoring::{RecordBuilder, ScoreOutcome};
///
/// let outcome = ScoreOutcome {
///     per_question: vec![("¿Saluda?".to_string(), 40)],
///     total: 40,
/// };
/// let record = RecordBuilder::new("CASA UR", "Chat")
///     .monitor("Cristian Alberto Upegui M")
///     .advisor("Adela Bogotá Cagua")
///     .interaction_code("INT-001")
///     .date("2026-08-20")
///     .critical_error(false)
///     .positives("Buen manejo del saludo")
///     .improvements("Cerrar con la encuesta")
///     .build(&outcome);
/// assert_eq!(record.get("Total"), Some("40"));
/// assert_eq!(record.get("¿Saluda?"), Some("40"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    area: String,
    channel: String,
    monitor: String,
    advisor: String,
    interaction_code: String,
    date: String,
    critical_error: bool,
    positives: String,
    improvements: String,
}

impl RecordBuilder {
    pub fn new(area: &str, channel: &str) -> RecordBuilder {
        RecordBuilder {
            area: area.to_string(),
            channel: channel.to_string(),
            ..RecordBuilder::default()
        }
    }

    pub fn monitor(mut self, monitor: &str) -> RecordBuilder {
        self.monitor = monitor.to_string();
        self
    }

    pub fn advisor(mut self, advisor: &str) -> RecordBuilder {
        self.advisor = advisor.to_string();
        self
    }

    pub fn interaction_code(mut self, code: &str) -> RecordBuilder {
        self.interaction_code = code.to_string();
        self
    }

    /// The interaction date, already encoded as `YYYY-MM-DD`.
    pub fn date(mut self, date: &str) -> RecordBuilder {
        self.date = date.to_string();
        self
    }

    pub fn critical_error(mut self, critical_error: bool) -> RecordBuilder {
        self.critical_error = critical_error;
        self
    }

    pub fn positives(mut self, positives: &str) -> RecordBuilder {
        self.positives = positives.to_string();
        self
    }

    pub fn improvements(mut self, improvements: &str) -> RecordBuilder {
        self.improvements = improvements.to_string();
        self
    }

    pub fn build(self, outcome: &ScoreOutcome) -> ScoredRecord {
        let critical = if self.critical_error {
            CRITICAL_YES
        } else {
            CRITICAL_NO
        };
        let mut fields: Vec<(String, String)> = vec![
            (COL_AREA.to_string(), self.area),
            (COL_MONITOR.to_string(), self.monitor),
            (COL_ADVISOR.to_string(), self.advisor),
            (COL_CODE.to_string(), self.interaction_code),
            (COL_DATE.to_string(), self.date),
            (COL_CHANNEL.to_string(), self.channel),
            (COL_CRITICAL.to_string(), critical.to_string()),
            (COL_TOTAL.to_string(), outcome.total.to_string()),
            (COL_POSITIVES.to_string(), self.positives),
            (COL_IMPROVEMENTS.to_string(), self.improvements),
        ];
        for (question, awarded) in outcome.per_question.iter() {
            fields.push((question.clone(), awarded.to_string()));
        }
        ScoredRecord { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> ScoreOutcome {
        ScoreOutcome {
            per_question: vec![("¿Saluda?".to_string(), 40), ("¿Resuelve?".to_string(), 0)],
            total: 40,
        }
    }

    fn record(critical: bool) -> ScoredRecord {
        RecordBuilder::new("CASA UR", "Chat")
            .monitor("M1")
            .advisor("A1")
            .interaction_code("C-42")
            .date("2026-08-20")
            .critical_error(critical)
            .positives("ok")
            .improvements("more")
            .build(&outcome())
    }

    #[test]
    fn metadata_block_comes_first_in_fixed_order() {
        let r = record(false);
        let keys: Vec<&str> = r.keys().collect();
        assert_eq!(
            &keys[..10],
            vec![
                COL_AREA,
                COL_MONITOR,
                COL_ADVISOR,
                COL_CODE,
                COL_DATE,
                COL_CHANNEL,
                COL_CRITICAL,
                COL_TOTAL,
                COL_POSITIVES,
                COL_IMPROVEMENTS,
            ]
        );
    }

    #[test]
    fn question_scores_follow_metadata() {
        let r = record(false);
        let keys: Vec<&str> = r.keys().collect();
        assert_eq!(&keys[10..], &["¿Saluda?", "¿Resuelve?"]);
        assert_eq!(r.get("¿Saluda?"), Some("40"));
        assert_eq!(r.get("¿Resuelve?"), Some("0"));
    }

    #[test]
    fn critical_flag_uses_locale_literals() {
        assert_eq!(record(true).get(COL_CRITICAL), Some(CRITICAL_YES));
        assert_eq!(record(false).get(COL_CRITICAL), Some(CRITICAL_NO));
    }

    #[test]
    fn accessors_read_identity_fields() {
        let r = record(false);
        assert_eq!(r.area(), "CASA UR");
        assert_eq!(r.channel(), "Chat");
        assert_eq!(r.get("No existe"), None);
    }
}
