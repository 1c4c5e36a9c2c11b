use crate::dataset::Dataset;
use crate::record::{COL_CRITICAL, CRITICAL_YES};

/// The numeric reading of one cell. Blank cells carry no information and
/// are `None`; non-numeric text coerces to 0.
fn cell_score(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.parse::<f64>().unwrap_or(0.0))
}

/// True when the cell holds a strictly positive score. A blank cell is not
/// compliant, but see the column-participation rule below for how fully
/// blank columns are treated.
fn is_compliant(cell: &str) -> bool {
    cell_score(cell).map(|v| v > 0.0).unwrap_or(false)
}

fn column_participates(dataset: &Dataset, question: &str) -> bool {
    dataset.column_index(question).is_some()
        && (0..dataset.rows.len()).any(|row| cell_score(dataset.cell(row, question)).is_some())
}

fn column_compliance(dataset: &Dataset, question: &str) -> f64 {
    let compliant = (0..dataset.rows.len())
        .filter(|&row| is_compliant(dataset.cell(row, question)))
        .count();
    compliant as f64 / dataset.rows.len() as f64 * 100.0
}

/// Per-question compliance percentage: rows with a positive score over all
/// rows of the dataset.
///
/// Questions whose column is absent from the dataset, or blank on every
/// row, produce no entry at all. Callers must skip those, not read them as
/// 0%: a question that was never asked in this slice is different from one
/// that was always failed.
pub fn compliance_by_question(dataset: &Dataset, questions: &[String]) -> Vec<(String, f64)> {
    if dataset.is_empty() {
        return Vec::new();
    }
    questions
        .iter()
        .filter(|q| column_participates(dataset, q))
        .map(|q| (q.clone(), column_compliance(dataset, q)))
        .collect()
}

/// Average compliance over the participating question columns: each
/// column's compliance ratio first, then the mean of those ratios. `None`
/// when no column participates.
pub fn overall_compliance(dataset: &Dataset, questions: &[String]) -> Option<f64> {
    let per_question = compliance_by_question(dataset, questions);
    if per_question.is_empty() {
        return None;
    }
    let sum: f64 = per_question.iter().map(|(_, pct)| *pct).sum();
    Some(sum / per_question.len() as f64)
}

/// [overall_compliance] computed per distinct value of `group_key` (for
/// instance per advisor or per channel). Groups where no question column
/// participates produce no entry.
pub fn compliance_by_group(
    dataset: &Dataset,
    group_key: &str,
    questions: &[String],
) -> Vec<(String, f64)> {
    dataset
        .distinct(group_key)
        .iter()
        .filter_map(|value| {
            let slice = dataset.filter_eq(group_key, value);
            overall_compliance(&slice, questions).map(|pct| (value.clone(), pct))
        })
        .collect()
}

/// Row counts per distinct value of a column, in first-seen order.
pub fn count_by(dataset: &Dataset, column: &str) -> Vec<(String, usize)> {
    dataset
        .distinct(column)
        .iter()
        .map(|value| {
            let n = (0..dataset.rows.len())
                .filter(|&row| dataset.cell(row, column) == value)
                .count();
            (value.clone(), n)
        })
        .collect()
}

/// The number of rows flagged as critical errors.
pub fn critical_error_count(dataset: &Dataset) -> usize {
    (0..dataset.rows.len())
        .filter(|&row| dataset.cell(row, COL_CRITICAL) == CRITICAL_YES)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    // Two channels with disjoint question columns, plus one shared one.
    fn dataset() -> Dataset {
        let mut ds = Dataset::empty();
        ds.push_table(
            &s(&["Canal", "Asesor", "Error crítico", "¿Saluda?", "¿Documenta?"]),
            &[
                s(&["X", "Ana", "No", "9", "14"]),
                s(&["X", "Ana", "No", "0", "14"]),
                s(&["X", "Luis", "Sí", "0", "0"]),
            ],
        );
        ds.push_table(
            &s(&["Canal", "Asesor", "Error crítico", "¿Documenta?", "¿Cumple ANS?"]),
            &[s(&["Y", "Luis", "No", "20", "20"])],
        );
        ds
    }

    #[test]
    fn per_question_ratio_counts_positive_cells_over_all_rows() {
        let ds = dataset();
        let res = compliance_by_question(&ds, &s(&["¿Saluda?", "¿Documenta?"]));
        assert_eq!(res.len(), 2);
        assert!((res[0].1 - 25.0).abs() < 1e-9); // 1 of 4 rows
        assert!((res[1].1 - 75.0).abs() < 1e-9); // 3 of 4 rows
    }

    #[test]
    fn absent_or_fully_blank_question_yields_no_entry() {
        let ds = dataset().filter_eq("Canal", "Y");
        let res = compliance_by_question(&ds, &s(&["¿Saluda?", "¿Cumple ANS?", "¿Otra?"]));
        // ¿Saluda? is blank on every Y row, ¿Otra? has no column.
        assert_eq!(res, vec![("¿Cumple ANS?".to_string(), 100.0)]);
    }

    #[test]
    fn overall_compliance_averages_column_ratios() {
        let ds = dataset().filter_eq("Canal", "X");
        // ¿Saluda? = 1/3, ¿Documenta? = 2/3, mean = 50%.
        let res = overall_compliance(&ds, &s(&["¿Saluda?", "¿Documenta?", "¿Cumple ANS?"]));
        assert!((res.unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(overall_compliance(&Dataset::empty(), &s(&["¿Saluda?"])), None);
    }

    #[test]
    fn group_compliance_is_computed_per_slice() {
        let ds = dataset();
        let res = compliance_by_group(&ds, "Asesor", &s(&["¿Saluda?", "¿Documenta?"]));
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].0, "Ana");
        // Ana: ¿Saluda? 1/2, ¿Documenta? 2/2 -> 75%.
        assert!((res[0].1 - 75.0).abs() < 1e-9);
        // Luis: ¿Saluda? 0/2, ¿Documenta? 1/2 -> 25%.
        assert_eq!(res[1].0, "Luis");
        assert!((res[1].1 - 25.0).abs() < 1e-9);
    }

    #[test]
    fn counts_and_critical_errors() {
        let ds = dataset();
        assert_eq!(
            count_by(&ds, "Canal"),
            vec![("X".to_string(), 3), ("Y".to_string(), 1)]
        );
        assert_eq!(critical_error_count(&ds), 1);
    }

    #[test]
    fn non_numeric_cells_coerce_to_zero() {
        let mut ds = Dataset::empty();
        ds.push_table(
            &s(&["¿Saluda?"]),
            &[s(&["n/a"]), s(&["9"])],
        );
        let res = compliance_by_question(&ds, &s(&["¿Saluda?"]));
        assert!((res[0].1 - 50.0).abs() < 1e-9);
    }
}
