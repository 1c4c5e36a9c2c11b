use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::record::COL_DATE;

/// A consolidated tabular dataset: an ordered column list and rows of
/// stringified cells aligned to it. Rows may be shorter than the column
/// list; missing cells read as blank.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn empty() -> Dataset {
        Dataset::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The cell at (row, column name), blank when the column is unknown or
    /// the row is shorter than the column list.
    pub fn cell(&self, row: usize, column: &str) -> &str {
        match self.column_index(column) {
            Some(idx) => self
                .rows
                .get(row)
                .and_then(|r| r.get(idx))
                .map(|s| s.as_str())
                .unwrap_or(""),
            None => "",
        }
    }

    /// Appends one table worth of rows, extending the column list with the
    /// table's novel columns and realigning the incoming rows to the merged
    /// column order.
    pub fn push_table(&mut self, columns: &[String], rows: &[Vec<String>]) {
        for c in columns.iter() {
            if self.column_index(c).is_none() {
                self.columns.push(c.clone());
            }
        }
        let mapping: Vec<usize> = columns
            .iter()
            .map(|c| self.column_index(c).unwrap())
            .collect();
        for row in rows.iter() {
            let mut aligned = vec![String::new(); self.columns.len()];
            for (src, dst) in mapping.iter().enumerate() {
                if let Some(v) = row.get(src) {
                    aligned[*dst] = v.clone();
                }
            }
            self.rows.push(aligned);
        }
        debug!(
            "push_table: {} columns, {} rows total",
            self.columns.len(),
            self.rows.len()
        );
    }

    /// The columns that hold rubric questions. Question texts are the only
    /// columns containing the opening question mark.
    pub fn question_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.contains('¿'))
            .cloned()
            .collect()
    }

    /// Distinct non-blank values of a column, in first-seen order.
    pub fn distinct(&self, column: &str) -> Vec<String> {
        let mut res: Vec<String> = Vec::new();
        if let Some(idx) = self.column_index(column) {
            for row in self.rows.iter() {
                let v = row.get(idx).map(|s| s.as_str()).unwrap_or("");
                if !v.is_empty() && !res.iter().any(|x| x == v) {
                    res.push(v.to_string());
                }
            }
        }
        res
    }

    /// Rows whose cell in `column` equals `value` exactly.
    pub fn filter_eq(&self, column: &str, value: &str) -> Dataset {
        self.filter_rows(|ds, row| ds.cell(row, column) == value)
    }

    /// Rows whose `Fecha` parses as `YYYY-MM-DD` and falls in `year`.
    pub fn filter_year(&self, year: i32) -> Dataset {
        self.filter_rows(|ds, row| {
            parse_date(ds.cell(row, COL_DATE))
                .map(|d| d.year() == year)
                .unwrap_or(false)
        })
    }

    /// Rows whose `Fecha` parses as `YYYY-MM-DD` and falls in `month` (1-12).
    pub fn filter_month(&self, month: u32) -> Dataset {
        self.filter_rows(|ds, row| {
            parse_date(ds.cell(row, COL_DATE))
                .map(|d| d.month() == month)
                .unwrap_or(false)
        })
    }

    fn filter_rows<F>(&self, keep: F) -> Dataset
    where
        F: Fn(&Dataset, usize) -> bool,
    {
        Dataset {
            columns: self.columns.clone(),
            rows: (0..self.rows.len())
                .filter(|&i| keep(self, i))
                .map(|i| self.rows[i].clone())
                .collect(),
        }
    }
}

/// Parses a `YYYY-MM-DD` cell. Anything else, including blanks, is `None`.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    fn base() -> Dataset {
        let mut ds = Dataset::empty();
        ds.push_table(
            &s(&["Área", "Canal", "Fecha", "¿Saluda?"]),
            &[
                s(&["A", "X", "2026-01-15", "40"]),
                s(&["A", "X", "2026-02-10", "0"]),
            ],
        );
        ds
    }

    #[test]
    fn push_table_extends_columns_and_realigns() {
        let mut ds = base();
        ds.push_table(
            &s(&["Área", "Canal", "¿Resuelve?", "Fecha"]),
            &[s(&["A", "Y", "60", "2025-02-01"])],
        );
        assert_eq!(
            ds.columns,
            s(&["Área", "Canal", "Fecha", "¿Saluda?", "¿Resuelve?"])
        );
        assert_eq!(ds.rows.len(), 3);
        // The new table's row is aligned to the merged column order.
        assert_eq!(ds.cell(2, "Fecha"), "2025-02-01");
        assert_eq!(ds.cell(2, "¿Resuelve?"), "60");
        // Historical rows read blank for the new column.
        assert_eq!(ds.cell(0, "¿Resuelve?"), "");
    }

    #[test]
    fn question_columns_are_detected_by_text() {
        let ds = base();
        assert_eq!(ds.question_columns(), s(&["¿Saluda?"]));
    }

    #[test]
    fn cell_is_blank_for_unknown_column_or_short_row() {
        let mut ds = base();
        ds.rows[0].truncate(2);
        assert_eq!(ds.cell(0, "Fecha"), "");
        assert_eq!(ds.cell(0, "No existe"), "");
    }

    #[test]
    fn filters_slice_rows() {
        let mut ds = base();
        ds.push_table(
            &s(&["Área", "Canal", "Fecha", "¿Saluda?"]),
            &[s(&["A", "Y", "not-a-date", "40"])],
        );
        assert_eq!(ds.filter_eq("Canal", "X").rows.len(), 2);
        assert_eq!(ds.filter_year(2026).rows.len(), 2);
        assert_eq!(ds.filter_month(2).rows.len(), 1);
        // Unparseable dates drop out of the date filters only.
        assert_eq!(ds.filter_eq("Canal", "Y").rows.len(), 1);
        assert_eq!(ds.filter_year(2025).rows.len(), 0);
    }

    #[test]
    fn distinct_preserves_first_seen_order() {
        let mut ds = base();
        ds.push_table(
            &s(&["Área", "Canal", "Fecha", "¿Saluda?"]),
            &[s(&["A", "Y", "2026-03-01", "40"])],
        );
        assert_eq!(ds.distinct("Canal"), s(&["X", "Y"]));
    }
}
