use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use rubric_scoring::{Dataset, RubricCatalog, ScoredRecord, COL_AREA, COL_CHANNEL};

pub mod io_csv;
pub mod table_id;

/// Failures to reach or modify the backing store. These are always
/// surfaced to the caller; the in-memory record survives a failed append,
/// so the user can retry the submission without losing it.
#[derive(Debug, Snafu)]
pub enum StoreError {
    #[snafu(display("Error creating the data directory {path}"))]
    CreatingDataDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error listing the data directory {path}"))]
    ListingDataDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the table {path}"))]
    ReadingTable { source: csv::Error, path: String },
    #[snafu(display("Error writing the table {path}"))]
    WritingTable { source: csv::Error, path: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The outcome of looking up the table for an (area, channel) pair. The
/// creation path is a first-class branch: a `Created` table has no file
/// yet and the caller writes the header together with the first row.
#[derive(Debug)]
pub enum Table {
    Created {
        path: PathBuf,
    },
    Existing {
        path: PathBuf,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Append-only storage of scored records, one CSV table per
/// (area, channel) pair under a data directory.
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Opens (and creates, if needed) the store rooted at `root`.
    pub fn open(root: &Path) -> StoreResult<RecordStore> {
        fs::create_dir_all(root).context(CreatingDataDirSnafu {
            path: root.display().to_string(),
        })?;
        Ok(RecordStore {
            root: root.to_path_buf(),
        })
    }

    pub fn table_name(area: &str, channel: &str) -> String {
        table_id::format(area, channel)
    }

    fn table_path(&self, area: &str, channel: &str) -> PathBuf {
        self.root
            .join(format!("{}.csv", table_id::format(area, channel)))
    }

    fn find_or_create_table(&self, area: &str, channel: &str) -> StoreResult<Table> {
        let path = self.table_path(area, channel);
        if !path.exists() {
            return Ok(Table::Created { path });
        }
        let (columns, rows) = io_csv::read_table(&path).context(ReadingTableSnafu {
            path: path.display().to_string(),
        })?;
        Ok(Table::Existing {
            path,
            columns,
            rows,
        })
    }

    /// Appends one record to its (area, channel) table.
    ///
    /// A missing table is created with the record's key order as header.
    /// An existing table keeps its column order; keys the table has never
    /// seen are appended at the end of the header (the schema only grows),
    /// and the header rewrite lands on disk before the data row does. The
    /// row itself is built in memory over the final column list, with
    /// blanks for columns this record does not know about, and written
    /// with a single append.
    pub fn append(&self, record: &ScoredRecord) -> StoreResult<()> {
        match self.find_or_create_table(record.area(), record.channel())? {
            Table::Created { path } => {
                let columns: Vec<String> = record.keys().map(|k| k.to_string()).collect();
                let row = build_row(record, &columns);
                info!("append: creating table {:?}", path);
                io_csv::write_table(&path, &columns, &[row]).context(WritingTableSnafu {
                    path: path.display().to_string(),
                })
            }
            Table::Existing {
                path,
                mut columns,
                mut rows,
            } => {
                let mut grew = false;
                for key in record.keys() {
                    if !columns.iter().any(|c| c == key) {
                        columns.push(key.to_string());
                        grew = true;
                    }
                }
                if grew {
                    // Realign the stored rows to the extended header before
                    // the new row is appended under it.
                    for row in rows.iter_mut() {
                        row.resize(columns.len(), String::new());
                    }
                    info!("append: extending table {:?} to {} columns", path, columns.len());
                    io_csv::write_table(&path, &columns, &rows).context(WritingTableSnafu {
                        path: path.display().to_string(),
                    })?;
                }
                let row = build_row(record, &columns);
                io_csv::append_row(&path, &row).context(WritingTableSnafu {
                    path: path.display().to_string(),
                })
            }
        }
    }

    /// Consolidates every table whose identity names a known (area,
    /// channel) pair into a single dataset.
    ///
    /// Tables with unparseable identities, unknown areas or channels, or
    /// no data rows are skipped, not errors: the data directory may hold
    /// unrelated files. Question columns of the current rubric are healed
    /// to numeric 0 so tables written under an older, shorter rubric still
    /// participate in aggregation, and the `Área`/`Canal` columns are
    /// overwritten from the table identity rather than trusted from the
    /// stored rows. An empty dataset means "no data yet", distinct from a
    /// store failure.
    pub fn load_all(&self, catalog: &RubricCatalog) -> StoreResult<Dataset> {
        let mut dataset = Dataset::empty();
        if !self.root.exists() {
            return Ok(dataset);
        }
        let entries = fs::read_dir(&self.root).context(ListingDataDirSnafu {
            path: self.root.display().to_string(),
        })?;
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry_r in entries {
            let entry = entry_r.context(ListingDataDirSnafu {
                path: self.root.display().to_string(),
            })?;
            let path = entry.path();
            if path.extension().map(|e| e == "csv").unwrap_or(false) {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(s) => s.to_string(),
                None => continue,
            };
            let (area, channel) = match table_id::parse(&stem) {
                Some(pair) => pair,
                None => {
                    debug!("load_all: skipping {:?}: not a table identity", path);
                    continue;
                }
            };
            let known = catalog
                .area(&area)
                .map(|c| c.channels.iter().any(|x| x == &channel))
                .unwrap_or(false);
            if !known {
                warn!(
                    "load_all: skipping {:?}: {} / {} is not in the catalog",
                    path, area, channel
                );
                continue;
            }
            let (mut columns, mut rows) = io_csv::read_table(&path).context(ReadingTableSnafu {
                path: path.display().to_string(),
            })?;
            if rows.is_empty() {
                continue;
            }
            heal_question_columns(&mut columns, &mut rows, catalog.rubric(&area, &channel));
            overwrite_column(&mut columns, &mut rows, COL_AREA, &area);
            overwrite_column(&mut columns, &mut rows, COL_CHANNEL, &channel);
            dataset.push_table(&columns, &rows);
        }
        info!(
            "load_all: consolidated {} rows over {} columns",
            dataset.rows.len(),
            dataset.columns.len()
        );
        Ok(dataset)
    }
}

fn build_row(record: &ScoredRecord, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|c| record.get(c).unwrap_or("").to_string())
        .collect()
}

/// Makes sure every question of the current rubric exists as a numeric
/// column: missing columns are added, and blank or non-numeric cells are
/// coerced to 0.
fn heal_question_columns(
    columns: &mut Vec<String>,
    rows: &mut [Vec<String>],
    rubric: &[(String, u32)],
) {
    for (question, _) in rubric.iter() {
        let idx = match columns.iter().position(|c| c == question) {
            Some(idx) => idx,
            None => {
                columns.push(question.clone());
                columns.len() - 1
            }
        };
        for row in rows.iter_mut() {
            if row.len() <= idx {
                row.resize(idx + 1, String::new());
            }
            let cell = row[idx].trim();
            if cell.is_empty() || cell.parse::<f64>().is_err() {
                row[idx] = "0".to_string();
            }
        }
    }
}

/// Sets `column` to `value` on every row, adding the column when the table
/// predates it. The stored values are not trusted for identity columns.
fn overwrite_column(columns: &mut Vec<String>, rows: &mut [Vec<String>], column: &str, value: &str) {
    let idx = match columns.iter().position(|c| c == column) {
        Some(idx) => idx,
        None => {
            columns.push(column.to_string());
            columns.len() - 1
        }
    };
    for row in rows.iter_mut() {
        if row.len() <= idx {
            row.resize(idx + 1, String::new());
        }
        row[idx] = value.to_string();
    }
}
