// Primitives for reading and writing the per-table CSV files.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use log::debug;

/// Reads a whole table: the header row and the data rows. Rows may be
/// shorter or longer than the header when the file was written under an
/// older column list; callers realign them.
pub fn read_table(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), csv::Error> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut header: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, record_r) in rdr.into_records().enumerate() {
        let record = record_r?;
        let cells: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        if idx == 0 {
            header = cells;
        } else {
            rows.push(cells);
        }
    }
    debug!(
        "read_table: {:?}: {} columns, {} rows",
        path,
        header.len(),
        rows.len()
    );
    Ok((header, rows))
}

/// Rewrites a whole table through a temporary file and an atomic rename,
/// so a failed write never leaves the table without a usable header.
pub fn write_table(
    path: &Path,
    header: &[String],
    rows: &[Vec<String>],
) -> Result<(), csv::Error> {
    let tmp: PathBuf = path.with_extension("csv.tmp");
    {
        let mut wtr = csv::Writer::from_path(&tmp)?;
        wtr.write_record(header)?;
        for row in rows.iter() {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
    }
    fs::rename(&tmp, path)?;
    debug!(
        "write_table: {:?}: {} columns, {} rows",
        path,
        header.len(),
        rows.len()
    );
    Ok(())
}

/// Appends a single data row to an existing table file.
pub fn append_row(path: &Path, row: &[String]) -> Result<(), csv::Error> {
    let file = OpenOptions::new().append(true).open(path)?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(row)?;
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn write_read_append_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        write_table(&path, &s(&["a", "b"]), &[s(&["1", "2"])]).unwrap();
        append_row(&path, &s(&["3", "4"])).unwrap();
        let (header, rows) = read_table(&path).unwrap();
        assert_eq!(header, s(&["a", "b"]));
        assert_eq!(rows, vec![s(&["1", "2"]), s(&["3", "4"])]);
        // No leftover temporary file.
        assert!(!dir.path().join("t.csv.tmp").exists());
    }

    #[test]
    fn quoted_cells_survive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let header = s(&["Área", "¿Documenta la atención, con redacción?"]);
        let row = s(&["CASA UR", "14"]);
        write_table(&path, &header, &[row.clone()]).unwrap();
        let (h, rows) = read_table(&path).unwrap();
        assert_eq!(h, header);
        assert_eq!(rows, vec![row]);
    }
}
