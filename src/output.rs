use crate::error::{ReportError, ReportResult};
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn ensure_dir(dir: &Path) -> ReportResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::CreateOutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> ReportResult<()> {
    let csv_err = |source: csv::Error| ReportError::WriteCsv {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    for r in rows {
        wtr.serialize(r).map_err(csv_err)?;
    }
    wtr.flush().map_err(|e| csv_err(e.into()))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "csv written");
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> ReportResult<()> {
    let s = serde_json::to_string_pretty(value).map_err(ReportError::SerializeJson)?;
    std::fs::write(path, s).map_err(|source| ReportError::WriteJson {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "json written");
    Ok(())
}

/// Markdown table of the first `max_rows` rows, or a placeholder line.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table<T>(section_no: usize, title: &str, note: Option<&str>, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("Section {}: {}", section_no, title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    println!("{}", render_table(rows, max_rows));
    if rows.len() > max_rows {
        println!("... {} more", rows.len() - max_rows);
    }
    println!();
}
