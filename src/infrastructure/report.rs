use crate::application::Session;
use crate::domain::{HistoryRow, RowStatus, SummaryRow};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Both tables of a finished session.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub history: Vec<HistoryRow>,
    pub summary: SummaryRow,
}

impl SessionReport {
    pub fn from_session(session: &Session) -> Self {
        Self {
            history: session.history().iter().map(|attempt| attempt.to_row()).collect(),
            summary: session.summary().to_row(),
        }
    }
}

/// Writes session reports to disk.
pub struct ReportWriter;

impl ReportWriter {
    /// Writes the report to `path`; a `.json` extension selects JSON, anything
    /// else CSV. Returns the path on success for status display.
    pub fn write(session: &Session, path: &Path) -> Result<String, ReportError> {
        let report = SessionReport::from_session(session);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let file = BufWriter::new(File::create(path)?);
        if is_json {
            Self::write_json(&report, file)?;
        } else {
            Self::write_csv(&report, file)?;
        }

        Ok(path.display().to_string())
    }

    pub fn write_json<W: Write>(report: &SessionReport, mut writer: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut writer, report)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// History table, a blank line, then the summary table.
    pub fn write_csv<W: Write>(report: &SessionReport, mut writer: W) -> Result<(), ReportError> {
        {
            let mut csv_writer = csv::Writer::from_writer(&mut writer);
            csv_writer.write_record(HistoryRow::HEADERS.iter().chain(["Status"].iter()))?;
            for row in &report.history {
                let status = match row.status {
                    RowStatus::Ok => "ok",
                    RowStatus::Error => "error",
                };
                csv_writer.write_record(row.cells().iter().chain([status].iter()))?;
            }
            csv_writer.flush()?;
        }

        writeln!(writer)?;

        {
            let mut csv_writer = csv::Writer::from_writer(&mut writer);
            csv_writer.serialize(&report.summary)?;
            csv_writer.flush()?;
        }

        writer.flush()?;
        Ok(())
    }
}
