use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use polars::prelude::*;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::record::{Itinerary, REQUIRED_FIELDS};

/// Format of the dated output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Fixed five-column table, one row per itinerary
    Csv,

    /// The full records as a pretty-printed array
    #[default]
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ext = match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", ext)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::Config(format!(
                "Unknown output format '{}', expected csv or json",
                s
            ))),
        }
    }
}

/// `<YYYY-MM-DD>_output.<ext>`
pub fn file_name(format: OutputFormat, date: NaiveDate) -> String {
    format!("{}_output.{}", date.format("%Y-%m-%d"), format)
}

/// Writes today's output file into `dir`, creating the directory if needed.
/// An existing file for the same day is overwritten.
pub fn write_records(dir: &Path, format: OutputFormat, records: &[Itinerary]) -> Result<PathBuf> {
    write_records_on(dir, format, records, Local::now().date_naive())
}

pub fn write_records_on(
    dir: &Path,
    format: OutputFormat,
    records: &[Itinerary],
    date: NaiveDate,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(format, date));

    let file = File::create(&path)?;
    match format {
        OutputFormat::Csv => write_csv(file, records)?,
        OutputFormat::Json => write_json(file, records)?,
    }

    info!(path = %path.display(), records = records.len(), "wrote itineraries");
    Ok(path)
}

fn write_json<W: Write>(writer: W, records: &[Itinerary]) -> Result<()> {
    let mut writer = BufWriter::new(writer);

    let mut ser =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}

fn write_csv<W: Write>(mut writer: W, records: &[Itinerary]) -> Result<()> {
    let mut df = as_polars_df(records)?;

    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(&mut df)?;
    writer.flush()?;

    Ok(())
}

/// One string column per required field. Absent and `null` values are
/// nulls, which the CSV writer emits as empty cells.
pub fn as_polars_df(records: &[Itinerary]) -> Result<DataFrame> {
    let columns = REQUIRED_FIELDS
        .iter()
        .map(|field| {
            let values: Vec<Option<String>> =
                records.iter().map(|r| cell_text(r.get(field))).collect();
            Series::new((*field).into(), values)
        })
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
