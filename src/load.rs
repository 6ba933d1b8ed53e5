//! CSV ingestion: normalizes the utility's interval-usage export into a
//! [`UsageSeries`]. The engine never sees raw formats.

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::{
    engine::{
        cycles::CycleStart,
        series::{UsageRecord, UsageSeries},
    },
    prelude::*,
    quantity::energy::KilowattHours,
};

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "DATE")]
    date: String,

    #[serde(rename = "START TIME")]
    start_time: String,

    #[serde(rename = "END TIME")]
    end_time: String,

    #[serde(rename = "USAGE")]
    usage: f64,
}

/// Loads and normalizes a usage export.
///
/// Exports downloaded from the customer portal open with two metadata
/// lines (the first starts with `ADDRESS`) before the real header; those
/// are stripped here. Times come in either 12-hour `03:00 PM` or 24-hour
/// `15:00` form and are normalized to 24-hour.
pub fn usage_series(path: &Path) -> Result<UsageSeries> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut first_line = String::new();
    reader.read_line(&mut first_line)?;
    if first_line.starts_with("ADDRESS") {
        let mut second_line = String::new();
        reader.read_line(&mut second_line)?;
    } else {
        // Not a metadata prologue: the line was the header, put it back.
        reader = rewind(path)?;
    }

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, raw) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = raw.with_context(|| format!("malformed row {}", index + 1))?;
        records.push(
            normalize(&raw).with_context(|| format!("malformed row {}", index + 1))?,
        );
    }
    ensure!(!records.is_empty(), "{} contains no usage records", path.display());

    info!(n_records = records.len(), path = %path.display(), "loaded usage export");
    Ok(UsageSeries::new(records))
}

fn rewind(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

fn normalize(raw: &RawRecord) -> Result<UsageRecord> {
    ensure!(raw.usage >= 0.0, "negative usage `{}`", raw.usage);
    Ok(UsageRecord {
        date: NaiveDate::parse_from_str(&raw.date, "%m/%d/%Y")
            .with_context(|| format!("unparseable date `{}`", raw.date))?,
        start_time: parse_time(&raw.start_time)?,
        end_time: parse_time(&raw.end_time)?,
        usage: KilowattHours::from(raw.usage),
    })
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .with_context(|| format!("unparseable time `{value}`"))
}

/// Reads billing cycle start dates from a text file, one `MM/DD/YYYY`
/// date per line. Blank lines and `#` comments are skipped.
pub fn cycle_starts(reader: impl Read) -> Result<Vec<CycleStart>> {
    BufReader::new(reader)
        .lines()
        .map(|line| line.context("failed to read date file"))
        .filter_map(|line| match line {
            Ok(line) => {
                let line = line.trim().to_string();
                (!line.is_empty() && !line.starts_with('#')).then_some(Ok(line))
            }
            Err(error) => Some(Err(error)),
        })
        .map(|line| CycleStart::parse(&line?))
        .collect()
}
