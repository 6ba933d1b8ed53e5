use std::path::PathBuf;

use clap::Parser;

/// Estimate electricity cost under the Basic, Time-of-Use, and Peak
/// Demand rate plans from an interval-usage export.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Interval-usage CSV export.
    #[clap(short, long, env = "WATTSON_INFILE")]
    pub infile: PathBuf,

    /// Comma-delimited billing cycle start dates in `MM/DD/YYYY` form.
    ///
    /// Omit both this and `--date-file` to treat the whole export as a
    /// single billing cycle.
    #[clap(short, long, value_delimiter = ',', conflicts_with = "date_file")]
    pub dates: Vec<String>,

    /// File with one billing cycle start date per line.
    #[clap(long)]
    pub date_file: Option<PathBuf>,

    /// Rate book TOML overriding the built-in residential rates.
    #[clap(long, env = "WATTSON_RATES")]
    pub rates: Option<PathBuf>,

    /// Print only the final comparison table.
    #[clap(short, long)]
    pub silent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_conflict_with_date_file() {
        let result = Args::try_parse_from([
            "wattson",
            "--infile",
            "usage.csv",
            "--dates",
            "05/11/2022",
            "--date-file",
            "dates.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_dates_are_comma_delimited() {
        let args = Args::try_parse_from([
            "wattson",
            "--infile",
            "usage.csv",
            "--dates",
            "05/11/2022,06/10/2022",
        ])
        .unwrap();
        assert_eq!(args.dates, vec!["05/11/2022", "06/10/2022"]);
    }
}
