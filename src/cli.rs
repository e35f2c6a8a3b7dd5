use std::path::PathBuf;

use clap::Parser;

/// Tzolk'in, Human Design style and biorhythm readings for a birth date.
#[derive(Parser, Debug)]
#[command(name = "birth-profile", version)]
pub struct Cli {
    /// Birth date as YYYY-MM-DD. Required unless --request is given.
    pub date: Option<String>,

    /// Birth time as HH:MM or HH:MM:SS.
    #[arg(short, long)]
    pub time: Option<String>,

    /// Birth location, free text.
    #[arg(short, long)]
    pub location: Option<String>,

    /// JSON request body with birthDate, birthTime and birthLocation.
    /// All three are required.
    #[arg(short, long, conflicts_with_all = ["date", "time", "location"])]
    pub request: Option<PathBuf>,

    /// TOML engine configuration.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also print daily biorhythm values for a month, YYYY-MM.
    #[arg(long, value_name = "YYYY-MM")]
    pub chart: Option<String>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Splits `YYYY-MM` into year and month.
pub fn parse_year_month(input: &str) -> Option<(i32, u32)> {
    let (year, month) = input.trim().rsplit_once('-')?;
    let year = year.parse().ok()?;
    let month = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_month() {
        assert_eq!(parse_year_month("2024-02"), Some((2024, 2)));
        assert_eq!(parse_year_month("-500-11"), Some((-500, 11)));
        assert_eq!(parse_year_month("2024-13"), None);
        assert_eq!(parse_year_month("2024"), None);
    }

    #[test]
    fn request_conflicts_with_positional_date() {
        let parsed = Cli::try_parse_from(["birth-profile", "2000-01-01", "--request", "r.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["birth-profile", "-vv", "1990-05-15"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.date.as_deref(), Some("1990-05-15"));
    }
}
