mod cli;
mod logging;

use std::fs;
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::info;

use birth_profile::{BirthData, BirthRequest, EngineConfig, ProfileEngine, ProfileError};

use crate::cli::{parse_year_month, Cli};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let engine = ProfileEngine::new(&config)?;
    let birth = birth_data(&cli)?;
    let profile = engine.analyze(&birth);

    let chart = match cli.chart.as_deref() {
        Some(spec) => {
            let (year, month) = parse_year_month(spec)
                .ok_or_else(|| anyhow!("invalid --chart {spec:?}, expected YYYY-MM"))?;
            Some(engine.biorhythm_chart(&birth, year, month)?)
        }
        None => None,
    };
    info!(target: "profile_engine", "{}", engine.metrics().report());

    if cli.json {
        let output = json!({
            "birth": birth,
            "analysis": profile,
            "chart": chart,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("📆 Birth Date: {}", birth.date);
    if let Some(time) = birth.time {
        println!("🕰 Birth Time: {}", time.format("%H:%M"));
    }
    if let Some(location) = &birth.location {
        println!("📍 Birth Location: {location}");
    }
    println!("🔢 Julian Day Number: {}", birth.date.julian_day_number());
    println!("🕰 Days since 0.0.0.0.0: {}", birth.date.days_since_mayan_epoch());
    print!("{profile}");

    if let Some(chart) = chart {
        println!("\n📈 Biorhythm chart:");
        for reading in chart {
            println!(
                "{}  P {:+.2}  E {:+.2}  I {:+.2}  avg {:+.2}",
                reading.date,
                reading.physical,
                reading.emotional,
                reading.intellectual,
                reading.average()
            );
        }
    }
    Ok(())
}

/// Birth data from `--request` or from DATE plus the optional flags.
/// Without either there is no birth date, and nothing is guessed.
fn birth_data(cli: &Cli) -> Result<BirthData> {
    if let Some(path) = &cli.request {
        let body = fs::read_to_string(path)
            .with_context(|| format!("failed to read request {}", path.display()))?;
        return Ok(BirthRequest::from_json(&body)?.into_birth_data()?);
    }

    let date = cli.date.as_deref().ok_or(ProfileError::MissingBirthData)?;
    Ok(BirthData::parse(date, cli.time.as_deref(), cli.location.as_deref())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_error(args: &[&str]) -> Option<ProfileError> {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        birth_data(&cli)
            .unwrap_err()
            .downcast_ref::<ProfileError>()
            .cloned()
    }

    #[test]
    fn no_date_is_rejected() {
        assert_eq!(
            profile_error(&["birth-profile"]),
            Some(ProfileError::MissingBirthData)
        );
    }

    #[test]
    fn time_and_location_without_date_are_rejected() {
        let err = profile_error(&["birth-profile", "--time", "08:00", "--location", "Lisbon"]);
        assert_eq!(err, Some(ProfileError::MissingBirthData));
        assert_eq!(
            ProfileError::MissingBirthData.to_string(),
            "missing birth date, time, or location"
        );
    }

    #[test]
    fn positional_date_with_flags() {
        let args = ["birth-profile", "1990-05-15", "-t", "08:00", "-l", "Lisbon"];
        let cli = Cli::try_parse_from(args).unwrap();
        let birth = birth_data(&cli).unwrap();
        assert_eq!(birth.date.to_string(), "1990-05-15");
        assert_eq!(birth.location.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn request_file_goes_through_strict_boundary() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{"birthTime":"08:00","birthLocation":"Lisbon"}"#).unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(
            profile_error(&["birth-profile", "--request", path]),
            Some(ProfileError::MissingBirthData)
        );
    }
}
