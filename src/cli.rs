//! Command line entry point

use crate::comparator::{ClimateComparator, MonthTable};
use crate::config::ClimateConfig;
use crate::location_resolver::LocationResolver;
use crate::open_meteo::OpenMeteoClient;
use crate::weather::WeatherDataSource;
use crate::{ClimateError, logging, report};
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "climate-compare")]
#[command(about = "Compare today's forecast temperature with the month's historical extremes")]
#[command(version)]
pub struct Cli {
    /// Place name to look up, e.g. "La Jolla"
    pub city: String,

    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12), help = "Month to compare against (1-12) [default: current month]")]
    pub month: Option<u32>,

    #[arg(short, long, help = "Historical year [default: from config, 2023]")]
    pub year: Option<i32>,

    #[arg(short, long, help = "Config file path [default: climate-compare.toml]")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Count February 29 when slicing months of a leap year")]
    pub leap_aware: bool,

    #[arg(long, help = "Do not read or write the response cache")]
    pub no_cache: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = ClimateConfig::load_from_path(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose)?;

    let stdout = io::stdout();
    run_with(config, &cli, &mut stdout.lock()).await
}

/// Resolve, fetch, compare and write the report to `out`
pub async fn run_with(mut config: ClimateConfig, cli: &Cli, out: &mut impl Write) -> Result<()> {
    if cli.no_cache {
        config.cache.enabled = false;
    }
    debug!("Using configuration: {:?}", config);

    let month = cli.month.unwrap_or_else(|| Local::now().month());
    let year = cli.year.unwrap_or(config.defaults.year);
    let month_table =
        MonthTable::from_leap_aware(cli.leap_aware || config.defaults.leap_aware_months);

    let client = OpenMeteoClient::new(&config)?;

    let coordinates = LocationResolver::new(&client)
        .resolve(&cli.city)
        .await?
        .ok_or_else(|| ClimateError::location_not_found(&cli.city))?;
    info!("Comparing {} at {} for {}/{}", cli.city, coordinates, month, year);

    let source = WeatherDataSource::new(&client);
    let forecast = source.fetch_forecast(&coordinates).await?;

    let mut comparator =
        ClimateComparator::new(&cli.city, coordinates, source).with_month_table(month_table);
    let extremes = comparator.load_historical_context(month, year).await?;

    let day = comparator.classify_day_temperature(forecast.max_day_temp)?;
    let night = comparator.classify_night_temperature(forecast.min_day_temp)?;

    report::write_header(out, comparator.city_name(), &coordinates, month, year, &forecast)
        .and_then(|()| report::write_extremes(out, &extremes))
        .and_then(|()| writeln!(out))
        .and_then(|()| report::write_comparison(out, &day))
        .and_then(|()| writeln!(out))
        .and_then(|()| report::write_comparison(out, &night))
        .and_then(|()| out.flush())
        .map_err(ClimateError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["climate-compare", "La Jolla"]).unwrap();
        assert_eq!(cli.city, "La Jolla");
        assert_eq!(cli.month, None);
        assert!(!cli.leap_aware);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "climate-compare",
            "Huntington Beach",
            "--month",
            "12",
            "--year",
            "2022",
            "--leap-aware",
            "--no-cache",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.month, Some(12));
        assert_eq!(cli.year, Some(2022));
        assert!(cli.leap_aware && cli.no_cache && cli.verbose);
    }

    #[test]
    fn test_rejects_month_out_of_range() {
        assert!(Cli::try_parse_from(["climate-compare", "Irvine", "--month", "13"]).is_err());
        assert!(Cli::try_parse_from(["climate-compare", "Irvine", "--month", "0"]).is_err());
    }

    #[test]
    fn test_requires_city() {
        assert!(Cli::try_parse_from(["climate-compare"]).is_err());
    }
}
