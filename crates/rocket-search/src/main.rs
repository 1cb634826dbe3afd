//! Rocket Search CLI
//!
//! Usage:
//!     rocket-search cities L --near 39.7765868,-110.9905245 --exclude london
//!     rocket-search starports port --sample --limit 3

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use itertools::Itertools;
use rocket_search::{
    CITY, EntityAdapter, GeoPoint, ProximitySearcher, STARPORT, TestDataConfig, data::DATA_DIR,
    init_logging,
};
use tracing::{Level, info};

/// Find the cities or starports closest to a point
#[derive(Debug, Parser)]
#[command(name = "rocket-search")]
#[command(version)]
#[command(about = "Proximity search over Rocket Rental cities and starports", long_about = None)]
struct Cli {
    /// Table to search
    #[arg(value_enum)]
    table: Table,

    /// Substring to match; empty matches every row
    #[arg(default_value = "")]
    query: String,

    /// Reference point as LAT,LON
    #[arg(long, value_name = "LAT,LON", value_parser = parse_point, allow_hyphen_values = true)]
    near: Option<GeoPoint>,

    /// Id to leave out of the results (repeatable)
    #[arg(long, value_name = "ID")]
    exclude: Vec<String>,

    /// Maximum number of results
    #[arg(short, long)]
    limit: Option<usize>,

    /// Search the bundled fixture tables instead of the data directory
    #[arg(long)]
    sample: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Table {
    Cities,
    Starports,
}

impl Table {
    const fn adapter(self) -> EntityAdapter {
        match self {
            Self::Cities => CITY,
            Self::Starports => STARPORT,
        }
    }
}

fn parse_point(value: &str) -> Result<GeoPoint> {
    let (lat, lon) = value
        .split_once(',')
        .with_context(|| format!("expected LAT,LON, got {value:?}"))?;
    let lat: f64 = lat.trim().parse().context("latitude is not a number")?;
    let lon: f64 = lon.trim().parse().context("longitude is not a number")?;
    Ok(GeoPoint::new(lat, lon)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Level::INFO)?;

    let searcher = if cli.sample {
        ProximitySearcher::new_sample(&TestDataConfig::sample())?
    } else {
        ProximitySearcher::from_default_data_dir()
            .with_context(|| format!("loading tables from {}", DATA_DIR.display()))?
    };

    let adapter = cli.table.adapter();
    let mut request = searcher.request(cli.query).exclude_all(cli.exclude);
    if let Some(limit) = cli.limit {
        request = request.with_limit(limit);
    }
    if let Some(point) = cli.near {
        request = request.near(point);
    }
    info!(table = adapter.table, "Searching");

    let results = searcher.search(&adapter, &request)?;
    if results.is_empty() {
        println!("no matches");
        return Ok(());
    }
    let lines = results.iter().map(|hit| match hit.distance {
        Some(miles) => format!("{:<12} {:<40} {miles:>10.2} mi", hit.id, hit.display_name),
        None => format!("{:<12} {}", hit.id, hit.display_name),
    });
    println!("{}", lines.format("\n"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("rocket-search").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = parse(&[
            "cities",
            "L",
            "--near",
            "39.7765868,-110.9905245",
            "--exclude",
            "london",
            "--exclude",
            "007",
            "--limit",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.table.adapter(), CITY);
        assert_eq!(cli.query, "L");
        assert_eq!(
            cli.near,
            Some(GeoPoint::new_unchecked(39.7765868, -110.9905245))
        );
        assert_eq!(cli.exclude, vec!["london", "007"]);
        assert_eq!(cli.limit, Some(3));
        assert!(!cli.sample);
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["starports", "--sample"]).unwrap();
        assert_eq!(cli.table, Table::Starports);
        assert_eq!(cli.table.adapter(), STARPORT);
        assert!(cli.query.is_empty());
        assert!(cli.near.is_none());
        assert!(cli.exclude.is_empty());
        assert!(cli.sample);
    }

    #[test]
    fn test_negative_latitude_is_a_value() {
        let cli = parse(&["cities", "--near", "-33.9249,18.4241"]).unwrap();
        assert_eq!(cli.near, Some(GeoPoint::new_unchecked(-33.9249, 18.4241)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["moons"]).is_err());
        assert!(parse(&["starports", "--near", "95,0"]).is_err());
        assert!(parse(&["starports", "--near", "40.7"]).is_err());
        assert!(parse(&["starports", "--limit", "many"]).is_err());
        assert!(parse(&["starports", "--bogus"]).is_err());
    }
}
