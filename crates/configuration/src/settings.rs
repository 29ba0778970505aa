use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: Server,
    pub data: Data,
    pub analysis: Analysis,
    pub companies: Vec<Company>,
    pub rate_sources: Vec<RateSource>,
}

impl Config {
    /// Looks up a configured company by its identifier.
    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }
}

/// Binding parameters of the HTTP API.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

/// Where the CSV store keeps its filings and rate files, and how long a
/// fetched rate window stays cached.
#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    pub dir: PathBuf,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

/// Parameters of the analytics pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct Analysis {
    /// Lookback window applied when a request does not specify one.
    #[serde(default = "default_lookback_years")]
    pub default_lookback_years: u32,

    /// Rate changes below this magnitude (percentage points) count as a zero
    /// denominator; the period's duration is absent instead of extreme.
    #[serde(default = "default_rate_change_epsilon")]
    pub rate_change_epsilon: Decimal,

    /// Per-period duration magnitudes above this are excluded as outliers.
    #[serde(default = "default_max_abs_duration")]
    pub max_abs_duration: Option<Decimal>,

    /// How many days a daily rate observation may be carried forward onto a
    /// quarter end before it counts as stale.
    #[serde(default = "default_max_rate_staleness_days")]
    pub max_rate_staleness_days: u32,
}

/// One company available for analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

/// One market interest-rate source (e.g. a domestic and a foreign long rate).
#[derive(Debug, Clone, Deserialize)]
pub struct RateSource {
    pub id: String,
    pub label: String,
}

fn default_cache_ttl_secs() -> u64 {
    6 * 60 * 60
}

fn default_lookback_years() -> u32 {
    3
}

fn default_rate_change_epsilon() -> Decimal {
    Decimal::new(1, 4) // 0.0001 pp
}

fn default_max_abs_duration() -> Option<Decimal> {
    Some(Decimal::ONE_HUNDRED)
}

fn default_max_rate_staleness_days() -> u32 {
    10
}
