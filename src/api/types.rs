// Upstream API response types.
// Defines structs for deserializing the country-report rows (one per
// Canadian province per day) and the global statistics rows (one per
// country). Rows are immutable once fetched and superseded wholesale by
// the next fetch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Region descriptor nested in a country report row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub iso: String,
    pub name: String,
    pub province: String,
    pub lat: Option<String>,
    pub long: Option<String>,
}

/// One row per Canadian province/territory per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvinceReport {
    pub region: Region,
    pub date: NaiveDate,
    /// Upstream timestamp without timezone, e.g. "2023-03-09 04:21:03".
    pub last_update: String,
    pub confirmed: i64,
    pub confirmed_diff: i64,
    pub deaths: i64,
    pub deaths_diff: i64,
    pub recovered: i64,
    pub recovered_diff: i64,
    pub active: i64,
    pub active_diff: i64,
    pub fatality_rate: f64,
}

impl ProvinceReport {
    /// Metric keys selectable on the Canada page.
    pub const METRIC_KEYS: &'static [&'static str] = &[
        "confirmed",
        "active",
        "deaths",
        "recovered",
        "confirmed_diff",
        "deaths_diff",
        "recovered_diff",
        "active_diff",
    ];

    /// Value of the named metric column, or `None` for unrecognized keys.
    pub fn metric(&self, key: &str) -> Option<f64> {
        let value = match key {
            "confirmed" => self.confirmed,
            "active" => self.active,
            "deaths" => self.deaths,
            "recovered" => self.recovered,
            "confirmed_diff" => self.confirmed_diff,
            "deaths_diff" => self.deaths_diff,
            "recovered_diff" => self.recovered_diff,
            "active_diff" => self.active_diff,
            _ => return None,
        };
        Some(value as f64)
    }
}

/// Country identifiers nested in a global statistics row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryInfo {
    #[serde(rename = "_id")]
    pub id: Option<u64>,
    pub iso2: Option<String>,
    pub iso3: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub flag: Option<String>,
}

/// One row per country from the global statistics endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStats {
    pub country: String,
    pub country_info: CountryInfo,
    pub continent: Option<String>,
    pub population: Option<u64>,
    /// Millisecond epoch of the upstream aggregation.
    pub updated: Option<i64>,
    pub cases: i64,
    pub today_cases: i64,
    pub deaths: i64,
    pub today_deaths: i64,
    pub recovered: i64,
    #[serde(default)]
    pub today_recovered: i64,
    pub active: i64,
    pub critical: i64,
    #[serde(default)]
    pub tests: i64,
    pub cases_per_one_million: Option<f64>,
    pub deaths_per_one_million: Option<f64>,
    pub tests_per_one_million: Option<f64>,
    pub active_per_one_million: Option<f64>,
    pub recovered_per_one_million: Option<f64>,
    pub critical_per_one_million: Option<f64>,
}

impl CountryStats {
    /// Metric keys selectable on the world page. Keys are the upstream
    /// camelCase field names, which double as dropdown values.
    pub const METRIC_KEYS: &'static [&'static str] = &[
        "cases",
        "active",
        "activePerOneMillion",
        "todayCases",
        "casesPerOneMillion",
        "tests",
        "testsPerOneMillion",
        "critical",
        "criticalPerOneMillion",
        "deaths",
        "todayDeaths",
        "deathsPerOneMillion",
        "recovered",
        "todayRecovered",
        "recoveredPerOneMillion",
    ];

    /// ISO3 code used as the choropleth join key.
    pub fn iso3(&self) -> Option<&str> {
        self.country_info.iso3.as_deref()
    }

    /// Value of the named metric column. `None` for unrecognized keys, and
    /// for per-million columns the upstream omitted for this country.
    pub fn metric(&self, key: &str) -> Option<f64> {
        let value = match key {
            "cases" => self.cases as f64,
            "active" => self.active as f64,
            "todayCases" => self.today_cases as f64,
            "tests" => self.tests as f64,
            "critical" => self.critical as f64,
            "deaths" => self.deaths as f64,
            "todayDeaths" => self.today_deaths as f64,
            "recovered" => self.recovered as f64,
            "todayRecovered" => self.today_recovered as f64,
            "activePerOneMillion" => self.active_per_one_million?,
            "casesPerOneMillion" => self.cases_per_one_million?,
            "testsPerOneMillion" => self.tests_per_one_million?,
            "criticalPerOneMillion" => self.critical_per_one_million?,
            "deathsPerOneMillion" => self.deaths_per_one_million?,
            "recoveredPerOneMillion" => self.recovered_per_one_million?,
            _ => return None,
        };
        Some(value)
    }
}
