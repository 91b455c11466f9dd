// Typed fetch operations against the two upstream endpoints.
// Applies the region-name normalization needed for the boundary join.

use serde::Deserialize;
use tracing::info;

use crate::error::Result;

use super::client::CovidClient;
use super::types::{CountryStats, ProvinceReport};

/// Response wrapper for the country-report endpoint.
#[derive(Debug, Deserialize)]
struct ReportsResponse {
    data: Vec<ProvinceReport>,
}

impl CovidClient {
    /// Fetch the per-province rows for Canada.
    pub async fn fetch_canada_reports(&self, url: &str) -> Result<Vec<ProvinceReport>> {
        info!("fetching country reports from {}", url);
        let response = self.get(url).await?;
        let reports: ReportsResponse = response.json().await?;

        let mut reports = reports.data;
        normalize_region_names(&mut reports);
        Ok(reports)
    }

    /// Fetch the per-country global statistics rows.
    pub async fn fetch_world_countries(&self, url: &str) -> Result<Vec<CountryStats>> {
        info!("fetching global statistics from {}", url);
        let response = self.get(url).await?;
        let countries: Vec<CountryStats> = response.json().await?;
        Ok(countries)
    }
}

/// Align upstream region names with the boundary document.
///
/// The API calls the territory "Yukon" while the GeoJSON features name it
/// "Yukon Territory"; without the rename the province drops off the map.
/// Matched by name, not position, so upstream reordering cannot break it.
pub fn normalize_region_names(reports: &mut [ProvinceReport]) {
    for report in reports {
        if report.region.province == "Yukon" {
            report.region.province = "Yukon Territory".to_string();
        }
    }
}
