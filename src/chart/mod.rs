// Choropleth figure construction.
// Builds plotly-shaped figure documents (data + layout) that the pages
// render client-side. Selecting a metric absent from the table is an
// error, never a silently empty map.

use serde_json::{Value, json};

use crate::api::types::{CountryStats, ProvinceReport};
use crate::error::{CovidError, Result};

/// Build the Canada choropleth, joined on province name against the
/// boundary document.
pub fn canada_choropleth(
    reports: &[ProvinceReport],
    boundaries: &Value,
    metric: &str,
) -> Result<Value> {
    if !ProvinceReport::METRIC_KEYS.contains(&metric) {
        return Err(CovidError::MissingMetric(metric.to_string()));
    }

    let locations: Vec<&str> = reports.iter().map(|r| r.region.province.as_str()).collect();
    let z: Vec<Value> = reports.iter().map(|r| json!(r.metric(metric))).collect();
    let text: Vec<String> = reports
        .iter()
        .map(|r| {
            format!(
                "{}<br>date: {}<br>last update: {}",
                r.region.province, r.date, r.last_update
            )
        })
        .collect();

    Ok(json!({
        "data": [{
            "type": "choropleth",
            "geojson": boundaries,
            "featureidkey": "properties.name",
            "locations": locations,
            "z": z,
            "text": text,
            "hoverinfo": "text+z",
        }],
        "layout": {
            "geo": {
                "fitbounds": "locations",
                "visible": false,
                "projection": { "type": "natural earth" },
            },
            "margin": { "r": 0, "t": 20, "l": 0, "b": 0 },
        },
    }))
}

/// Build the world choropleth, joined on ISO3 code against plotly's
/// built-in country geometry. Rows without an ISO3 code (cruise ships,
/// aggregates) are skipped.
pub fn world_choropleth(countries: &[CountryStats], metric: &str) -> Result<Value> {
    if !CountryStats::METRIC_KEYS.contains(&metric) {
        return Err(CovidError::MissingMetric(metric.to_string()));
    }

    let mut locations = Vec::new();
    let mut z = Vec::new();
    let mut text = Vec::new();
    for country in countries {
        let Some(iso3) = country.iso3() else { continue };
        locations.push(iso3);
        z.push(json!(country.metric(metric)));
        text.push(format!(
            "{}<br>continent: {}<br>population: {}",
            country.country,
            country.continent.as_deref().unwrap_or("unknown"),
            country
                .population
                .map_or_else(|| "unknown".to_string(), |p| p.to_string()),
        ));
    }

    Ok(json!({
        "data": [{
            "type": "choropleth",
            "locations": locations,
            "z": z,
            "text": text,
            "hoverinfo": "text+z",
            "colorscale": "Sunset",
        }],
        "layout": {
            "height": 800,
            "geo": {
                "projection": { "type": "orthographic" },
                "showocean": true,
                "oceancolor": "#66a3ff",
            },
        },
    }))
}
