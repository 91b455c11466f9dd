// Static page definitions and path routing.
// Each page is a self-contained HTML document with a navbar, a metric
// dropdown, and a script that refetches the figure on selection change.

/// Dropdown options for the Canada page: (value, label).
pub const CANADA_METRICS: &[(&str, &str)] = &[
    ("confirmed", "Confirmed cases"),
    ("active", "Active cases"),
    ("deaths", "Total deaths"),
    ("recovered", "Recovered"),
    ("confirmed_diff", "New cases"),
    ("active_diff", "Change in active cases"),
    ("deaths_diff", "New deaths"),
    ("recovered_diff", "Newly recovered"),
];

/// Dropdown options for the world page: (value, label).
pub const WORLD_METRICS: &[(&str, &str)] = &[
    ("cases", "Confirmed cases"),
    ("active", "Active cases"),
    ("activePerOneMillion", "Active cases per million"),
    ("todayCases", "Cases today"),
    ("casesPerOneMillion", "Cases per million"),
    ("tests", "Tests"),
    ("testsPerOneMillion", "Tests per million"),
    ("critical", "Critical cases"),
    ("criticalPerOneMillion", "Critical per million"),
    ("deaths", "Deaths"),
    ("todayDeaths", "Deaths today"),
    ("deathsPerOneMillion", "Deaths per million"),
    ("recovered", "Recovered"),
    ("todayRecovered", "Recovered today"),
    ("recoveredPerOneMillion", "Recovered per million"),
];

/// One dropdown-driven map page.
pub struct Page {
    pub path: &'static str,
    pub title: &'static str,
    pub header: &'static str,
    pub figure_endpoint: &'static str,
    pub default_metric: &'static str,
    pub metrics: &'static [(&'static str, &'static str)],
}

pub static CANADA_PAGE: Page = Page {
    path: "/",
    title: "COVID-19 Visualization",
    header: "COVID-19 Data In Canada",
    figure_endpoint: "/figure/canada",
    default_metric: "confirmed",
    metrics: CANADA_METRICS,
};

pub static WORLD_PAGE: Page = Page {
    path: "/world",
    title: "COVID-19 Visualization",
    header: "COVID-19 Data World Wide",
    figure_endpoint: "/figure/world",
    default_metric: "cases",
    metrics: WORLD_METRICS,
};

/// Map a request path to a page. Unrecognized paths yield no content.
pub fn route(path: &str) -> Option<&'static Page> {
    match path {
        "/" => Some(&CANADA_PAGE),
        "/world" => Some(&WORLD_PAGE),
        _ => None,
    }
}

impl Page {
    /// Render the page as a complete HTML document.
    pub fn render(&self) -> String {
        let options: String = self
            .metrics
            .iter()
            .map(|(value, label)| {
                let selected = if *value == self.default_metric {
                    " selected"
                } else {
                    ""
                };
                format!("<option value=\"{}\"{}>{}</option>", value, selected, label)
            })
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
<style>
body {{ margin: 0; font-family: system-ui, sans-serif; }}
nav {{ background: #212529; color: #fff; padding: 0.6rem 1rem; }}
nav .brand {{ font-weight: bold; margin-right: 1.5rem; }}
nav a {{ color: #adb5bd; margin-right: 1rem; text-decoration: none; }}
main {{ padding: 30px 100px 10px; }}
.card {{ border: 1px solid #dee2e6; border-radius: 4px; }}
.card header {{ background: #f8f9fa; padding: 0.75rem 1.25rem; border-bottom: 1px solid #dee2e6; }}
.card-body {{ padding: 1.25rem; }}
</style>
</head>
<body>
<nav><span class="brand">COVID-19</span><a href="/">Canada</a><a href="/world">World</a></nav>
<main>
<section class="card">
<header>{header}</header>
<div class="card-body">
<label for="metric">Filters:</label>
<select id="metric">{options}</select>
<div id="graph"></div>
</div>
</section>
</main>
<script>
const endpoint = "{endpoint}";
const select = document.getElementById("metric");
async function refresh() {{
  const response = await fetch(endpoint + "?metric=" + encodeURIComponent(select.value));
  if (!response.ok) {{
    document.getElementById("graph").textContent = await response.text();
    return;
  }}
  const figure = await response.json();
  Plotly.react("graph", figure.data, figure.layout);
}}
select.addEventListener("change", refresh);
refresh();
</script>
</body>
</html>
"#,
            title = self.title,
            header = self.header,
            options = options,
            endpoint = self.figure_endpoint,
        )
    }
}
