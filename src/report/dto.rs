use askama::Template;
use serde::Deserialize;
use time::Date;

/// `/plot` query string. Blank values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct PlotQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Template)]
#[template(path = "plot.html")]
pub struct PlotPage {
    pub chart_url: String,
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<(Date, f64)>,
    pub total: f64,
    pub flash: Option<String>,
}
