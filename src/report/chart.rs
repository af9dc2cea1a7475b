use anyhow::Context;
use base64ct::{Base64, Encoding};
use plotters::prelude::*;
use time::Date;

use super::calories::CalorieSeries;

pub const TITLE: &str = "Calories Consumed Over Time";

/// An encoded chart image.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl RenderedChart {
    /// Inline form for an `<img src=..>` attribute.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            Base64::encode_string(&self.body)
        )
    }
}

pub trait ChartRenderer: Send + Sync {
    fn render(&self, series: &CalorieSeries) -> anyhow::Result<RenderedChart>;
}

/// Line chart with point markers, drawn as SVG.
#[derive(Debug, Clone)]
pub struct SvgChart {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgChart {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

impl ChartRenderer for SvgChart {
    fn render(&self, series: &CalorieSeries) -> anyhow::Result<RenderedChart> {
        let points: Vec<(i32, f64)> = series
            .ascending()
            .map(|(date, kcal)| (date.to_julian_day(), kcal))
            .collect();

        let (x_min, x_max) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first.0 - 1, last.0 + 1),
            _ => (0, 1),
        };
        let y_max = points
            .iter()
            .map(|p| p.1)
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.1;
        // plotters never finishes laying out an unbounded axis.
        anyhow::ensure!(
            y_max.is_finite(),
            "calorie totals exceed the chart range"
        );
        let has_points = !series.is_empty();
        let label = |day: &i32| -> String {
            if !has_points {
                return String::new();
            }
            Date::from_julian_day(*day)
                .map(|d| d.to_string())
                .unwrap_or_default()
        };

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).context("fill chart background")?;

            let mut chart = ChartBuilder::on(&root)
                .caption(TITLE, ("sans-serif", 24).into_font())
                .margin(20)
                .x_label_area_size(50)
                .y_label_area_size(70)
                .build_cartesian_2d(x_min..x_max, 0.0..y_max)
                .context("build chart axes")?;

            chart
                .configure_mesh()
                .x_desc("Date")
                .y_desc("Calories")
                .x_labels(points.len().clamp(2, 10))
                .x_label_formatter(&label)
                .draw()
                .context("draw chart mesh")?;

            chart
                .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
                .context("draw calorie line")?;
            chart
                .draw_series(points.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))
                .context("draw calorie markers")?;

            root.present().context("finish chart")?;
        }

        Ok(RenderedChart {
            content_type: "image/svg+xml",
            body: svg.into_bytes(),
        })
    }
}
