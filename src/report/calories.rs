//! Calorie aggregation: date-range resolution, the per-event calorie formula
//! and the per-day reduction feeding the chart.

use std::collections::BTreeMap;

use sqlx::FromRow;
use time::Date;

/// Macronutrient content of a dish, grams per 100g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macros {
    pub proteins: f64,
    pub fats: f64,
    pub carbs: f64,
}

/// Energy of `grams` of a dish.
///
/// Uses the fixed 3/2/5 weights of this tracker, not the 4/9/4 kcal/g of
/// nutrition tables.
pub fn calories(macros: &Macros, grams: f64) -> f64 {
    (3.0 * macros.proteins + 2.0 * macros.fats + 5.0 * macros.carbs) * grams / 100.0
}

/// Which consumption events a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    All,
    /// Inclusive on both ends.
    Between { start: Date, end: Date },
}

impl DateRange {
    /// A single supplied bound pins the other one to `today`.
    pub fn resolve(start: Option<Date>, end: Option<Date>, today: Date) -> Self {
        match (start, end) {
            (None, None) => DateRange::All,
            (start, end) => DateRange::Between {
                start: start.unwrap_or(today),
                end: end.unwrap_or(today),
            },
        }
    }

    pub fn contains(&self, date: Date) -> bool {
        match *self {
            DateRange::All => true,
            DateRange::Between { start, end } => start <= date && date <= end,
        }
    }
}

/// One consumption event joined with the macros of its dish.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Intake {
    pub date_consumed: Date,
    pub grams: f64,
    pub proteins: f64,
    pub fats: f64,
    pub carbs: f64,
}

impl Intake {
    pub fn calories(&self) -> f64 {
        let macros = Macros {
            proteins: self.proteins,
            fats: self.fats,
            carbs: self.carbs,
        };
        calories(&macros, self.grams)
    }
}

/// Daily calorie totals, newest date first. `dates` and `calories` always
/// have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalorieSeries {
    pub dates: Vec<Date>,
    pub calories: Vec<f64>,
}

impl CalorieSeries {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Points in chart order (oldest first).
    pub fn ascending(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates
            .iter()
            .copied()
            .zip(self.calories.iter().copied())
            .rev()
    }

    pub fn total(&self) -> f64 {
        self.calories.iter().sum()
    }
}

/// Sum the calories of every intake per consumption date.
pub fn daily_calories<'a, I>(intakes: I) -> CalorieSeries
where
    I: IntoIterator<Item = &'a Intake>,
{
    let mut per_day: BTreeMap<Date, f64> = BTreeMap::new();
    for intake in intakes {
        *per_day.entry(intake.date_consumed).or_insert(0.0) += intake.calories();
    }

    let mut series = CalorieSeries::default();
    for (date, total) in per_day.into_iter().rev() {
        series.dates.push(date);
        series.calories.push(total);
    }
    series
}
