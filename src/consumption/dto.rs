use askama::Template;
use serde::Deserialize;
use time::Date;

use crate::{
    consumption::repo::{ConsumedEntry, ConsumptionInput},
    dishes::repo::Dish,
    error::AppError,
    form,
};

/// Raw consumption form; `date` is `YYYY-MM-DD` as sent by `<input type=date>`.
#[derive(Debug, Deserialize)]
pub struct ConsumptionForm {
    pub dish_id: String,
    pub grams: String,
    pub date: String,
}

impl ConsumptionForm {
    pub fn parse(&self) -> Result<ConsumptionInput, AppError> {
        Ok(ConsumptionInput {
            dish_id: form::id("dish_id", &self.dish_id)?,
            grams: form::quantity("grams", &self.grams)?,
            date_consumed: form::date("date", &self.date)?,
        })
    }
}

#[derive(Template)]
#[template(path = "consume.html")]
pub struct ConsumePage {
    pub dishes: Vec<Dish>,
    pub today: Date,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "consumed.html")]
pub struct ConsumedPage {
    pub entries: Vec<ConsumedEntry>,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "edit_consumed.html")]
pub struct EditConsumedPage {
    pub entry: ConsumedEntry,
    pub dishes: Vec<Dish>,
    pub flash: Option<String>,
}
