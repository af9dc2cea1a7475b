use askama::Template;
use serde::Deserialize;

use crate::{dishes::repo::{Dish, DishInput}, error::AppError, form};

/// Raw dish form as posted by the browser.
#[derive(Debug, Deserialize)]
pub struct DishForm {
    pub name: String,
    pub proteins: String,
    pub fats: String,
    pub carbs: String,
}

impl DishForm {
    pub fn parse(&self) -> Result<DishInput, AppError> {
        Ok(DishInput {
            name: form::name(&self.name)?,
            proteins: form::quantity("proteins", &self.proteins)?,
            fats: form::quantity("fats", &self.fats)?,
            carbs: form::quantity("carbs", &self.carbs)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_keyword: Option<String>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub dishes: Vec<Dish>,
    pub keyword: String,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditDishPage {
    pub dish: Dish,
    pub flash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, proteins: &str) -> DishForm {
        DishForm {
            name: name.into(),
            proteins: proteins.into(),
            fats: "5".into(),
            carbs: "20".into(),
        }
    }

    #[test]
    fn parses_valid_form() {
        let input = form("Lentil soup", "10").parse().unwrap();
        assert_eq!(
            input,
            DishInput {
                name: "Lentil soup".into(),
                proteins: 10.0,
                fats: 5.0,
                carbs: 20.0,
            }
        );
    }

    #[test]
    fn rejects_non_numeric_nutrient() {
        let err = form("Lentil soup", "ten").parse().unwrap_err();
        assert!(err.to_string().contains("proteins"));
    }

    #[test]
    fn rejects_blank_name() {
        assert!(matches!(
            form(" ", "10").parse(),
            Err(AppError::Validation(_))
        ));
    }
}
