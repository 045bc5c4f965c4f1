use thiserror::Error;

use crate::models::{MealType, Weekday};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Not enough variety to fill {day} {meal}: every eligible main is at its weekly cap")]
    InsufficientVariety { day: Weekday, meal: MealType },

    #[error(
        "No eligible mains found (need role main/both, batch_friendly, 300-800 kcal, lunch or dinner meal type)"
    )]
    NoEligibleMains,

    #[error("Card not found: {id}{}", did_you_mean(.suggestion))]
    CardNotFound {
        id: String,
        suggestion: Option<String>,
    },

    #[error("Invalid card '{id}': {reason}")]
    InvalidCard { id: String, reason: String },

    #[error("Invalid unit: {0:?}")]
    InvalidUnit(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No recipe cards loaded from {0}")]
    NoCards(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Weighted choice error: {0}")]
    Weights(#[from] rand::distributions::WeightedError),
}

pub type Result<T> = std::result::Result<T, PlanError>;

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}
