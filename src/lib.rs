pub mod aggregator;
pub mod cards;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod planner;
pub mod report;

pub use error::{PlanError, Result};
pub use models::{GroceryList, RecipeCard, Targets, WeekPlan};
