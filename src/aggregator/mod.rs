pub mod days;
pub mod grocery;

use crate::cards::CardRepository;
use crate::error::Result;
use crate::models::{DaySummary, GroceryList, Targets, WeekPlan};

pub use days::{day_notes, summarize_days};
pub use grocery::{
    aggregate_grocery, ingredient_contributions, merge_contributions, normalize_item, Contribution,
};

/// Per-day totals with notes, and the consolidated grocery list.
///
/// Reads the plan only; calling it twice yields identical output.
pub fn summarize(
    plan: &WeekPlan,
    cards: &CardRepository,
    targets: &Targets,
) -> Result<(Vec<DaySummary>, GroceryList)> {
    let days = summarize_days(plan, targets);
    let grocery = aggregate_grocery(plan, cards)?;
    Ok((days, grocery))
}
