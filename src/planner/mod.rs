pub mod auto;
pub mod constants;
pub mod manual;
pub mod sides;
pub mod usage;

use tracing::{info, warn};

use crate::cards::CardRepository;
use crate::error::{PlanError, Result};
use crate::models::{MealType, RecipeCard, RepeatPolicy, Targets, WeekPlan, Weekday};

pub use auto::plan_week;
pub use constants::*;
pub use manual::{plan_week_from_selection, SelectionEntry};
pub use sides::{choose_side, fill_sides};
pub use usage::UsageLedger;

/// Plan a week in manual mode when a selection is given, auto mode otherwise.
pub fn plan(
    cards: &CardRepository,
    targets: &Targets,
    selection: Option<&[SelectionEntry]>,
    seed: Option<u64>,
) -> Result<WeekPlan> {
    match selection {
        Some(selection) if !selection.is_empty() => {
            plan_week_from_selection(cards, targets, selection, seed)
        }
        _ => {
            let (min_u, max_u) = targets.unique_main_range();
            info!(
                "No weekly selection provided; generating automatic plan with {}-{} unique mains",
                min_u, max_u
            );
            plan_week(cards, targets, seed)
        }
    }
}

/// Use the given seed, or draw a fresh one.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => {
            info!("Using fixed seed: {}", seed);
            seed
        }
        None => {
            let seed = rand::random::<u64>();
            info!("No seed provided. Using random seed: {}", seed);
            seed
        }
    }
}

/// Day and meal of the `index`-th slot (Mon lunch = 0, Mon dinner = 1, ...).
pub(crate) fn slot_position(index: usize) -> (Weekday, MealType) {
    let day = Weekday::ALL[(index / SLOTS_PER_DAY) % DAYS_PER_WEEK];
    let meal = MealType::ALL[index % SLOTS_PER_DAY];
    (day, meal)
}

/// What to place when every candidate main is at its weekly cap.
///
/// `Fail` aborts with `InsufficientVariety`. `Repeat` reuses the least-used
/// main from `pool`, lowest id first on ties.
pub(crate) fn fallback_main<'a>(
    pool: &[&'a RecipeCard],
    ledger: &UsageLedger,
    policy: RepeatPolicy,
    day: Weekday,
    meal: MealType,
) -> Result<&'a RecipeCard> {
    match policy {
        RepeatPolicy::Fail => Err(PlanError::InsufficientVariety { day, meal }),
        RepeatPolicy::Repeat => {
            let card = pool
                .iter()
                .copied()
                .min_by(|a, b| {
                    ledger
                        .uses(&a.id)
                        .cmp(&ledger.uses(&b.id))
                        .then_with(|| a.id.cmp(&b.id))
                })
                .ok_or(PlanError::NoEligibleMains)?;
            warn!(%day, %meal, main = %card.id, "weekly caps exhausted; repeating main");
            Ok(card)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_position() {
        assert_eq!(slot_position(0), (Weekday::Mon, MealType::Lunch));
        assert_eq!(slot_position(1), (Weekday::Mon, MealType::Dinner));
        assert_eq!(slot_position(13), (Weekday::Sun, MealType::Dinner));
    }

    #[test]
    fn test_resolve_seed_keeps_given_seed() {
        assert_eq!(resolve_seed(Some(42)), 42);
    }
}
