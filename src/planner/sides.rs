use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::models::{MealSlot, Portion, RecipeCard, Targets};
use crate::planner::usage::UsageLedger;

/// Side card with the calorie gap it would leave behind.
#[derive(Debug)]
struct Candidate<'a> {
    card: &'a RecipeCard,
    gap_after: f64,
    uses: u32,
}

/// Pick the side that lands the slot closest to `share` calories.
///
/// Ties go to the side used fewer times this week, then the lowest id.
/// Sides at their weekly cap or already in the slot are skipped.
pub fn choose_side<'a>(
    slot: &MealSlot,
    sides: &[&'a RecipeCard],
    ledger: &UsageLedger,
    share: f64,
) -> Option<&'a RecipeCard> {
    let current = slot.totals().calories;

    let mut candidates: Vec<Candidate> = sides
        .iter()
        .copied()
        .filter(|card| ledger.has_headroom(card))
        .filter(|card| !slot.portions().any(|p| p.card_id == card.id))
        .map(|card| Candidate {
            card,
            gap_after: (share - (current + card.macros_per_serving.calories)).abs(),
            uses: ledger.uses(&card.id),
        })
        .collect();

    candidates.sort_by(|a, b| match a.gap_after.total_cmp(&b.gap_after) {
        Ordering::Equal => a.uses.cmp(&b.uses).then_with(|| a.card.id.cmp(&b.card.id)),
        ord => ord,
    });

    candidates.first().map(|c| c.card)
}

/// Add sides to a slot until it stops getting closer to its calorie share.
///
/// `min_sides_per_meal` sides are added even when they overshoot; the slot
/// never holds more than `max_sides_per_meal`.
pub fn fill_sides(
    slot: &mut MealSlot,
    sides: &[&RecipeCard],
    ledger: &mut UsageLedger,
    targets: &Targets,
) {
    let share = targets.slot_calorie_share();
    let min_sides = targets.min_sides_per_meal as usize;
    let max_sides = targets.max_sides_per_meal.max(targets.min_sides_per_meal) as usize;

    while slot.sides.len() < max_sides {
        let Some(side) = choose_side(slot, sides, ledger, share) else {
            if slot.sides.len() < min_sides {
                warn!(
                    day = %slot.day,
                    meal = %slot.meal,
                    "ran out of sides before reaching the per-meal minimum of {}",
                    min_sides
                );
            }
            break;
        };

        let current = slot.totals().calories;
        let gap_now = (share - current).abs();
        let gap_after = (share - (current + side.macros_per_serving.calories)).abs();
        if gap_after >= gap_now && slot.sides.len() >= min_sides {
            break;
        }

        debug!(
            day = %slot.day,
            meal = %slot.meal,
            side = %side.id,
            "adding side ({:.0} -> {:.0} kcal, share {:.0})",
            current,
            current + side.macros_per_serving.calories,
            share
        );
        ledger.record(side);
        slot.sides.push(Portion::new(side, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Macros, MealType, Role, Weekday};

    fn card(id: &str, role: Role, kcal: f64, cap: u32) -> RecipeCard {
        let mut card: RecipeCard = serde_yaml_ng::from_str(&format!(
            "id: {id}\nname: {id}\nmacros_per_serving: {{ calories: 0, protein_g: 0, carbs_g: 0, fat_g: 0 }}\nmeal_types: [side, lunch, dinner]\n"
        ))
        .unwrap();
        card.role = role;
        card.meal_freq_cap_per_week = cap;
        card.macros_per_serving = Macros {
            calories: kcal,
            protein_g: 5.0,
            carbs_g: 10.0,
            fat_g: 2.0,
        };
        card
    }

    fn slot_with_main(kcal: f64) -> MealSlot {
        let main = card("main", Role::Main, kcal, 7);
        MealSlot::new(Weekday::Mon, MealType::Lunch, Portion::new(&main, 1.0))
    }

    #[test]
    fn test_choose_side_closest_gap() {
        let a = card("a_side", Role::Side, 100.0, 7);
        let b = card("b_side", Role::Side, 240.0, 7);
        let sides = vec![&a, &b];
        let slot = slot_with_main(500.0);
        let ledger = UsageLedger::new();

        let chosen = choose_side(&slot, &sides, &ledger, 750.0).unwrap();
        assert_eq!(chosen.id, "b_side");
    }

    #[test]
    fn test_choose_side_tie_breaks_by_use_then_id() {
        let a = card("a_side", Role::Side, 150.0, 7);
        let b = card("b_side", Role::Side, 150.0, 7);
        let sides = vec![&b, &a];
        let slot = slot_with_main(500.0);
        let mut ledger = UsageLedger::new();

        assert_eq!(choose_side(&slot, &sides, &ledger, 750.0).unwrap().id, "a_side");

        ledger.record(&a);
        assert_eq!(choose_side(&slot, &sides, &ledger, 750.0).unwrap().id, "b_side");
    }

    #[test]
    fn test_fill_sides_stops_when_no_improvement() {
        let a = card("a_side", Role::Side, 200.0, 7);
        let b = card("b_side", Role::Side, 150.0, 7);
        let sides = vec![&a, &b];
        let mut slot = slot_with_main(700.0);
        let mut ledger = UsageLedger::new();

        fill_sides(&mut slot, &sides, &mut ledger, &Targets::default());
        assert!(slot.sides.is_empty());
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn test_fill_sides_respects_max_and_caps() {
        let a = card("a_side", Role::Side, 100.0, 1);
        let b = card("b_side", Role::Side, 100.0, 7);
        let c = card("c_side", Role::Side, 100.0, 7);
        let sides = vec![&a, &b, &c];
        let mut ledger = UsageLedger::new();
        let targets = Targets::default();

        let mut first = slot_with_main(350.0);
        fill_sides(&mut first, &sides, &mut ledger, &targets);
        assert_eq!(first.card_ids(), vec!["main", "a_side", "b_side"]);

        let mut second = slot_with_main(350.0);
        fill_sides(&mut second, &sides, &mut ledger, &targets);
        assert_eq!(second.card_ids(), vec!["main", "c_side", "b_side"]);
        assert_eq!(ledger.uses("a_side"), 1);
    }

    #[test]
    fn test_fill_sides_forces_minimum() {
        let a = card("a_side", Role::Side, 250.0, 7);
        let sides = vec![&a];
        let mut slot = slot_with_main(780.0);
        let mut ledger = UsageLedger::new();
        let targets = Targets {
            min_sides_per_meal: 1,
            ..Default::default()
        };

        fill_sides(&mut slot, &sides, &mut ledger, &targets);
        assert_eq!(slot.sides.len(), 1);
    }
}
