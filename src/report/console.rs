use std::path::PathBuf;

use crate::cards::CardRepository;
use crate::models::{DaySummary, GroceryList, PlanMode, WeekPlan};

/// Print the planned week and daily totals to stdout.
pub fn display_week_plan(plan: &WeekPlan, summaries: &[DaySummary], grocery: &GroceryList) {
    let mode = match plan.mode {
        PlanMode::Auto => "auto",
        PlanMode::Manual => "manual",
    };

    println!();
    println!("=== Weekly Plan ({} mode, seed {}) ===", mode, plan.seed);
    println!();

    let max_name_len = plan
        .slots()
        .map(|s| s.display_name().len())
        .max()
        .unwrap_or(10);

    for slot in plan.slots() {
        let totals = slot.totals();
        println!(
            "{} {:<6} {:<width$}  {:>4.0} kcal | P {:>3.0} g",
            slot.day,
            slot.meal.as_str(),
            slot.display_name(),
            totals.calories,
            totals.protein_g,
            width = max_name_len
        );
    }

    println!();
    println!("--- Daily Totals ---");
    for day in summaries {
        let t = &day.totals;
        let flag = if day.notes.is_empty() { "" } else { "  *" };
        println!(
            "{}: {:>4.0} kcal | P {:>3.0} g | C {:>3.0} g | F {:>3.0} g{}",
            day.day, t.calories, t.protein_g, t.carbs_g, t.fat_g, flag
        );
    }

    let flagged = summaries.iter().filter(|d| !d.notes.is_empty()).count();
    println!();
    println!("--- Summary ---");
    println!("Unique cards: {}", unique_card_count(plan));
    println!("Days with notes: {}", flagged);
    println!("Grocery lines: {}", grocery.len());
    println!();
}

fn unique_card_count(plan: &WeekPlan) -> usize {
    let mut ids: Vec<&str> = plan.slots().flat_map(|s| s.card_ids()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}

/// Print where the report files went.
pub fn display_written(paths: &[PathBuf]) {
    println!("Wrote:");
    for path in paths {
        println!("  {}", path.display());
    }
}

/// Print every loaded card with its role, nutrition, cap and eligibility.
pub fn display_card_list(cards: &CardRepository) {
    if cards.is_empty() {
        println!("No cards loaded.");
        return;
    }

    let max_id_len = cards.cards().map(|c| c.id.len()).max().unwrap_or(10);

    println!();
    println!("=== Recipe Cards ({}) ===", cards.len());
    println!();
    for card in cards.cards() {
        let m = &card.macros_per_serving;
        let eligible = match (card.is_eligible_main(), card.is_eligible_side()) {
            (true, true) => "main+side",
            (true, false) => "main",
            (false, true) => "side",
            (false, false) => "-",
        };
        println!(
            "{:<width$}  {:<4}  {:>4.0} kcal  P {:>3.0} g  cap {}/wk  [{}]  {}",
            card.id,
            card.role.as_str(),
            m.calories,
            m.protein_g,
            card.meal_freq_cap_per_week,
            eligible,
            card.name,
            width = max_id_len
        );
    }

    println!();
    println!(
        "Eligible: {} mains, {} sides",
        cards.eligible_mains().len(),
        cards.eligible_sides().len()
    );
    println!();
}
