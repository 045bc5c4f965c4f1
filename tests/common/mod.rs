#![allow(dead_code)]

use std::path::PathBuf;

use meal_plan_maker_rs::cards::{CardRepository, YamlDirSource};
use meal_plan_maker_rs::models::{
    MealSlot, MealType, PlanMode, Portion, RecipeCard, Role, WeekPlan, Weekday,
};

/// The sample cards shipped in `cards/`.
pub fn sample_repo() -> CardRepository {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("cards");
    CardRepository::from_source(&YamlDirSource::new(dir)).unwrap()
}

pub fn main_card(id: &str, kcal: f64, protein: f64, cap: u32) -> RecipeCard {
    let yaml = format!(
        "id: {id}\nname: {id}\nservings_default: 2\nmeal_types: [lunch, dinner]\n\
         meal_freq_cap_per_week: {cap}\n\
         macros_per_serving: {{calories: {kcal}, protein_g: {protein}, carbs_g: 40, fat_g: 15}}\n"
    );
    serde_yaml_ng::from_str(&yaml).unwrap()
}

pub fn side_card(id: &str, kcal: f64, cap: u32) -> RecipeCard {
    let mut card = main_card(id, kcal, 4.0, cap);
    card.role = Role::Side;
    card.meal_types = vec!["side".to_string()];
    card
}

pub fn slot(repo: &CardRepository, day: Weekday, meal: MealType, id: &str) -> MealSlot {
    MealSlot::new(day, meal, Portion::new(repo.get(id).unwrap(), 1.0))
}

/// A full week that places `mains[i % mains.len()]` in slot `i`.
pub fn week_of(repo: &CardRepository, mains: &[&str]) -> WeekPlan {
    let slots: Vec<MealSlot> = (0..14)
        .map(|i| {
            slot(
                repo,
                Weekday::ALL[i / 2],
                MealType::ALL[i % 2],
                mains[i % mains.len()],
            )
        })
        .collect();
    WeekPlan::from_slots(0, PlanMode::Manual, slots).unwrap()
}
