use std::collections::BTreeMap;

use strsim::jaro_winkler;
use tracing::{debug, warn};

use crate::cards::source::CardSource;
use crate::error::{PlanError, Result};
use crate::models::RecipeCard;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Read-only set of recipe cards keyed by id.
///
/// Iteration is always in id order so planning never depends on load order.
#[derive(Debug, Clone, Default)]
pub struct CardRepository {
    cards: BTreeMap<String, RecipeCard>,
}

impl CardRepository {
    /// Build a repository. Duplicate ids keep the last card seen.
    pub fn new(cards: Vec<RecipeCard>) -> Self {
        let mut map = BTreeMap::new();
        for card in cards {
            if let Some(previous) = map.insert(card.id.clone(), card) {
                warn!(card_id = %previous.id, "duplicate card id; keeping the later definition");
            }
        }
        Self { cards: map }
    }

    /// Load, validate and index every card a source provides.
    pub fn from_source(source: &dyn CardSource) -> Result<Self> {
        let cards = source.load_cards()?;
        if cards.is_empty() {
            return Err(PlanError::NoCards(source.describe()));
        }
        for card in &cards {
            card.validate()?;
            debug!("loaded {}", card.debug_string());
        }
        Ok(Self::new(cards))
    }

    pub fn get(&self, id: &str) -> Option<&RecipeCard> {
        self.cards.get(id)
    }

    /// Look up a card, suggesting the closest id when it is missing.
    pub fn require(&self, id: &str) -> Result<&RecipeCard> {
        self.get(id).ok_or_else(|| PlanError::CardNotFound {
            id: id.to_string(),
            suggestion: self.suggest(id),
        })
    }

    /// Closest known id by Jaro-Winkler similarity, if any is close enough.
    pub fn suggest(&self, id: &str) -> Option<String> {
        let needle = id.to_lowercase();
        self.cards
            .keys()
            .map(|k| (k, jaro_winkler(&k.to_lowercase(), &needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k.clone())
    }

    pub fn cards(&self) -> impl Iterator<Item = &RecipeCard> {
        self.cards.values()
    }

    /// Cards auto mode may use as mains, in id order.
    pub fn eligible_mains(&self) -> Vec<&RecipeCard> {
        self.cards.values().filter(|c| c.is_eligible_main()).collect()
    }

    /// Cards the planner may add as sides, in id order.
    pub fn eligible_sides(&self) -> Vec<&RecipeCard> {
        self.cards.values().filter(|c| c.is_eligible_side()).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Macros, Role};

    fn card(id: &str, role: Role, kcal: f64, meal_types: &[&str]) -> RecipeCard {
        RecipeCard {
            id: id.to_string(),
            name: id.replace('_', " "),
            role,
            servings_default: 2,
            portion_size_note: String::new(),
            macros_per_serving: Macros {
                calories: kcal,
                protein_g: 30.0,
                carbs_g: 40.0,
                fat_g: 10.0,
            },
            primary_carb: vec![],
            protein_source: vec![],
            veg: vec![],
            allergens: vec![],
            meal_types: meal_types.iter().map(|s| s.to_string()).collect(),
            meal_freq_cap_per_week: 3,
            prep_time_min: 0,
            cook_time_min: 0,
            batch_friendly: true,
            reheat_method: vec![],
            ingredients: vec![],
            steps: vec![],
            notes: vec![],
        }
    }

    fn sample_repo() -> CardRepository {
        CardRepository::new(vec![
            card("turkey_chili", Role::Main, 520.0, &["lunch", "dinner"]),
            card("beef_bowl", Role::Main, 640.0, &["dinner"]),
            card("side_salad", Role::Side, 120.0, &["side"]),
            card("roast_potatoes", Role::Both, 280.0, &["side", "lunch"]),
        ])
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let mut later = card("turkey_chili", Role::Main, 600.0, &["lunch"]);
        later.name = "Later".to_string();
        let repo = CardRepository::new(vec![
            card("turkey_chili", Role::Main, 520.0, &["lunch"]),
            later,
        ]);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get("turkey_chili").unwrap().name, "Later");
    }

    #[test]
    fn test_eligible_lists_sorted_by_id() {
        let repo = sample_repo();
        let mains: Vec<&str> = repo.eligible_mains().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(mains, vec!["beef_bowl", "turkey_chili"]);
        let sides: Vec<&str> = repo.eligible_sides().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(sides, vec!["roast_potatoes", "side_salad"]);
    }

    #[test]
    fn test_require_suggests_close_id() {
        let repo = sample_repo();
        match repo.require("turkey_chilli") {
            Err(PlanError::CardNotFound { suggestion, .. }) => {
                assert_eq!(suggestion.as_deref(), Some("turkey_chili"));
            }
            other => panic!("expected CardNotFound, got {:?}", other),
        }
        assert!(repo.require("beef_bowl").is_ok());
    }
}
