use std::collections::BTreeMap;

use crate::models::RecipeCard;

/// Counts how often each card has been placed this week.
#[derive(Debug, Clone, Default)]
pub struct UsageLedger {
    counts: BTreeMap<String, u32>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uses(&self, card_id: &str) -> u32 {
        self.counts.get(card_id).copied().unwrap_or(0)
    }

    /// Placements left before the card hits its weekly cap.
    pub fn headroom(&self, card: &RecipeCard) -> u32 {
        card.meal_freq_cap_per_week
            .saturating_sub(self.uses(&card.id))
    }

    pub fn has_headroom(&self, card: &RecipeCard) -> bool {
        self.headroom(card) > 0
    }

    pub fn record(&mut self, card: &RecipeCard) {
        *self.counts.entry(card.id.clone()).or_insert(0) += 1;
    }

    /// Total placements recorded.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}
