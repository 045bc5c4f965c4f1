use serde::{Deserialize, Serialize};

use crate::planner::constants::{
    DEFAULT_MAX_UNIQUE_MAINS, DEFAULT_MIN_UNIQUE_MAINS, SLOTS_PER_DAY,
};

/// What the planner does when weekly caps leave no main for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepeatPolicy {
    /// Abort the run with `InsufficientVariety`.
    #[default]
    Fail,
    /// Repeat the least-used eligible main past its cap.
    Repeat,
}

/// Daily nutrition targets and weekly variety rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Targets {
    pub calories_min: f64,
    pub calories_max: f64,
    pub protein_min_g: f64,
    pub carbs_max_g: Option<f64>,
    pub fat_max_g: Option<f64>,
    /// Desired range of unique mains in the auto-mode rotation.
    pub min_unique_main_meals: Option<u32>,
    pub max_unique_main_meals: Option<u32>,
    pub min_sides_per_meal: u32,
    pub max_sides_per_meal: u32,
    pub on_variety_exhausted: RepeatPolicy,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            calories_min: 1400.0,
            calories_max: 1600.0,
            protein_min_g: 110.0,
            carbs_max_g: None,
            fat_max_g: None,
            min_unique_main_meals: None,
            max_unique_main_meals: None,
            min_sides_per_meal: 0,
            max_sides_per_meal: 2,
            on_variety_exhausted: RepeatPolicy::Fail,
        }
    }
}

impl Targets {
    /// Fill in and order the unique-main and side bounds.
    ///
    /// Both unique bounds missing gives 2-3; one missing mirrors the other.
    pub fn normalized(mut self) -> Self {
        let (min_u, max_u) = match (self.min_unique_main_meals, self.max_unique_main_meals) {
            (None, None) => (DEFAULT_MIN_UNIQUE_MAINS, DEFAULT_MAX_UNIQUE_MAINS),
            (None, Some(max)) => (max.max(1), max),
            (Some(min), None) => (min, min.max(1)),
            (Some(min), Some(max)) => (min, max),
        };
        let min_u = min_u.max(1);
        let max_u = max_u.max(min_u);
        self.min_unique_main_meals = Some(min_u);
        self.max_unique_main_meals = Some(max_u);

        if self.calories_max < self.calories_min {
            std::mem::swap(&mut self.calories_min, &mut self.calories_max);
        }
        self.max_sides_per_meal = self.max_sides_per_meal.max(self.min_sides_per_meal);
        self
    }

    /// Unique-main rotation bounds, after normalization defaults.
    pub fn unique_main_range(&self) -> (u32, u32) {
        let min = self
            .min_unique_main_meals
            .unwrap_or(DEFAULT_MIN_UNIQUE_MAINS)
            .max(1);
        let max = self.max_unique_main_meals.unwrap_or(min).max(min);
        (min, max)
    }

    /// Calories a single lunch or dinner should aim for.
    pub fn slot_calorie_share(&self) -> f64 {
        (self.calories_min + self.calories_max) / 2.0 / SLOTS_PER_DAY as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_defaults() {
        let t = Targets::default().normalized();
        assert_eq!(t.unique_main_range(), (2, 3));
    }

    #[test]
    fn test_normalized_mirrors_missing_bound() {
        let t = Targets {
            max_unique_main_meals: Some(4),
            ..Default::default()
        }
        .normalized();
        assert_eq!(t.unique_main_range(), (4, 4));

        let t = Targets {
            min_unique_main_meals: Some(5),
            max_unique_main_meals: Some(2),
            ..Default::default()
        }
        .normalized();
        assert_eq!(t.unique_main_range(), (5, 5));
    }

    #[test]
    fn test_slot_calorie_share() {
        let t = Targets::default();
        assert!((t.slot_calorie_share() - 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_sides_bounds_ordered() {
        let t = Targets {
            min_sides_per_meal: 3,
            max_sides_per_meal: 1,
            ..Default::default()
        }
        .normalized();
        assert_eq!(t.max_sides_per_meal, 3);
    }
}
