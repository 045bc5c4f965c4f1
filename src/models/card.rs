use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::units::Unit;
use crate::planner::constants::{
    MAIN_CAL_MAX, MAIN_CAL_MIN, SEAFOOD_PROTEINS, SIDE_CAL_MAX, SIDE_CAL_MIN,
};

/// What a card can be used as within a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Main,
    Side,
    Both,
}

impl Role {
    pub fn can_be_main(self) -> bool {
        matches!(self, Role::Main | Role::Both)
    }

    pub fn can_be_side(self) -> bool {
        matches!(self, Role::Side | Role::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Main => "main",
            Role::Side => "side",
            Role::Both => "both",
        }
    }
}

/// Calories and macronutrients (grams).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl Macros {
    #[inline]
    pub fn scaled(&self, factor: f64) -> Macros {
        Macros {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            carbs_g: self.carbs_g * factor,
            fat_g: self.fat_g * factor,
        }
    }

    pub fn is_non_negative(&self) -> bool {
        self.calories >= 0.0 && self.protein_g >= 0.0 && self.carbs_g >= 0.0 && self.fat_g >= 0.0
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            carbs_g: self.carbs_g + rhs.carbs_g,
            fat_g: self.fat_g + rhs.fat_g,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

/// One ingredient line. `qty` covers the card's whole `servings_default` yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub qty: f64,
    pub unit: Unit,
    #[serde(default = "default_section")]
    pub grocery_section: String,
}

fn default_section() -> String {
    "other".to_string()
}

fn default_servings() -> u32 {
    2
}

fn default_freq_cap() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

/// A recipe card: one dish with per-serving nutrition and a store-realistic
/// ingredient list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCard {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub role: Role,

    #[serde(default = "default_servings")]
    pub servings_default: u32,

    #[serde(default)]
    pub portion_size_note: String,

    pub macros_per_serving: Macros,

    #[serde(default)]
    pub primary_carb: Vec<String>,

    #[serde(default)]
    pub protein_source: Vec<String>,

    #[serde(default)]
    pub veg: Vec<String>,

    #[serde(default)]
    pub allergens: Vec<String>,

    #[serde(default)]
    pub meal_types: Vec<String>,

    #[serde(default = "default_freq_cap")]
    pub meal_freq_cap_per_week: u32,

    #[serde(default)]
    pub prep_time_min: u32,

    #[serde(default)]
    pub cook_time_min: u32,

    #[serde(default = "default_true")]
    pub batch_friendly: bool,

    #[serde(default)]
    pub reheat_method: Vec<String>,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub steps: Vec<String>,

    #[serde(default)]
    pub notes: Vec<String>,
}

impl RecipeCard {
    /// Reject cards the planner cannot reason about.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| PlanError::InvalidCard {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id is empty"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.servings_default == 0 {
            return Err(invalid("servings_default must be at least 1"));
        }
        if !self.macros_per_serving.is_non_negative() {
            return Err(invalid("macros_per_serving contains a negative value"));
        }
        if let Some(ing) = self
            .ingredients
            .iter()
            .find(|i| i.qty < 0.0 || !i.qty.is_finite() || i.item.trim().is_empty())
        {
            return Err(invalid(&format!(
                "ingredient {:?} has an empty name or invalid quantity",
                ing.item
            )));
        }
        Ok(())
    }

    fn has_meal_type(&self, wanted: &[&str]) -> bool {
        self.meal_types
            .iter()
            .any(|mt| wanted.contains(&mt.trim().to_lowercase().as_str()))
    }

    fn has_protein(&self, wanted: &[&str]) -> bool {
        self.protein_source
            .iter()
            .any(|p| wanted.contains(&p.trim().to_lowercase().as_str()))
    }

    /// Whether auto mode may use this card as a lunch/dinner main.
    pub fn is_eligible_main(&self) -> bool {
        let kcal = self.macros_per_serving.calories;
        self.role.can_be_main()
            && self.batch_friendly
            && (MAIN_CAL_MIN..=MAIN_CAL_MAX).contains(&kcal)
            && self.has_meal_type(&["lunch", "dinner"])
    }

    /// Whether the planner may add this card as a side.
    pub fn is_eligible_side(&self) -> bool {
        let kcal = self.macros_per_serving.calories;
        self.role.can_be_side()
            && self.batch_friendly
            && (SIDE_CAL_MIN..=SIDE_CAL_MAX).contains(&kcal)
            && self.has_meal_type(&["side"])
    }

    pub fn is_seafood(&self) -> bool {
        self.has_protein(SEAFOOD_PROTEINS)
    }

    pub fn is_beef(&self) -> bool {
        self.has_protein(&["beef"])
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        let m = &self.macros_per_serving;
        format!(
            "{} ({}): {} kcal, P:{} C:{} F:{}, cap {}/wk",
            self.id,
            self.role.as_str(),
            m.calories,
            m.protein_g,
            m.carbs_g,
            m.fat_g,
            self.meal_freq_cap_per_week
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> RecipeCard {
        serde_yaml_ng::from_str(
            r#"
id: chicken_rice
name: Chicken and Rice
role: main
macros_per_serving: { calories: 550, protein_g: 45, carbs_g: 50, fat_g: 15 }
meal_types: [lunch, dinner]
protein_source: [chicken]
ingredients:
  - { item: chicken thigh, qty: 16, unit: oz, grocery_section: meat }
  - { item: rice, qty: 1, unit: cups }
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let card = sample_card();
        assert_eq!(card.servings_default, 2);
        assert_eq!(card.meal_freq_cap_per_week, 3);
        assert!(card.batch_friendly);
        assert_eq!(card.ingredients[1].unit, Unit::Cup);
        assert_eq!(card.ingredients[1].grocery_section, "other");
    }

    #[test]
    fn test_missing_macros_rejected() {
        let res: std::result::Result<RecipeCard, _> = serde_yaml_ng::from_str(
            "id: x\nname: X\nmacros_per_serving: { calories: 100, protein_g: 5 }\n",
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_empty_unit_rejected() {
        let res: std::result::Result<RecipeCard, _> = serde_yaml_ng::from_str(
            r#"
id: x
name: X
macros_per_serving: { calories: 100, protein_g: 5, carbs_g: 5, fat_g: 5 }
ingredients:
  - { item: salt, qty: 1, unit: "" }
"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_validate() {
        let card = sample_card();
        assert!(card.validate().is_ok());

        let mut invalid = sample_card();
        invalid.servings_default = 0;
        assert!(invalid.validate().is_err());

        let mut negative = sample_card();
        negative.macros_per_serving.fat_g = -1.0;
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_eligibility() {
        let card = sample_card();
        assert!(card.is_eligible_main());
        assert!(!card.is_eligible_side());

        let mut heavy = sample_card();
        heavy.macros_per_serving.calories = 950.0;
        assert!(!heavy.is_eligible_main());

        let mut not_batch = sample_card();
        not_batch.batch_friendly = false;
        assert!(!not_batch.is_eligible_main());
    }

    #[test]
    fn test_macros_add_and_scale() {
        let a = Macros {
            calories: 100.0,
            protein_g: 10.0,
            carbs_g: 5.0,
            fat_g: 2.0,
        };
        let sum = a + a.scaled(0.5);
        assert!((sum.calories - 150.0).abs() < 1e-9);
        assert!((sum.protein_g - 15.0).abs() < 1e-9);
    }
}
