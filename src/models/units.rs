use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Grams per avoirdupois ounce.
pub const OZ_TO_G: f64 = 28.349523125;

/// Grams per pound.
pub const LB_TO_G: f64 = 453.59237;

/// Millilitres per US tablespoon.
pub const TBSP_TO_ML: f64 = 14.7867648;

/// Physical dimension of a unit. Only units sharing a dimension can merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Mass,
    Volume,
    Count,
    Other,
}

/// A grocery unit, parsed from the free-text unit on a card ingredient.
///
/// Unknown units are kept verbatim (lowercased) as `Other` and never merge
/// with anything but themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    Gram,
    Kilogram,
    Ounce,
    Pound,
    Teaspoon,
    Tablespoon,
    Cup,
    Milliliter,
    Liter,
    Whole,
    Other(String),
}

impl Unit {
    /// Parse a unit, accepting common aliases and plurals.
    pub fn parse(raw: &str) -> Result<Self, PlanError> {
        let norm = raw.trim().to_lowercase();
        let unit = match norm.as_str() {
            "" => return Err(PlanError::InvalidUnit(raw.to_string())),
            "g" | "gram" | "grams" => Unit::Gram,
            "kg" | "kilogram" | "kilograms" => Unit::Kilogram,
            "oz" | "ounce" | "ounces" => Unit::Ounce,
            "lb" | "lbs" | "pound" | "pounds" => Unit::Pound,
            "tsp" | "teaspoon" | "teaspoons" => Unit::Teaspoon,
            "tbsp" | "tablespoon" | "tablespoons" => Unit::Tablespoon,
            "cup" | "cups" => Unit::Cup,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Unit::Milliliter,
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::Liter,
            "whole" => Unit::Whole,
            _ => Unit::Other(norm),
        };
        Ok(unit)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::Cup => "cup",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Whole => "whole",
            Unit::Other(s) => s,
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => Dimension::Mass,
            Unit::Teaspoon | Unit::Tablespoon | Unit::Cup | Unit::Milliliter | Unit::Liter => {
                Dimension::Volume
            }
            Unit::Whole => Dimension::Count,
            Unit::Other(_) => Dimension::Other,
        }
    }

    /// The unit every member of this unit's dimension merges into.
    ///
    /// Mass merges into grams, volume into tablespoons. Count and unknown
    /// units are their own canonical unit.
    pub fn canonical(&self) -> Unit {
        match self.dimension() {
            Dimension::Mass => Unit::Gram,
            Dimension::Volume => Unit::Tablespoon,
            Dimension::Count | Dimension::Other => self.clone(),
        }
    }

    /// Multiplier that converts a quantity in this unit into `canonical()`.
    pub fn factor_to_canonical(&self) -> f64 {
        match self {
            Unit::Gram => 1.0,
            Unit::Kilogram => 1000.0,
            Unit::Ounce => OZ_TO_G,
            Unit::Pound => LB_TO_G,
            Unit::Teaspoon => 1.0 / 3.0,
            Unit::Tablespoon => 1.0,
            Unit::Cup => 16.0,
            Unit::Milliliter => 1.0 / TBSP_TO_ML,
            Unit::Liter => 1000.0 / TBSP_TO_ML,
            Unit::Whole | Unit::Other(_) => 1.0,
        }
    }

    /// Convert `qty` of this unit into `target`, if both share a dimension.
    pub fn convert(&self, qty: f64, target: &Unit) -> Option<f64> {
        if self == target {
            return Some(qty);
        }
        if self.dimension() != target.dimension()
            || matches!(self.dimension(), Dimension::Count | Dimension::Other)
        {
            return None;
        }
        Some(qty * self.factor_to_canonical() / target.factor_to_canonical())
    }

    /// Round a quantity the way a shopping list shows it.
    pub fn round_for_display(&self, qty: f64) -> f64 {
        match self {
            Unit::Gram | Unit::Milliliter => qty.round(),
            Unit::Ounce | Unit::Tablespoon | Unit::Teaspoon | Unit::Cup => {
                (qty * 10.0).round() / 10.0
            }
            _ => (qty * 100.0).round() / 100.0,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Unit {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Unit::parse(&value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}
