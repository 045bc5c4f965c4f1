use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::card::Macros;
use crate::models::plan::Weekday;
use crate::models::units::Unit;

/// Advisory note attached to a day that misses a target. Never blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayNote {
    CaloriesSlightlyLow,
    CaloriesLow,
    CaloriesHigh,
    ProteinLow,
    CarbsHigh,
    FatHigh,
}

impl DayNote {
    pub fn message(self) -> &'static str {
        match self {
            DayNote::CaloriesSlightlyLow => {
                "Slightly increase meal portions (e.g. +2 oz protein or +100 g potato/veg with olive oil)."
            }
            DayNote::CaloriesLow => {
                "Day is under target; choose higher-calorie cards or larger portions so main meals do the work."
            }
            DayNote::CaloriesHigh => {
                "Slightly reduce potato/rice or added fats/dressings to bring calories into range."
            }
            DayNote::ProteinLow => {
                "Protein a bit low; add ~2-4 oz lean protein to one meal or bump protein portions."
            }
            DayNote::CarbsHigh => "Carbs above target; trim carb portions slightly on this day.",
            DayNote::FatHigh => "Fat above target; ease up on oils, sauces, or fatty cuts.",
        }
    }
}

impl fmt::Display for DayNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Nutrition totals for one day across lunch and dinner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: Weekday,
    pub totals: Macros,
    pub notes: Vec<DayNote>,
}

impl DaySummary {
    /// All notes joined into one sentence block.
    pub fn notes_text(&self) -> String {
        self.notes
            .iter()
            .map(|n| n.message())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One shopping list line after unit merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryLine {
    pub item: String,
    pub section: String,
    pub quantity: f64,
    pub unit: Unit,
    /// The same item is also listed under a unit this one cannot convert to.
    pub unmerged: bool,
}

impl GroceryLine {
    pub fn display_quantity(&self) -> f64 {
        self.unit.round_for_display(self.quantity)
    }
}

/// The consolidated shopping list, sorted by (section, item, unit).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    pub lines: Vec<GroceryLine>,
}

impl GroceryList {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines for `item` (already normalized: trimmed, lowercase).
    pub fn find(&self, item: &str) -> Vec<&GroceryLine> {
        self.lines.iter().filter(|l| l.item == item).collect()
    }

    /// Lines grouped by grocery section, sections in alphabetical order.
    pub fn by_section(&self) -> BTreeMap<&str, Vec<&GroceryLine>> {
        let mut sections: BTreeMap<&str, Vec<&GroceryLine>> = BTreeMap::new();
        for line in &self.lines {
            sections.entry(line.section.as_str()).or_default().push(line);
        }
        sections
    }
}
