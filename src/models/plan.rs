use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::card::{Macros, RecipeCard};

/// Day of the planned week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 2] = [MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the mains of a plan were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    Auto,
    Manual,
}

/// A card placed in a slot, with how many servings of it are eaten there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portion {
    pub card_id: String,
    pub name: String,
    pub servings: f64,
    /// Per-serving macros copied from the card.
    pub macros: Macros,
}

impl Portion {
    pub fn new(card: &RecipeCard, servings: f64) -> Self {
        Self {
            card_id: card.id.clone(),
            name: card.name.clone(),
            servings,
            macros: card.macros_per_serving,
        }
    }

    pub fn totals(&self) -> Macros {
        self.macros.scaled(self.servings)
    }
}

/// One lunch or dinner: exactly one main plus optional sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSlot {
    pub day: Weekday,
    pub meal: MealType,
    pub main: Portion,
    pub sides: Vec<Portion>,
}

impl MealSlot {
    pub fn new(day: Weekday, meal: MealType, main: Portion) -> Self {
        Self {
            day,
            meal,
            main,
            sides: Vec::new(),
        }
    }

    /// Main first, then sides in the order they were added.
    pub fn portions(&self) -> impl Iterator<Item = &Portion> {
        std::iter::once(&self.main).chain(self.sides.iter())
    }

    pub fn totals(&self) -> Macros {
        self.portions()
            .fold(Macros::default(), |acc, p| acc + p.totals())
    }

    pub fn card_ids(&self) -> Vec<&str> {
        self.portions().map(|p| p.card_id.as_str()).collect()
    }

    /// Display name, e.g. "Chicken Bowl + Side Salad".
    pub fn display_name(&self) -> String {
        self.portions()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: Weekday,
    pub lunch: MealSlot,
    pub dinner: MealSlot,
}

impl DayPlan {
    pub fn slots(&self) -> [&MealSlot; 2] {
        [&self.lunch, &self.dinner]
    }
}

/// Seven days of lunch and dinner, in Monday-to-Sunday order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// Seed the plan was drawn with; re-running with it reproduces the plan.
    pub seed: u64,
    pub mode: PlanMode,
    pub days: Vec<DayPlan>,
}

impl WeekPlan {
    /// Assemble a plan from slots listed Mon lunch, Mon dinner, Tue lunch, ...
    ///
    /// Returns `None` unless exactly 14 slots are given.
    pub fn from_slots(seed: u64, mode: PlanMode, slots: Vec<MealSlot>) -> Option<Self> {
        if slots.len() != Weekday::ALL.len() * MealType::ALL.len() {
            return None;
        }
        let mut iter = slots.into_iter();
        let mut days = Vec::with_capacity(Weekday::ALL.len());
        for day in Weekday::ALL {
            let lunch = iter.next()?;
            let dinner = iter.next()?;
            days.push(DayPlan { day, lunch, dinner });
        }
        Some(Self { seed, mode, days })
    }

    pub fn slots(&self) -> impl Iterator<Item = &MealSlot> {
        self.days.iter().flat_map(|d| d.slots())
    }

    /// How many slots use `card_id` in any role.
    pub fn uses_of(&self, card_id: &str) -> usize {
        self.slots()
            .flat_map(|s| s.portions())
            .filter(|p| p.card_id == card_id)
            .count()
    }

    /// How many slots use `card_id` as the main.
    pub fn main_uses_of(&self, card_id: &str) -> usize {
        self.slots().filter(|s| s.main.card_id == card_id).count()
    }
}
