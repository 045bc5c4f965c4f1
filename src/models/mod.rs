pub mod card;
pub mod plan;
pub mod summary;
pub mod targets;
pub mod units;

pub use card::{Ingredient, Macros, RecipeCard, Role};
pub use plan::{DayPlan, MealSlot, MealType, PlanMode, Portion, WeekPlan, Weekday};
pub use summary::{DayNote, DaySummary, GroceryLine, GroceryList};
pub use targets::{RepeatPolicy, Targets};
pub use units::{Dimension, Unit};
