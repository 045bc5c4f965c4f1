/// Meal slots per day (lunch, dinner).
pub const SLOTS_PER_DAY: usize = 2;

/// Days in a planned week.
pub const DAYS_PER_WEEK: usize = 7;

/// Total meal slots in a planned week.
pub const SLOTS_PER_WEEK: usize = SLOTS_PER_DAY * DAYS_PER_WEEK;

// ─────────────────────────────────────────────────────────────────────────────
// Auto-mode eligibility bands (kcal per serving)
// ─────────────────────────────────────────────────────────────────────────────

pub const MAIN_CAL_MIN: f64 = 300.0;
pub const MAIN_CAL_MAX: f64 = 800.0;

pub const SIDE_CAL_MIN: f64 = 50.0;
pub const SIDE_CAL_MAX: f64 = 300.0;

// ─────────────────────────────────────────────────────────────────────────────
// Variety defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Unique mains in the auto-mode rotation when targets leave it open.
pub const DEFAULT_MIN_UNIQUE_MAINS: u32 = 2;
pub const DEFAULT_MAX_UNIQUE_MAINS: u32 = 3;

/// Protein sources that count as seafood for the manual-mode variety rule.
pub const SEAFOOD_PROTEINS: &[&str] = &["fish", "shrimp", "salmon"];

// ─────────────────────────────────────────────────────────────────────────────
// Day summary thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Calorie shortfall up to which a day is only "slightly" low.
pub const SLIGHT_CALORIE_GAP: f64 = 200.0;
