use crate::models::{DayNote, DaySummary, Macros, Targets, WeekPlan};
use crate::planner::constants::SLIGHT_CALORIE_GAP;

/// Advisory notes for a day's totals.
pub fn day_notes(totals: &Macros, targets: &Targets) -> Vec<DayNote> {
    let mut notes = Vec::new();

    if totals.calories < targets.calories_min {
        if targets.calories_min - totals.calories <= SLIGHT_CALORIE_GAP {
            notes.push(DayNote::CaloriesSlightlyLow);
        } else {
            notes.push(DayNote::CaloriesLow);
        }
    } else if totals.calories > targets.calories_max {
        notes.push(DayNote::CaloriesHigh);
    }

    if totals.protein_g < targets.protein_min_g {
        notes.push(DayNote::ProteinLow);
    }

    if targets.carbs_max_g.is_some_and(|max| totals.carbs_g > max) {
        notes.push(DayNote::CarbsHigh);
    }
    if targets.fat_max_g.is_some_and(|max| totals.fat_g > max) {
        notes.push(DayNote::FatHigh);
    }

    notes
}

/// Sum lunch and dinner for each day and attach notes.
pub fn summarize_days(plan: &WeekPlan, targets: &Targets) -> Vec<DaySummary> {
    plan.days
        .iter()
        .map(|day| {
            let totals = day.lunch.totals() + day.dinner.totals();
            DaySummary {
                day: day.day,
                totals,
                notes: day_notes(&totals, targets),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Macros {
        Macros {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    #[test]
    fn test_on_target_day_has_no_notes() {
        let notes = day_notes(&totals(1500.0, 120.0, 150.0, 50.0), &Targets::default());
        assert!(notes.is_empty());
    }

    #[test]
    fn test_calorie_notes() {
        let t = Targets::default();
        assert_eq!(
            day_notes(&totals(1250.0, 120.0, 0.0, 0.0), &t),
            vec![DayNote::CaloriesSlightlyLow]
        );
        assert_eq!(
            day_notes(&totals(1100.0, 120.0, 0.0, 0.0), &t),
            vec![DayNote::CaloriesLow]
        );
        assert_eq!(
            day_notes(&totals(1700.0, 120.0, 0.0, 0.0), &t),
            vec![DayNote::CaloriesHigh]
        );
    }

    #[test]
    fn test_macro_notes() {
        let t = Targets {
            carbs_max_g: Some(150.0),
            fat_max_g: Some(60.0),
            ..Default::default()
        };
        let notes = day_notes(&totals(1500.0, 90.0, 200.0, 70.0), &t);
        assert_eq!(
            notes,
            vec![DayNote::ProteinLow, DayNote::CarbsHigh, DayNote::FatHigh]
        );
    }
}
