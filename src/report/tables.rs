use std::path::Path;

use crate::error::Result;
use crate::models::{DaySummary, GroceryList, WeekPlan};

/// One row per slot: day, slot, card ids, combined name, calories, protein.
pub fn write_week_plan_csv(plan: &WeekPlan, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["day", "slot", "card_ids", "name", "calories", "protein_g"])?;

    for slot in plan.slots() {
        let totals = slot.totals();
        wtr.write_record([
            slot.day.to_string(),
            slot.meal.to_string(),
            slot.card_ids().join(" | "),
            slot.display_name(),
            format!("{:.0}", totals.calories),
            format!("{:.0}", totals.protein_g),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// One row per day with macro totals and advisory notes.
pub fn write_day_summary_csv(summaries: &[DaySummary], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["day", "calories", "protein_g", "carbs_g", "fat_g", "notes"])?;

    for day in summaries {
        let t = &day.totals;
        wtr.write_record([
            day.day.to_string(),
            format!("{:.0}", t.calories),
            format!("{:.0}", t.protein_g),
            format!("{:.0}", t.carbs_g),
            format!("{:.0}", t.fat_g),
            day.notes_text(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// One row per grocery line, quantities rounded for display.
pub fn write_grocery_csv(grocery: &GroceryList, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["grocery_section", "item", "qty", "unit", "unmerged"])?;

    for line in &grocery.lines {
        wtr.write_record([
            line.section.clone(),
            line.item.clone(),
            line.display_quantity().to_string(),
            line.unit.to_string(),
            line.unmerged.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroceryLine, Unit};
    use tempfile::tempdir;

    #[test]
    fn test_grocery_csv_rounds_for_display() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grocery_list.csv");
        let grocery = GroceryList {
            lines: vec![
                GroceryLine {
                    item: "chicken thigh".to_string(),
                    section: "meat".to_string(),
                    quantity: 680.388_555,
                    unit: Unit::Gram,
                    unmerged: false,
                },
                GroceryLine {
                    item: "olive oil".to_string(),
                    section: "pantry".to_string(),
                    quantity: 1.333_333,
                    unit: Unit::Tablespoon,
                    unmerged: false,
                },
            ],
        };
        write_grocery_csv(&grocery, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "grocery_section,item,qty,unit,unmerged");
        assert_eq!(lines[1], "meat,chicken thigh,680,g,false");
        assert_eq!(lines[2], "pantry,olive oil,1.3,tbsp,false");
    }
}
