use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{DaySummary, GroceryList, WeekPlan};

/// Capitalize the first letter of a section name for headings.
fn heading(section: &str) -> String {
    let mut chars = section.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Other".to_string(),
    }
}

/// Render the human-readable weekly plan.
pub fn render_markdown(plan: &WeekPlan, summaries: &[DaySummary], grocery: &GroceryList) -> String {
    let mut out = String::new();

    // Writing to a String never fails.
    let _ = writeln!(out, "# Weekly Plan (Lunch / Dinner)\n");
    for day in &plan.days {
        let _ = writeln!(
            out,
            "**{}**: {} / {}\n",
            day.day,
            day.lunch.display_name(),
            day.dinner.display_name()
        );
    }

    let _ = writeln!(out, "\n## Daily Summary\n");
    for summary in summaries {
        let t = &summary.totals;
        let _ = write!(
            out,
            "- {}: ~{:.0} kcal (P {:.0} g / C {:.0} g / F {:.0} g).",
            summary.day, t.calories, t.protein_g, t.carbs_g, t.fat_g
        );
        if summary.notes.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, " {}", summary.notes_text());
        }
    }

    let _ = writeln!(out, "\n## Grocery List (by section)\n");
    for (section, lines) in grocery.by_section() {
        let _ = writeln!(out, "### {}", heading(section));
        for line in lines {
            let flag = if line.unmerged { " (unmerged)" } else { "" };
            let _ = writeln!(
                out,
                "- {}: {} {}{}",
                line.item,
                line.display_quantity(),
                line.unit,
                flag
            );
        }
        out.push('\n');
    }

    out
}

pub fn write_markdown(
    plan: &WeekPlan,
    summaries: &[DaySummary],
    grocery: &GroceryList,
    path: &Path,
) -> Result<()> {
    fs::write(path, render_markdown(plan, summaries, grocery))?;
    Ok(())
}
