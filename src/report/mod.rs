mod console;
mod markdown;
mod tables;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::models::{DayPlan, DaySummary, GroceryList, PlanMode, WeekPlan};

pub use console::{display_card_list, display_week_plan, display_written};
pub use markdown::{render_markdown, write_markdown};
pub use tables::{write_day_summary_csv, write_grocery_csv, write_week_plan_csv};

pub const WEEK_PLAN_CSV: &str = "week_plan.csv";
pub const DAY_SUMMARY_CSV: &str = "day_summary.csv";
pub const GROCERY_LIST_CSV: &str = "grocery_list.csv";
pub const WEEKLY_PLAN_MD: &str = "weekly_plan.md";
pub const PLAN_JSON: &str = "plan.json";

/// Everything one run produced, as written to `plan.json`.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub seed: u64,
    pub mode: PlanMode,
    pub plan: &'a [DayPlan],
    pub summaries: &'a [DaySummary],
    pub grocery: &'a GroceryList,
}

impl<'a> PlanReport<'a> {
    pub fn new(plan: &'a WeekPlan, summaries: &'a [DaySummary], grocery: &'a GroceryList) -> Self {
        Self {
            seed: plan.seed,
            mode: plan.mode,
            plan: &plan.days,
            summaries,
            grocery,
        }
    }
}

pub fn write_plan_json(report: &PlanReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write every report file into `out_dir`, creating it if needed.
///
/// Returns the written paths in a fixed order.
pub fn write_reports(
    out_dir: &Path,
    plan: &WeekPlan,
    summaries: &[DaySummary],
    grocery: &GroceryList,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let week_csv = out_dir.join(WEEK_PLAN_CSV);
    let days_csv = out_dir.join(DAY_SUMMARY_CSV);
    let grocery_csv = out_dir.join(GROCERY_LIST_CSV);
    let md = out_dir.join(WEEKLY_PLAN_MD);
    let json = out_dir.join(PLAN_JSON);

    write_week_plan_csv(plan, &week_csv)?;
    write_day_summary_csv(summaries, &days_csv)?;
    write_grocery_csv(grocery, &grocery_csv)?;
    write_markdown(plan, summaries, grocery, &md)?;
    write_plan_json(&PlanReport::new(plan, summaries, grocery), &json)?;

    Ok(vec![week_csv, days_csv, grocery_csv, md, json])
}
