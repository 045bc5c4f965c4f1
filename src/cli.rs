use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// MealPlanMaker: plans a week of batch-cooked lunches and dinners from recipe cards.
#[derive(Parser, Debug)]
#[command(name = "meal_plan_maker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory of *.yaml / *.yml recipe cards.
    #[arg(long, default_value = "./cards", global = true)]
    pub cards_dir: PathBuf,

    /// JSON file holding an array of recipe cards (overrides --cards-dir).
    #[arg(long, global = true)]
    pub cards_json: Option<PathBuf>,

    /// Daily targets YAML. Defaults to ./targets.yaml when present.
    #[arg(long, global = true)]
    pub targets: Option<PathBuf>,

    /// Weekly selection YAML: `id: count` mapping or list of {id, count, servings}.
    #[arg(long, global = true)]
    pub selection: Option<PathBuf>,

    /// Inline selection tokens, e.g. --select apple_chicken:3 zucchini_pasta:2
    #[arg(long, num_args = 1.., global = true)]
    pub select: Vec<String>,

    /// Directory for report files.
    #[arg(long, default_value = "./out", global = true)]
    pub out_dir: PathBuf,

    /// Random seed; the same seed reproduces the same week.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Repeat mains past their weekly cap instead of failing.
    #[arg(long, global = true)]
    pub allow_repeats: bool,

    /// Debug-level logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Plan a week and write reports (default).
    Plan,

    /// List loaded cards with their role, nutrition, cap and eligibility.
    Cards,
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan
    }
}

impl Cli {
    /// The subcommand to run; `plan` when none was given.
    pub fn subcommand(&self) -> Command {
        self.command.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["meal_plan_maker"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.subcommand(), Command::Plan);
        assert_eq!(cli.cards_dir, PathBuf::from("./cards"));
        assert_eq!(cli.out_dir, PathBuf::from("./out"));
        assert!(!cli.allow_repeats);
    }

    #[test]
    fn test_select_tokens_and_seed() {
        let cli = Cli::parse_from([
            "meal_plan_maker",
            "--select",
            "a:2",
            "b:3",
            "--seed",
            "42",
            "--allow-repeats",
        ]);
        assert_eq!(cli.select, vec!["a:2", "b:3"]);
        assert_eq!(cli.seed, Some(42));
        assert!(cli.allow_repeats);
    }

    #[test]
    fn test_cards_subcommand() {
        let cli = Cli::parse_from(["meal_plan_maker", "cards", "--cards-dir", "recipes"]);
        assert!(matches!(cli.command, Some(Command::Cards)));
        assert_eq!(cli.subcommand(), Command::Cards);
        assert_eq!(cli.cards_dir, PathBuf::from("recipes"));
    }

    #[test]
    fn test_command_leaves_flags_usable() {
        let cli = Cli::parse_from(["meal_plan_maker", "plan", "--out-dir", "reports"]);
        let command = cli.subcommand();
        assert_eq!(command, Command::Plan);
        assert_eq!(cli.out_dir, PathBuf::from("reports"));
    }
}
