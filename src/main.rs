use clap::Parser;

use meal_plan_maker_rs::aggregator::summarize;
use meal_plan_maker_rs::cards::{CardRepository, CardSource, JsonFileSource, YamlDirSource};
use meal_plan_maker_rs::cli::{Cli, Command};
use meal_plan_maker_rs::config::{load_selection, load_targets};
use meal_plan_maker_rs::error::Result;
use meal_plan_maker_rs::logging::init_logging;
use meal_plan_maker_rs::models::RepeatPolicy;
use meal_plan_maker_rs::planner::plan;
use meal_plan_maker_rs::report::{
    display_card_list, display_week_plan, display_written, write_reports,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cards = load_cards(&cli)?;

    match cli.subcommand() {
        Command::Plan => cmd_plan(&cli, &cards),
        Command::Cards => {
            display_card_list(&cards);
            Ok(())
        }
    }
}

/// Load cards from --cards-json when given, otherwise from --cards-dir.
fn load_cards(cli: &Cli) -> Result<CardRepository> {
    let source: Box<dyn CardSource> = match &cli.cards_json {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(YamlDirSource::new(&cli.cards_dir)),
    };
    CardRepository::from_source(source.as_ref())
}

/// Plan a week, summarize it, write reports and print the summary.
fn cmd_plan(cli: &Cli, cards: &CardRepository) -> Result<()> {
    let mut targets = load_targets(cli.targets.as_deref())?;
    if cli.allow_repeats {
        targets.on_variety_exhausted = RepeatPolicy::Repeat;
    }

    let selection = load_selection(cli.selection.as_deref(), &cli.select)?;
    let week = plan(cards, &targets, Some(selection.as_slice()), cli.seed)?;
    let (summaries, grocery) = summarize(&week, cards, &targets)?;

    let written = write_reports(&cli.out_dir, &week, &summaries, &grocery)?;

    display_week_plan(&week, &summaries, &grocery);
    display_written(&written);
    Ok(())
}
