use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::CardRepository;
use crate::error::{PlanError, Result};
use crate::models::{MealSlot, PlanMode, Portion, RecipeCard, RepeatPolicy, Targets, WeekPlan};
use crate::planner::constants::SLOTS_PER_WEEK;
use crate::planner::sides::fill_sides;
use crate::planner::usage::UsageLedger;
use crate::planner::{resolve_seed, slot_position};

fn default_servings() -> f64 {
    1.0
}

/// One user-chosen main: which card, how many slots, how many servings each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub id: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default = "default_servings")]
    pub servings: f64,
}

fn default_count() -> u32 {
    1
}

impl SelectionEntry {
    pub fn new(id: impl Into<String>, count: u32) -> Self {
        Self {
            id: id.into(),
            count,
            servings: 1.0,
        }
    }
}

/// A pending main placement.
#[derive(Debug, Clone, Copy)]
struct PoolEntry<'a> {
    card: &'a RecipeCard,
    servings: f64,
}

fn pool_count(pool: &[PoolEntry], card_id: &str) -> u32 {
    pool.iter().filter(|e| e.card.id == card_id).count() as u32
}

fn pool_has_headroom(pool: &[PoolEntry], card: &RecipeCard) -> bool {
    pool_count(pool, &card.id) < card.meal_freq_cap_per_week
}

/// Expand `id x count` entries into one pool entry per slot, capped per card.
fn expand_pool<'a>(
    selection: &[SelectionEntry],
    cards: &'a CardRepository,
) -> Result<Vec<PoolEntry<'a>>> {
    let mut pool = Vec::new();
    for entry in selection {
        let card = cards.require(&entry.id)?;
        if !(entry.servings > 0.0 && entry.servings.is_finite()) {
            return Err(PlanError::InvalidInput(format!(
                "servings for {} must be positive, got {}",
                entry.id, entry.servings
            )));
        }

        let room = card
            .meal_freq_cap_per_week
            .saturating_sub(pool_count(&pool, &card.id));
        let mut n = entry.count;
        if n > room {
            warn!(
                "{} requested {}x but capped at {}; truncating.",
                card.id, entry.count, card.meal_freq_cap_per_week
            );
            n = room;
        }
        if !card.role.can_be_main() {
            debug!(card = %card.id, "side-role card selected as a main");
        }
        pool.extend((0..n).map(|_| PoolEntry {
            card,
            servings: entry.servings,
        }));
    }
    Ok(pool)
}

/// Light variety rules for hand-picked weeks.
///
/// Adds one seafood main when none was picked, and keeps at most one
/// beef-based entry, swapping extras for the most common non-beef pick.
fn enforce_variety<'a>(pool: &mut Vec<PoolEntry<'a>>, cards: &'a CardRepository) {
    if pool.is_empty() {
        return;
    }

    if !pool.iter().any(|e| e.card.is_seafood()) {
        let seafood = cards
            .cards()
            .find(|c| c.is_seafood() && c.role.can_be_main() && c.meal_freq_cap_per_week > 0);
        if let Some(card) = seafood {
            info!(card = %card.id, "no seafood selected; adding one seafood main");
            pool.push(PoolEntry {
                card,
                servings: 1.0,
            });
        }
    }

    let beef_indices: Vec<usize> = pool
        .iter()
        .enumerate()
        .filter(|(_, e)| e.card.is_beef())
        .map(|(i, _)| i)
        .collect();
    if beef_indices.len() <= 1 {
        return;
    }

    let mut dropped = Vec::new();
    for &idx in &beef_indices[1..] {
        match most_common_non_beef(pool) {
            Some(replacement) => {
                info!(from = %pool[idx].card.id, to = %replacement.card.id, "limiting beef-heavy meals");
                pool[idx] = replacement;
            }
            None => dropped.push(idx),
        }
    }
    for idx in dropped.into_iter().rev() {
        info!(card = %pool[idx].card.id, "dropping extra beef meal with no replacement available");
        pool.remove(idx);
    }
}

/// Most frequent non-beef entry that can still take another slot.
///
/// Ties go to the lowest card id.
fn most_common_non_beef<'a>(pool: &[PoolEntry<'a>]) -> Option<PoolEntry<'a>> {
    pool.iter()
        .filter(|e| !e.card.is_beef() && pool_has_headroom(pool, e.card))
        .max_by(|a, b| {
            pool_count(pool, &a.card.id)
                .cmp(&pool_count(pool, &b.card.id))
                .then_with(|| b.card.id.cmp(&a.card.id))
        })
        .copied()
}

/// Trim or pad the pool to exactly one entry per slot.
///
/// Padding cycles through the picked cards that still have headroom. If
/// every pick is at its cap the repeat policy decides.
fn fit_to_week<'a>(
    mut pool: Vec<PoolEntry<'a>>,
    policy: RepeatPolicy,
) -> Result<Vec<PoolEntry<'a>>> {
    if pool.len() > SLOTS_PER_WEEK {
        warn!(
            "selection covers {} meals; keeping the first {}",
            pool.len(),
            SLOTS_PER_WEEK
        );
        pool.truncate(SLOTS_PER_WEEK);
        return Ok(pool);
    }

    let mut distinct: Vec<PoolEntry<'a>> = Vec::new();
    for entry in &pool {
        if !distinct.iter().any(|d| d.card.id == entry.card.id) {
            distinct.push(*entry);
        }
    }

    while pool.len() < SLOTS_PER_WEEK {
        let mut progressed = false;
        for entry in &distinct {
            if pool.len() < SLOTS_PER_WEEK && pool_has_headroom(&pool, entry.card) {
                pool.push(*entry);
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    while pool.len() < SLOTS_PER_WEEK {
        let (day, meal) = slot_position(pool.len());
        let least_used = distinct
            .iter()
            .min_by(|a, b| {
                pool_count(&pool, &a.card.id)
                    .cmp(&pool_count(&pool, &b.card.id))
                    .then_with(|| a.card.id.cmp(&b.card.id))
            })
            .copied();
        match (policy, least_used) {
            (RepeatPolicy::Repeat, Some(entry)) => {
                warn!(%day, %meal, main = %entry.card.id, "weekly caps exhausted; repeating main");
                pool.push(entry);
            }
            _ => return Err(PlanError::InsufficientVariety { day, meal }),
        }
    }

    Ok(pool)
}

/// Build a week from a user-supplied selection of mains.
///
/// The capped pool is trimmed or padded to a full week, then shuffled with
/// the seed so padded repeats land anywhere in the week. Sides are filled the same way as in auto mode.
pub fn plan_week_from_selection(
    cards: &CardRepository,
    targets: &Targets,
    selection: &[SelectionEntry],
    seed: Option<u64>,
) -> Result<WeekPlan> {
    if selection.is_empty() {
        return Err(PlanError::InvalidInput("selection is empty".to_string()));
    }
    let seed = resolve_seed(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut pool = expand_pool(selection, cards)?;
    enforce_variety(&mut pool, cards);
    let mut pool = fit_to_week(pool, targets.on_variety_exhausted)?;
    pool.shuffle(&mut rng);

    info!("Manual mode placing {} selected meals", pool.len());

    // Mains are booked before sides so a side fill never eats a main's cap.
    let mut ledger = UsageLedger::new();
    for entry in &pool {
        ledger.record(entry.card);
    }

    let sides = cards.eligible_sides();
    let mut slots = Vec::with_capacity(SLOTS_PER_WEEK);
    for (i, entry) in pool.iter().enumerate() {
        let (day, meal) = slot_position(i);
        let mut slot = MealSlot::new(day, meal, Portion::new(entry.card, entry.servings));
        fill_sides(&mut slot, &sides, &mut ledger, targets);
        slots.push(slot);
    }

    WeekPlan::from_slots(seed, PlanMode::Manual, slots).ok_or_else(|| {
        PlanError::InvalidInput(format!("manual plan must fill {} slots", SLOTS_PER_WEEK))
    })
}
