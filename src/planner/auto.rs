use std::collections::VecDeque;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::cards::CardRepository;
use crate::error::{PlanError, Result};
use crate::models::{
    DayPlan, MealSlot, MealType, PlanMode, Portion, RecipeCard, Targets, WeekPlan, Weekday,
};
use crate::planner::constants::DAYS_PER_WEEK;
use crate::planner::sides::fill_sides;
use crate::planner::usage::UsageLedger;
use crate::planner::{fallback_main, resolve_seed};

/// Working state for one auto-mode run.
struct AutoPlanner<'a> {
    targets: &'a Targets,
    /// Every eligible main, in id order.
    mains: Vec<&'a RecipeCard>,
    sides: Vec<&'a RecipeCard>,
    /// Mains currently being batched across the week.
    rotation: Vec<&'a RecipeCard>,
    /// Eligible mains not yet in the rotation, in promotion order.
    reserve: VecDeque<&'a RecipeCard>,
    ledger: UsageLedger,
    rng: StdRng,
}

impl<'a> AutoPlanner<'a> {
    fn new(cards: &'a CardRepository, targets: &'a Targets, seed: u64) -> Result<Self> {
        let mains = cards.eligible_mains();
        if mains.is_empty() {
            return Err(PlanError::NoEligibleMains);
        }
        let sides = cards.eligible_sides();
        let mut rng = StdRng::seed_from_u64(seed);

        let (min_u, max_u) = targets.unique_main_range();
        let max_u = (max_u as usize).min(mains.len());
        let min_u = (min_u as usize).clamp(1, max_u);
        let n_mains = rng.gen_range(min_u..=max_u);

        let mut shuffled = mains.clone();
        shuffled.shuffle(&mut rng);
        let reserve: VecDeque<&RecipeCard> = shuffled.split_off(n_mains).into();
        let rotation = shuffled;

        info!(
            "Auto mode rotating {} of {} eligible mains with {} eligible sides",
            rotation.len(),
            mains.len(),
            sides.len()
        );
        if mains.len() == 1 {
            warn!("Only one eligible main; every meal will reuse it. Add more eligible mains for variety.");
        }

        Ok(Self {
            targets,
            mains,
            sides,
            rotation,
            reserve,
            ledger: UsageLedger::new(),
            rng,
        })
    }

    /// Move the next reserve main that still has headroom into the rotation.
    fn promote_from_reserve(&mut self) -> Option<&'a RecipeCard> {
        while let Some(card) = self.reserve.pop_front() {
            if self.ledger.has_headroom(card) {
                self.rotation.push(card);
                return Some(card);
            }
        }
        None
    }

    /// Weighted random pick among rotation mains below their cap.
    ///
    /// Weight is the remaining weekly headroom, so fresher mains come up more.
    fn next_main(&mut self, day: Weekday, meal: MealType) -> Result<&'a RecipeCard> {
        loop {
            let candidates: Vec<&'a RecipeCard> = self
                .rotation
                .iter()
                .copied()
                .filter(|c| self.ledger.has_headroom(c))
                .collect();

            if !candidates.is_empty() {
                let weights: Vec<u32> = candidates.iter().map(|c| self.ledger.headroom(c)).collect();
                let dist = WeightedIndex::new(&weights)?;
                return Ok(candidates[dist.sample(&mut self.rng)]);
            }

            match self.promote_from_reserve() {
                Some(card) => info!(%day, %meal, main = %card.id, "rotation exhausted; adding main"),
                None => break,
            }
        }

        fallback_main(
            &self.mains,
            &self.ledger,
            self.targets.on_variety_exhausted,
            day,
            meal,
        )
    }

    fn plan_slot(&mut self, day: Weekday, meal: MealType) -> Result<MealSlot> {
        let main = self.next_main(day, meal)?;
        self.ledger.record(main);

        let mut slot = MealSlot::new(day, meal, Portion::new(main, 1.0));
        fill_sides(&mut slot, &self.sides, &mut self.ledger, self.targets);
        debug!(%day, %meal, "planned {}", slot.display_name());
        Ok(slot)
    }
}

/// Build a week automatically from the repository's eligible mains and sides.
///
/// The same seed, cards and targets always produce the same plan. When `seed`
/// is `None` one is drawn and recorded on the returned plan.
pub fn plan_week(cards: &CardRepository, targets: &Targets, seed: Option<u64>) -> Result<WeekPlan> {
    let seed = resolve_seed(seed);
    let mut planner = AutoPlanner::new(cards, targets, seed)?;

    let mut days = Vec::with_capacity(DAYS_PER_WEEK);
    for day in Weekday::ALL {
        let lunch = planner.plan_slot(day, MealType::Lunch)?;
        let dinner = planner.plan_slot(day, MealType::Dinner)?;
        days.push(DayPlan { day, lunch, dinner });
    }

    Ok(WeekPlan {
        seed,
        mode: PlanMode::Auto,
        days,
    })
}
