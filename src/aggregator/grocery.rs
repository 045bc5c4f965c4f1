use std::collections::BTreeMap;

use serde::Serialize;

use crate::cards::CardRepository;
use crate::error::Result;
use crate::models::{Dimension, GroceryLine, GroceryList, Unit, WeekPlan};

/// One ingredient amount contributed by one placed portion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub item: String,
    pub section: String,
    pub quantity: f64,
    pub unit: Unit,
}

/// Trimmed, lowercased item key.
pub fn normalize_item(item: &str) -> String {
    item.trim().to_lowercase()
}

/// Every ingredient amount the plan calls for, in plan order.
///
/// Each portion contributes `qty * servings / servings_default` of each of
/// its card's ingredients.
pub fn ingredient_contributions(
    plan: &WeekPlan,
    cards: &CardRepository,
) -> Result<Vec<Contribution>> {
    let mut out = Vec::new();
    for slot in plan.slots() {
        for portion in slot.portions() {
            let card = cards.require(&portion.card_id)?;
            let scale = portion.servings / f64::from(card.servings_default);
            out.extend(card.ingredients.iter().map(|ing| Contribution {
                item: normalize_item(&ing.item),
                section: ing.grocery_section.clone(),
                quantity: ing.qty * scale,
                unit: ing.unit.clone(),
            }));
        }
    }
    Ok(out)
}

/// Per-item running totals before unit merging.
#[derive(Debug, Default)]
struct ItemTally {
    section: Option<String>,
    units: BTreeMap<Unit, f64>,
}

/// Merge contributions into shopping lines.
///
/// Units of one dimension merge into the canonical unit when an item uses
/// two or more of them; a lone unit is kept as written. Items listed under
/// incompatible units keep one line per unit, each flagged `unmerged`.
pub fn merge_contributions(contributions: &[Contribution]) -> GroceryList {
    let mut items: BTreeMap<&str, ItemTally> = BTreeMap::new();
    for c in contributions {
        let tally = items.entry(c.item.as_str()).or_default();
        if tally.section.is_none() {
            tally.section = Some(c.section.clone());
        }
        *tally.units.entry(c.unit.clone()).or_insert(0.0) += c.quantity;
    }

    let mut lines = Vec::new();
    for (item, tally) in items {
        let section = tally.section.unwrap_or_else(|| "other".to_string());

        let mut by_dimension: BTreeMap<Dimension, Vec<(Unit, f64)>> = BTreeMap::new();
        for (unit, qty) in tally.units {
            by_dimension.entry(unit.dimension()).or_default().push((unit, qty));
        }

        let mut item_lines: Vec<(Unit, f64)> = Vec::new();
        for (dimension, group) in by_dimension {
            let convertible = matches!(dimension, Dimension::Mass | Dimension::Volume);
            if convertible && group.len() > 1 {
                let canonical = group[0].0.canonical();
                let total: f64 = group
                    .iter()
                    .filter_map(|(unit, qty)| unit.convert(*qty, &canonical))
                    .sum();
                item_lines.push((canonical, total));
            } else {
                item_lines.extend(group);
            }
        }

        let unmerged = item_lines.len() > 1;
        lines.extend(item_lines.into_iter().map(|(unit, quantity)| GroceryLine {
            item: item.to_string(),
            section: section.clone(),
            quantity,
            unit,
            unmerged,
        }));
    }

    lines.sort_by(|a, b| {
        a.section
            .cmp(&b.section)
            .then_with(|| a.item.cmp(&b.item))
            .then_with(|| a.unit.cmp(&b.unit))
    });
    GroceryList { lines }
}

/// Build the week's consolidated shopping list.
pub fn aggregate_grocery(plan: &WeekPlan, cards: &CardRepository) -> Result<GroceryList> {
    let contributions = ingredient_contributions(plan, cards)?;
    Ok(merge_contributions(&contributions))
}
