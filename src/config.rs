use std::fs;
use std::path::Path;

use serde_yaml_ng::Value;
use tracing::{info, warn};

use crate::error::{PlanError, Result};
use crate::models::Targets;
use crate::planner::SelectionEntry;

/// Targets file looked up in the working directory when none is given.
pub const DEFAULT_TARGETS_FILE: &str = "targets.yaml";

/// Load daily targets.
///
/// An explicit `path` that does not exist falls back to defaults with a
/// warning. Without a path, `./targets.yaml` is used if present.
pub fn load_targets(path: Option<&Path>) -> Result<Targets> {
    let cfg_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => {
            warn!("Targets file '{}' not found. Using defaults.", p.display());
            None
        }
        None => {
            let candidate = Path::new(DEFAULT_TARGETS_FILE);
            candidate.exists().then(|| candidate.to_path_buf())
        }
    };

    let Some(cfg_path) = cfg_path else {
        info!("No targets.yaml found. Using built-in defaults.");
        return Ok(Targets::default().normalized());
    };

    let targets = parse_targets(&fs::read_to_string(&cfg_path)?)?;
    let (min_u, max_u) = targets.unique_main_range();
    info!(
        "Targets loaded from {}: kcal {}-{}, protein >= {} g, unique mains {}-{}",
        cfg_path.display(),
        targets.calories_min,
        targets.calories_max,
        targets.protein_min_g,
        min_u,
        max_u
    );
    Ok(targets)
}

/// Parse a targets document; an empty document means all defaults.
pub fn parse_targets(content: &str) -> Result<Targets> {
    if content.trim().is_empty() {
        return Ok(Targets::default().normalized());
    }
    let targets: Targets = serde_yaml_ng::from_str(content)?;
    Ok(targets.normalized())
}

/// Load the manual-mode selection from a YAML file, or from inline
/// `ID:COUNT` tokens when no file is given. Empty means auto mode.
pub fn load_selection(path: Option<&Path>, tokens: &[String]) -> Result<Vec<SelectionEntry>> {
    match path {
        Some(path) => parse_selection_yaml(&fs::read_to_string(path)?),
        None => parse_select_tokens(tokens),
    }
}

/// Accepts either a mapping `id: count` or a list of `{id, count, servings}`.
pub fn parse_selection_yaml(content: &str) -> Result<Vec<SelectionEntry>> {
    let value: Value = if content.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml_ng::from_str(content)?
    };

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(_) => Ok(serde_yaml_ng::from_value(value)?),
        Value::Mapping(map) => map
            .into_iter()
            .map(|(key, count)| {
                let id = key.as_str().ok_or_else(|| {
                    PlanError::InvalidInput(format!("selection key must be a card id, got {:?}", key))
                })?;
                let count = count.as_u64().ok_or_else(|| {
                    PlanError::InvalidInput(format!("selection count for '{}' must be a whole number", id))
                })?;
                let count = u32::try_from(count).map_err(|_| {
                    PlanError::InvalidInput(format!("selection count for '{}' is too large", id))
                })?;
                Ok(SelectionEntry::new(id, count))
            })
            .collect(),
        _ => Err(PlanError::InvalidInput(
            "Unsupported selection YAML format".to_string(),
        )),
    }
}

/// Parse inline `ID:COUNT` tokens. A repeated id keeps its first position
/// and takes the last count.
pub fn parse_select_tokens(tokens: &[String]) -> Result<Vec<SelectionEntry>> {
    let mut entries: Vec<SelectionEntry> = Vec::new();
    for token in tokens {
        let (id, count) = token.split_once(':').ok_or_else(|| {
            PlanError::InvalidInput(format!("Selection token must be ID:COUNT, got {}", token))
        })?;
        let id = id.trim();
        if id.is_empty() {
            return Err(PlanError::InvalidInput(format!(
                "Selection token has an empty id: {}",
                token
            )));
        }
        let count: u32 = count.trim().parse().map_err(|_| {
            PlanError::InvalidInput(format!("Selection count must be a whole number, got {}", token))
        })?;

        match entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => existing.count = count,
            None => entries.push(SelectionEntry::new(id, count)),
        }
    }
    Ok(entries)
}
