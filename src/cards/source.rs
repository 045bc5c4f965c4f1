use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::RecipeCard;

/// Anything that can hand the planner a set of recipe cards.
pub trait CardSource {
    fn load_cards(&self) -> Result<Vec<RecipeCard>>;

    /// Human-readable origin, for logs and errors.
    fn describe(&self) -> String;
}

/// Reads every `*.yaml` / `*.yml` file in a directory, in file-name order.
#[derive(Debug, Clone)]
pub struct YamlDirSource {
    dir: PathBuf,
}

impl YamlDirSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn card_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir)?.collect::<std::io::Result<Vec<_>>>()?;
        let mut files: Vec<PathBuf> = entries
            .into_iter()
            .map(|entry| entry.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
            })
            .collect();
        files.sort();
        Ok(files)
    }
}

/// Parse one YAML card file holding either one card or a list of cards.
/// Empty documents yield no cards.
pub fn parse_card_yaml(content: &str) -> Result<Vec<RecipeCard>> {
    let value: Value = if content.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml_ng::from_str(content)?
    };

    Ok(match value {
        Value::Null => Vec::new(),
        Value::Sequence(_) => serde_yaml_ng::from_value(value)?,
        _ => vec![serde_yaml_ng::from_value(value)?],
    })
}

impl CardSource for YamlDirSource {
    fn load_cards(&self) -> Result<Vec<RecipeCard>> {
        let mut cards = Vec::new();
        for path in self.card_files()? {
            let content = fs::read_to_string(&path)?;
            let parsed = parse_card_yaml(&content)?;
            debug!(file = %path.display(), count = parsed.len(), "parsed card file");
            cards.extend(parsed);
        }
        info!("Loaded {} cards from {}", cards.len(), self.describe());
        Ok(cards)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Reads a JSON array of cards from one file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CardSource for JsonFileSource {
    fn load_cards(&self) -> Result<Vec<RecipeCard>> {
        let content = fs::read_to_string(&self.path)?;
        let cards: Vec<RecipeCard> = serde_json::from_str(&content)?;
        info!("Loaded {} cards from {}", cards.len(), self.describe());
        Ok(cards)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const SINGLE: &str = r#"
id: salmon_bowl
name: Salmon Bowl
role: main
macros_per_serving: { calories: 610, protein_g: 42, carbs_g: 55, fat_g: 22 }
meal_types: [lunch, dinner]
"#;

    const LIST: &str = r#"
- id: green_beans
  name: Garlic Green Beans
  role: side
  macros_per_serving: { calories: 90, protein_g: 3, carbs_g: 10, fat_g: 4 }
  meal_types: [side]
- id: rice
  name: Jasmine Rice
  role: side
  macros_per_serving: { calories: 200, protein_g: 4, carbs_g: 44, fat_g: 0 }
  meal_types: [side]
"#;

    #[test]
    fn test_parse_single_and_list() {
        assert_eq!(parse_card_yaml(SINGLE).unwrap().len(), 1);
        assert_eq!(parse_card_yaml(LIST).unwrap().len(), 2);
        assert!(parse_card_yaml("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_yaml_dir_source_reads_yaml_and_yml_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.yaml"), SINGLE).unwrap();
        fs::write(dir.path().join("b.yml"), LIST).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a card").unwrap();
        fs::write(dir.path().join("empty.yaml"), "").unwrap();

        let cards = YamlDirSource::new(dir.path()).load_cards().unwrap();
        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["salmon_bowl", "green_beans", "rice"]);
    }

    #[test]
    fn test_json_file_source() {
        let json = r#"[
            {"id": "oats", "name": "Overnight Oats", "role": "main",
             "macros_per_serving": {"calories": 420, "protein_g": 30, "carbs_g": 50, "fat_g": 10},
             "meal_types": ["lunch"]}
        ]"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let cards = JsonFileSource::new(file.path()).load_cards().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Overnight Oats");
    }

    #[test]
    fn test_bad_card_error_names_field() {
        let missing_fat = "id: oats\nname: Oats\nmacros_per_serving: { calories: 420, protein_g: 30, carbs_g: 50 }\n";
        let err = parse_card_yaml(missing_fat).unwrap_err();
        assert!(err.to_string().contains("fat_g"), "{}", err);

        let list = format!("- {}", missing_fat.replace('\n', "\n  "));
        let err = parse_card_yaml(&list).unwrap_err();
        assert!(err.to_string().contains("fat_g"), "{}", err);
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let res = YamlDirSource::new("/definitely/not/here").load_cards();
        assert!(matches!(res, Err(crate::error::PlanError::Io(_))));
    }
}
