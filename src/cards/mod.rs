mod repository;
mod source;

pub use repository::CardRepository;
pub use source::{parse_card_yaml, CardSource, JsonFileSource, YamlDirSource};
