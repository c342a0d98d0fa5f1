use crate::catalog::{Catalog, CatalogSource, Classification, ClassificationFilter};
use crate::state::{FieldId, PromptState};
use crate::tags::Tag;

pub(crate) const WEATHER_SOURCE: &str = r#"
entries:
  - { display_name: Sunny, classification: PG, category: weather }
  - { display_name: Rainy, classification: PG, category: weather }
  - { display_name: Foggy, classification: PG, category: weather }
"#;

pub(crate) const MIXED_SOURCE: &str = r#"
- display_name: man
  content: a tall man
  classification: PG
  category: subjects
  subcategory: Human
- display_name: woman
  classification: PG
  category: subjects
  subcategory: Human
- display_name: dog
  classification: PG
  category: subjects
  subcategory: Animal
- display_name: suit
  classification: PG
  category: outfit
- display_name: lingerie
  classification: NSFW
  category: outfit
- display_name: latex
  classification: EXPLICIT
  category: outfit
- display_name: after dark
  classification: NSFW
  category: mood
"#;

/// Catalog with a single PG `weather` category: Sunny, Rainy, Foggy.
pub(crate) fn weather_catalog() -> Catalog {
    Catalog::load(&[CatalogSource::new("weather", WEATHER_SOURCE)]).unwrap()
}

/// Weather plus subjects (with subcategories), a mixed-rating `outfit`
/// category, and an NSFW-only `mood` category.
pub(crate) fn mixed_catalog() -> Catalog {
    Catalog::load(&[
        CatalogSource::new("weather", WEATHER_SOURCE),
        CatalogSource::new("mixed", MIXED_SOURCE),
    ])
    .unwrap()
}

pub(crate) fn filter(classifications: &[Classification]) -> ClassificationFilter {
    classifications.iter().copied().collect()
}

pub(crate) fn pg() -> ClassificationFilter {
    filter(&[Classification::Pg])
}

/// A state exercising every tag kind across two fields.
pub(crate) fn sample_state(seed: u64) -> PromptState {
    let mut state = PromptState::new(seed, "seedream");
    let weather = state.field_mut(&FieldId::from("weather"));
    weather.append(Tag::category("weather"));
    weather.append(Tag::literal("light breeze"));

    let subjects = state.field_mut(&FieldId::from("subjects"));
    subjects.append(Tag::subcategory("subjects", "Human"));
    subjects.append(Tag::literal("standing"));
    subjects.append(Tag::category("subjects"));
    state
}
