//! Domain types for the recipe session
//!
//! The gateway returns id-less `RecipePayload` records; the session assigns a
//! fresh `RecipeId` to each at ingestion. Recipes and ingredients are
//! immutable after that point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A single ingredient in a recipe.
///
/// `is_missing` is true when the recipe needs the ingredient but the gateway
/// did not spot it in the photo (spices, oils, secondary items).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    #[serde(rename = "isMissing")]
    pub is_missing: bool,
}

/// Recipe difficulty as reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Unique recipe identifier, assigned at ingestion and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(Uuid);

impl RecipeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recipe as held by the session, id assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub prep_time: String,
    pub calories: u32,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}

impl Recipe {
    /// Attach a fresh id to a gateway payload
    pub fn from_payload(payload: RecipePayload) -> Self {
        Self {
            id: RecipeId::new(),
            name: payload.name,
            description: payload.description,
            difficulty: payload.difficulty,
            prep_time: payload.prep_time,
            calories: payload.calories,
            tags: payload.tags,
            ingredients: payload.ingredients,
            steps: payload.steps,
        }
    }

    /// Case-insensitive check for a dietary tag
    pub fn has_tag(&self, label: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(label))
    }
}

/// The recipe shape on the wire, before the session assigns an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePayload {
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(rename = "prepTime")]
    pub prep_time: String,
    pub calories: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
}

/// Structured gateway response: what was seen, what could be cooked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "detectedIngredients", default)]
    pub detected_ingredients: Vec<String>,
    #[serde(default)]
    pub recipes: Vec<RecipePayload>,
}

/// Dietary filter applied to the recipe list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DietaryFilter {
    #[default]
    All,
    Vegetarian,
    Vegan,
    Keto,
    GlutenFree,
}

impl DietaryFilter {
    /// Every filter, in display order
    pub const ALL: [DietaryFilter; 5] = [
        DietaryFilter::All,
        DietaryFilter::Vegetarian,
        DietaryFilter::Vegan,
        DietaryFilter::Keto,
        DietaryFilter::GlutenFree,
    ];

    /// Display label, also the tag matched against recipe tags
    pub fn label(&self) -> &'static str {
        match self {
            DietaryFilter::All => "All",
            DietaryFilter::Vegetarian => "Vegetarian",
            DietaryFilter::Vegan => "Vegan",
            DietaryFilter::Keto => "Keto",
            DietaryFilter::GlutenFree => "Gluten-Free",
        }
    }

    /// Whether a recipe passes this filter
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            DietaryFilter::All => true,
            _ => recipe.has_tag(self.label()),
        }
    }
}

impl fmt::Display for DietaryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DietaryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(DietaryFilter::All),
            "vegetarian" => Ok(DietaryFilter::Vegetarian),
            "vegan" => Ok(DietaryFilter::Vegan),
            "keto" => Ok(DietaryFilter::Keto),
            "gluten-free" | "glutenfree" | "gluten_free" => Ok(DietaryFilter::GlutenFree),
            _ => Err(format!(
                "Unknown dietary filter: {}. Supported: all, vegetarian, vegan, keto, gluten-free",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_with_tags(tags: &[&str]) -> Recipe {
        Recipe::from_payload(RecipePayload {
            name: "Test".to_string(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            prep_time: "10 mins".to_string(),
            calories: 100,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: Vec::new(),
            steps: Vec::new(),
        })
    }

    #[test]
    fn test_filter_matches_tag_case_insensitively() {
        let recipe = recipe_with_tags(&["VEGAN", "gluten-free"]);
        assert!(DietaryFilter::Vegan.matches(&recipe));
        assert!(DietaryFilter::GlutenFree.matches(&recipe));
        assert!(!DietaryFilter::Keto.matches(&recipe));
        assert!(DietaryFilter::All.matches(&recipe));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!(
            "gluten-free".parse::<DietaryFilter>().unwrap(),
            DietaryFilter::GlutenFree
        );
        assert_eq!(
            "Vegan".parse::<DietaryFilter>().unwrap(),
            DietaryFilter::Vegan
        );
        assert!("paleo".parse::<DietaryFilter>().is_err());
    }

    #[test]
    fn test_recipe_ids_are_unique() {
        let a = recipe_with_tags(&[]);
        let b = recipe_with_tags(&[]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_parse_analysis_result() {
        let json = r#"{
            "detectedIngredients": ["eggs", "cheese"],
            "recipes": [{
                "name": "Omelette",
                "description": "Quick breakfast",
                "difficulty": "Easy",
                "prepTime": "10 mins",
                "calories": 300,
                "tags": ["Vegetarian", "Keto"],
                "ingredients": [
                    {"name": "eggs", "quantity": "3", "isMissing": false},
                    {"name": "salt", "quantity": "a pinch", "isMissing": true}
                ],
                "steps": ["Crack eggs", "Cook"]
            }]
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.detected_ingredients, vec!["eggs", "cheese"]);
        assert_eq!(result.recipes.len(), 1);
        let recipe = &result.recipes[0];
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert!(recipe.ingredients[1].is_missing);
        assert_eq!(recipe.steps.len(), 2);
    }
}
