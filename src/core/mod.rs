//! Core session state and domain types

mod errors;
mod session;
mod types;

pub use errors::SessionError;
pub use session::{CookPosition, Session, View};
pub use types::{
    AnalysisResult, Difficulty, DietaryFilter, Ingredient, Recipe, RecipeId, RecipePayload,
};
