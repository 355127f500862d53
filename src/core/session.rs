//! The recipe session state machine
//!
//! One `Session` per run: it mediates image submission, result storage,
//! dietary filtering, and the step-by-step cook-through with narration.
//! The gateway and narrator are injected so the whole machine is testable
//! with fakes.
//!
//! The view is a tagged value rather than a mode flag plus loose fields, so
//! a step position cannot exist outside the cooking view.

use std::sync::Arc;

use crate::core::errors::SessionError;
use crate::core::types::{AnalysisResult, DietaryFilter, Recipe, RecipeId};
use crate::gateway::{GatewayError, ImagePayload, RecipeGateway};
use crate::narrator::Narrator;

/// What the front-end is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Waiting for a photo
    Upload,
    /// Browsing analysis results
    Results,
    /// Cooking through a selected recipe
    Cooking {
        recipe_id: RecipeId,
        position: CookPosition,
    },
}

/// Position within a cook-through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookPosition {
    /// Gather-ingredients overview, shown before the first step
    Ingredients,
    /// An active instruction step, 0-based
    Step(usize),
    /// All steps completed
    Finished,
}

impl CookPosition {
    /// Integer rendering of the position: -1 for the ingredients overview,
    /// the 0-based step index while cooking, `step_count` once finished.
    pub fn index(&self, step_count: usize) -> i64 {
        match self {
            CookPosition::Ingredients => -1,
            CookPosition::Step(i) => *i as i64,
            CookPosition::Finished => step_count as i64,
        }
    }
}

/// In-memory state container for one kitchen-assistant run.
///
/// Mutated only through the intent methods below; every failure leaves the
/// session in a valid state. Discarded at process exit, nothing persists.
pub struct Session {
    view: View,
    is_loading: bool,
    recipes: Vec<Recipe>,
    detected_ingredients: Vec<String>,
    dietary_filter: DietaryFilter,
    shopping_list: Vec<String>,
    gateway: Arc<dyn RecipeGateway>,
    narrator: Arc<dyn Narrator>,
}

impl Session {
    pub fn new(gateway: Arc<dyn RecipeGateway>, narrator: Arc<dyn Narrator>) -> Self {
        Self {
            view: View::Upload,
            is_loading: false,
            recipes: Vec::new(),
            detected_ingredients: Vec::new(),
            dietary_filter: DietaryFilter::All,
            shopping_list: Vec::new(),
            gateway,
            narrator,
        }
    }

    // ---- read surface ----

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn detected_ingredients(&self) -> &[String] {
        &self.detected_ingredients
    }

    pub fn dietary_filter(&self) -> DietaryFilter {
        self.dietary_filter
    }

    pub fn shopping_list(&self) -> &[String] {
        &self.shopping_list
    }

    /// Recipes passing the active dietary filter, original order preserved.
    ///
    /// Pure projection, recomputed on every read.
    pub fn filtered_recipes(&self) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| self.dietary_filter.matches(r))
            .collect()
    }

    /// The recipe being cooked, if any
    pub fn selected_recipe(&self) -> Option<&Recipe> {
        match self.view {
            View::Cooking { recipe_id, .. } => self.recipes.iter().find(|r| r.id == recipe_id),
            _ => None,
        }
    }

    /// Cook-through position, present only while cooking
    pub fn cook_position(&self) -> Option<CookPosition> {
        match self.view {
            View::Cooking { position, .. } => Some(position),
            _ => None,
        }
    }

    // ---- intents ----

    /// Submit a photo for analysis.
    ///
    /// On success the recipe list and detected ingredients are replaced
    /// together and the view moves to results. On failure everything except
    /// the loading flag is left untouched and the error is returned for the
    /// front-end to surface; there is no automatic retry.
    ///
    /// `&mut self` serializes submissions, so the out-of-order overwrite race
    /// a second in-flight request could cause cannot occur in-process.
    pub async fn submit_image(&mut self, image: &ImagePayload) -> Result<(), GatewayError> {
        self.is_loading = true;
        tracing::debug!(gateway = self.gateway.name(), "Submitting image for analysis");

        let result = self.gateway.analyze_image(image).await;
        self.is_loading = false;

        match result {
            Ok(analysis) => {
                self.apply_analysis(analysis);
                self.view = View::Results;
                tracing::info!(
                    recipes = self.recipes.len(),
                    ingredients = self.detected_ingredients.len(),
                    "Analysis complete"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Image analysis failed");
                Err(err)
            }
        }
    }

    fn apply_analysis(&mut self, analysis: AnalysisResult) {
        self.detected_ingredients = analysis.detected_ingredients;
        self.recipes = analysis
            .recipes
            .into_iter()
            .map(Recipe::from_payload)
            .collect();
    }

    /// Change the active dietary filter. Pure; the filtered view is derived.
    pub fn set_dietary_filter(&mut self, filter: DietaryFilter) {
        self.dietary_filter = filter;
    }

    /// Enter the cooking view for a recipe, starting at the ingredients
    /// overview, and narrate the introduction.
    pub fn select_recipe(&mut self, id: RecipeId) -> Result<(), SessionError> {
        let recipe = self
            .recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or(SessionError::UnknownRecipe(id))?;

        let intro = format!("Let's cook {}. Here are the ingredients.", recipe.name);
        self.view = View::Cooking {
            recipe_id: id,
            position: CookPosition::Ingredients,
        };
        self.narrator.speak(&intro);
        Ok(())
    }

    /// Move forward one step; the last step advances to finished, which is
    /// absorbing. Narrates the position landed on.
    pub fn advance_step(&mut self) -> Result<(), SessionError> {
        let (recipe_id, position) = self.cooking_state()?;
        let step_count = self.step_count(recipe_id);

        let next = match position {
            CookPosition::Ingredients if step_count == 0 => CookPosition::Finished,
            CookPosition::Ingredients => CookPosition::Step(0),
            CookPosition::Step(i) if i + 1 < step_count => CookPosition::Step(i + 1),
            CookPosition::Step(_) => CookPosition::Finished,
            CookPosition::Finished => return Ok(()),
        };

        self.move_to(recipe_id, next);
        Ok(())
    }

    /// Move back one step; the first step retreats to the ingredients
    /// overview, which is a no-op floor. Narrates the position landed on.
    pub fn retreat_step(&mut self) -> Result<(), SessionError> {
        let (recipe_id, position) = self.cooking_state()?;
        let step_count = self.step_count(recipe_id);

        let prev = match position {
            CookPosition::Ingredients => return Ok(()),
            CookPosition::Step(0) => CookPosition::Ingredients,
            CookPosition::Step(i) => CookPosition::Step(i - 1),
            CookPosition::Finished if step_count > 0 => CookPosition::Step(step_count - 1),
            CookPosition::Finished => CookPosition::Ingredients,
        };

        self.move_to(recipe_id, prev);
        Ok(())
    }

    /// Leave the cooking view and stop any narration in flight
    pub fn close_cooking(&mut self) {
        self.narrator.cancel();
        self.view = View::Results;
    }

    /// Add an ingredient to the shopping list. Idempotent.
    pub fn add_to_shopping_list(&mut self, ingredient: &str) {
        if !self.shopping_list.iter().any(|i| i == ingredient) {
            self.shopping_list.push(ingredient.to_string());
        }
    }

    /// Remove an ingredient from the shopping list. No-op when absent.
    pub fn remove_from_shopping_list(&mut self, ingredient: &str) {
        self.shopping_list.retain(|i| i != ingredient);
    }

    /// Return to the upload view for a fresh analysis. Recipes and the
    /// shopping list survive; a new successful analysis replaces the former.
    pub fn reset_to_upload(&mut self) {
        self.narrator.cancel();
        self.view = View::Upload;
    }

    // ---- internals ----

    fn cooking_state(&self) -> Result<(RecipeId, CookPosition), SessionError> {
        match self.view {
            View::Cooking {
                recipe_id,
                position,
            } => Ok((recipe_id, position)),
            _ => Err(SessionError::NotCooking),
        }
    }

    fn step_count(&self, recipe_id: RecipeId) -> usize {
        self.recipes
            .iter()
            .find(|r| r.id == recipe_id)
            .map(|r| r.steps.len())
            .unwrap_or(0)
    }

    fn move_to(&mut self, recipe_id: RecipeId, position: CookPosition) {
        self.view = View::Cooking {
            recipe_id,
            position,
        };
        self.narrate(recipe_id, position);
    }

    fn narrate(&self, recipe_id: RecipeId, position: CookPosition) {
        let recipe = match self.recipes.iter().find(|r| r.id == recipe_id) {
            Some(r) => r,
            None => return,
        };

        match position {
            CookPosition::Ingredients => {
                self.narrator
                    .speak(&format!("Let's cook {}. Here are the ingredients.", recipe.name));
            }
            CookPosition::Step(i) => {
                if let Some(text) = recipe.steps.get(i) {
                    self.narrator.speak(&format!("Step {}. {}", i + 1, text));
                }
            }
            CookPosition::Finished => {
                self.narrator.speak("Enjoy your meal!");
            }
        }
    }
}
