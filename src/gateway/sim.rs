//! Simulated gateway for tests and offline demo runs
//!
//! Returns a deterministic analysis regardless of the submitted image, so
//! the whole upload-to-cooking flow can run without network access or an
//! API key (`fridgechef analyze --gateway sim`).

use super::{GatewayError, ImagePayload, RecipeGateway};
use crate::core::{AnalysisResult, Difficulty, Ingredient, RecipePayload};
use async_trait::async_trait;

pub struct SimGateway {
    result: AnalysisResult,
    fail: bool,
}

impl Default for SimGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl SimGateway {
    /// Gateway answering with the canned five-recipe pantry
    pub fn new() -> Self {
        Self {
            result: canned_analysis(),
            fail: false,
        }
    }

    /// Gateway answering with a caller-supplied analysis
    pub fn with_result(result: AnalysisResult) -> Self {
        Self {
            result,
            fail: false,
        }
    }

    /// Gateway that fails every call with a transport error
    pub fn failing() -> Self {
        Self {
            result: canned_analysis(),
            fail: true,
        }
    }
}

#[async_trait]
impl RecipeGateway for SimGateway {
    fn name(&self) -> &str {
        "sim"
    }

    async fn analyze_image(
        &self,
        _image: &ImagePayload,
    ) -> Result<AnalysisResult, GatewayError> {
        if self.fail {
            return Err(GatewayError::Network(
                "simulated transport failure".to_string(),
            ));
        }
        Ok(self.result.clone())
    }
}

fn ingredient(name: &str, quantity: &str, is_missing: bool) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        quantity: quantity.to_string(),
        is_missing,
    }
}

fn recipe(
    name: &str,
    description: &str,
    difficulty: Difficulty,
    prep_time: &str,
    calories: u32,
    tags: &[&str],
    ingredients: Vec<Ingredient>,
    steps: &[&str],
) -> RecipePayload {
    RecipePayload {
        name: name.to_string(),
        description: description.to_string(),
        difficulty,
        prep_time: prep_time.to_string(),
        calories,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ingredients,
        steps: steps.iter().map(|s| s.to_string()).collect(),
    }
}

/// Five recipes spanning the dietary tags, built from a plausible fridge
fn canned_analysis() -> AnalysisResult {
    AnalysisResult {
        detected_ingredients: vec![
            "eggs".to_string(),
            "cheddar cheese".to_string(),
            "spinach".to_string(),
            "chicken breast".to_string(),
            "bell pepper".to_string(),
            "rice".to_string(),
        ],
        recipes: vec![
            recipe(
                "Spinach Omelette",
                "Fluffy eggs folded over wilted spinach and cheddar.",
                Difficulty::Easy,
                "10 mins",
                320,
                &["Vegetarian", "Keto", "Gluten-Free"],
                vec![
                    ingredient("eggs", "3", false),
                    ingredient("spinach", "1 handful", false),
                    ingredient("cheddar cheese", "30g", false),
                    ingredient("butter", "1 tbsp", true),
                ],
                &[
                    "Whisk the eggs with a pinch of salt.",
                    "Wilt the spinach in butter over medium heat.",
                    "Pour in the eggs, cook until just set, add cheese and fold.",
                ],
            ),
            recipe(
                "Rainbow Veggie Stir-Fry",
                "Crisp peppers and spinach tossed over steamed rice.",
                Difficulty::Easy,
                "20 mins",
                410,
                &["Vegan", "Gluten-Free"],
                vec![
                    ingredient("bell pepper", "2", false),
                    ingredient("spinach", "2 handfuls", false),
                    ingredient("rice", "1 cup", false),
                    ingredient("soy sauce", "2 tbsp", true),
                    ingredient("garlic", "2 cloves", true),
                ],
                &[
                    "Steam the rice.",
                    "Stir-fry the peppers and garlic on high heat.",
                    "Add spinach and soy sauce, toss for one minute.",
                    "Serve over the rice.",
                ],
            ),
            recipe(
                "Grilled Chicken with Peppers",
                "Juicy chicken breast with charred bell pepper strips.",
                Difficulty::Medium,
                "25 mins",
                480,
                &["Keto", "Gluten-Free"],
                vec![
                    ingredient("chicken breast", "2", false),
                    ingredient("bell pepper", "1", false),
                    ingredient("olive oil", "2 tbsp", true),
                    ingredient("paprika", "1 tsp", true),
                ],
                &[
                    "Rub the chicken with oil and paprika.",
                    "Grill 6 minutes per side until cooked through.",
                    "Char the pepper strips alongside.",
                    "Rest the chicken, slice, and serve.",
                ],
            ),
            recipe(
                "Cheesy Baked Rice",
                "Oven-baked rice with a golden cheddar crust.",
                Difficulty::Medium,
                "35 mins",
                560,
                &["Vegetarian"],
                vec![
                    ingredient("rice", "1.5 cups", false),
                    ingredient("cheddar cheese", "100g", false),
                    ingredient("milk", "200ml", true),
                    ingredient("nutmeg", "a pinch", true),
                ],
                &[
                    "Parboil the rice for 8 minutes.",
                    "Mix with milk, half the cheese and nutmeg in a baking dish.",
                    "Top with remaining cheese and bake 20 minutes at 200C.",
                ],
            ),
            recipe(
                "Chicken Fried Rice",
                "Weeknight fried rice with egg ribbons and chicken.",
                Difficulty::Hard,
                "30 mins",
                620,
                &[],
                vec![
                    ingredient("rice", "2 cups", false),
                    ingredient("chicken breast", "1", false),
                    ingredient("eggs", "2", false),
                    ingredient("spring onion", "2", true),
                    ingredient("sesame oil", "1 tbsp", true),
                ],
                &[
                    "Dice and sear the chicken, set aside.",
                    "Scramble the eggs into ribbons.",
                    "Fry the cooked rice on high heat with sesame oil.",
                    "Fold in chicken, eggs and spring onion.",
                    "Season and serve hot.",
                ],
            ),
        ],
    }
}
