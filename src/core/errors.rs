//! Typed errors for session intents
//!
//! These cover the precondition-violation class: a well-behaved front-end
//! only offers valid choices, so hitting one of these indicates a caller bug.
//! They are signaled rather than panicking so the session always stays in a
//! valid, inspectable state.

use crate::core::types::RecipeId;
use thiserror::Error;

/// Errors returned by session intents
#[derive(Debug, Error)]
pub enum SessionError {
    /// A recipe id that is not present in the current recipe list
    #[error("Unknown recipe id: {0}")]
    UnknownRecipe(RecipeId),

    /// A cook-through intent (advance/retreat) outside of cooking view
    #[error("Not in cooking view")]
    NotCooking,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = RecipeId::new();
        let err = SessionError::UnknownRecipe(id);
        assert!(err.to_string().contains("Unknown recipe id"));

        let err = SessionError::NotCooking;
        assert_eq!(err.to_string(), "Not in cooking view");
    }
}
