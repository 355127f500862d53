//! fridgechef: AI-powered kitchen assistant
//!
//! This library provides:
//! - A recipe session state machine (upload, results, cook-through)
//! - A vision gateway abstraction with Gemini and simulated backends
//! - Voice narration of cooking steps via system text-to-speech
//! - An interactive terminal shell for cooking through a recipe

pub mod config;
pub mod core;
pub mod gateway;
pub mod narrator;
pub mod shell;

pub use crate::config::Config;
pub use crate::core::Session;
