pub mod ai;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod observability;
pub mod planner;
pub mod state;

pub use error::{NutriError, Result};
pub use models::{Meal, Menu, Recommendation, SelectedMeal, UserProfile};
