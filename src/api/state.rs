use std::sync::Arc;

use crate::ai::TextGenerator;
use crate::planner::AiSettings;
use crate::state::{CartStore, InMemoryCart, MealCatalog};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<MealCatalog>,
    pub generator: Arc<dyn TextGenerator>,
    pub cart: Arc<dyn CartStore>,
    pub ai: Arc<AiSettings>,
}

impl AppState {
    /// State with a fresh in-memory cart.
    pub fn new(catalog: MealCatalog, generator: Arc<dyn TextGenerator>, ai: AiSettings) -> Self {
        Self {
            catalog: Arc::new(catalog),
            generator,
            cart: Arc::new(InMemoryCart::new()),
            ai: Arc::new(ai),
        }
    }
}
