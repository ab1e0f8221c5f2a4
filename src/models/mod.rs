pub mod meal;
pub mod plan;
pub mod profile;

pub use meal::{Category, CookingMethod, Meal, NutritionProfile, Unit};
pub use plan::{
    Menu, MenuItem, MenuSource, NutritionTotals, PortionLine, Recommendation,
    RecommendationSource, SelectedMeal,
};
pub use profile::{ActivityLevel, Gender, Goal, UserProfile};
