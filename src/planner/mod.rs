pub mod calculations;
pub mod constants;
pub mod menu;
pub mod recommend;

pub use calculations::{
    calculate_bmr, calculate_tdee, daily_calories, macro_targets, nutrition_targets,
    round_to_step, MacroTargets, NutritionTargets,
};
pub use constants::{category_name, method_label};
pub use menu::{fallback_menu, optimize_menu};
pub use recommend::{recommend_portions, AiSettings};
