pub mod prompts;
pub mod render;

pub use prompts::{
    collect_profile, prompt_activity, prompt_age, prompt_budget, prompt_gender, prompt_goal,
};
pub use render::{display_catalog, display_menu, display_targets};
