use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{ActivityLevel, Category, Gender, Goal};

// ─────────────────────────────────────────────────────────────────────────────
// Energy formulas
// ─────────────────────────────────────────────────────────────────────────────

/// Mifflin-St Jeor weight coefficient (kcal per kg).
pub const BMR_WEIGHT_COEF: f64 = 10.0;

/// Mifflin-St Jeor height coefficient (kcal per cm).
pub const BMR_HEIGHT_COEF: f64 = 6.25;

/// Mifflin-St Jeor age coefficient (kcal per year).
pub const BMR_AGE_COEF: f64 = 5.0;

pub const BMR_MALE_OFFSET: f64 = 5.0;
pub const BMR_FEMALE_OFFSET: f64 = -161.0;

/// Daily deficit or surplus applied for the lose/gain goals.
pub const GOAL_CALORIE_DELTA: f64 = 500.0;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Fiber target in grams per 1000 kcal of the calorie target.
pub const FIBER_G_PER_1000_KCAL: f64 = 14.0;

/// Constant term of the BMR equation for a gender.
pub fn bmr_offset(gender: Gender) -> f64 {
    match gender {
        Gender::Male => BMR_MALE_OFFSET,
        Gender::Female => BMR_FEMALE_OFFSET,
    }
}

/// TDEE multiplier for an activity level.
pub fn activity_multiplier(activity: ActivityLevel) -> f64 {
    match activity {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
    }
}

/// Share of the calorie target given to protein, carbs and fat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Macro split for a goal: protein-heavy when cutting, carb-heavy when gaining.
pub fn macro_ratios(goal: Goal) -> MacroRatios {
    match goal {
        Goal::Lose => MacroRatios {
            protein: 0.35,
            carbs: 0.35,
            fat: 0.30,
        },
        Goal::Gain => MacroRatios {
            protein: 0.30,
            carbs: 0.45,
            fat: 0.25,
        },
        Goal::Maintain => MacroRatios {
            protein: 0.30,
            carbs: 0.40,
            fat: 0.30,
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Portion grid
// ─────────────────────────────────────────────────────────────────────────────

/// Gram increment every suggested portion snaps to; also the minimum portion.
pub const GRAM_STEP: f64 = 25.0;

/// Increment for portion-counted catalog entries.
pub const PORTION_STEP: f64 = 1.0;

/// Largest gram amount the model is asked to suggest.
pub const MAX_SUGGESTED_GRAMS: f64 = 400.0;

/// Floor for the current-calorie divisor in the scaling fallback.
pub const MIN_SCALING_CALORIES: f64 = 1.0;

/// Gram amount assumed when a menu entry omits one.
pub const DEFAULT_MENU_GRAMS: f64 = 100.0;

/// Quantity assumed for a daily-plan meal listed without one.
pub const DEFAULT_DAILY_QUANTITY: f64 = 100.0;

// ─────────────────────────────────────────────────────────────────────────────
// Fallback menu
// ─────────────────────────────────────────────────────────────────────────────

/// Budget share per meal time (breakfast, lunch, dinner).
pub const FALLBACK_BUDGET_SPLIT: [f64; 3] = [0.30, 0.40, 0.30];

/// Calorie share per meal time (breakfast, lunch, dinner).
pub const FALLBACK_CALORIE_SPLIT: [f64; 3] = [0.25, 0.45, 0.30];

/// Catalog meals served by the fallback menu (breakfast, lunch, dinner).
pub const FALLBACK_MENU_MEALS: [&str; 3] = ["Yến mạch", "Ức gà", "Bông cải"];

/// Category substituted per meal time when a fallback meal is not in the catalog.
pub const FALLBACK_MENU_CATEGORIES: [Category; 3] =
    [Category::Carb, Category::Protein, Category::Fiber];

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_AI_EXPLANATION: &str = "AI recommendation generated";
pub const ROUNDED_FALLBACK_EXPLANATION: &str =
    "Unable to parse AI response - using rounded current quantities";
pub const DEFAULT_MENU_EXPLANATION: &str = "AI-generated optimized menu";
pub const FALLBACK_MENU_EXPLANATION: &str = "Fallback menu - AI optimization unavailable";

/// Map from cooking method to its Vietnamese display label.
pub static METHOD_LABELS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("boiled", "Luộc");
    m.insert("steamed", "Hấp");
    m.insert("raw", "Sống/Tươi");
    m.insert("baked", "Nướng lò");
    m.insert("grilled", "Nướng");
    m.insert("fried", "Chiên");
    m.insert("scrambled", "Bác trứng");
    m.insert("plain", "Nguyên chất");
    m.insert("spread", "Phết");
    m.insert("drizzled", "Rưới");
    m.insert("sautéed", "Xào");
    m
});

/// Vietnamese label for a cooking method; unknown methods pass through.
pub fn method_label(method: &str) -> String {
    METHOD_LABELS
        .get(method.to_lowercase().as_str())
        .map(|label| label.to_string())
        .unwrap_or_else(|| method.to_string())
}

/// Display name for a catalog category group.
pub fn category_name(category: Category) -> &'static str {
    match category {
        Category::Carb => "🍚 Tinh bột",
        Category::Protein => "🥩 Chất đạm",
        Category::GoodFat => "🥜 Chất béo tốt",
        Category::Fiber => "🥦 Chất xơ",
    }
}
