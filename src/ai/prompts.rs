use std::fmt::Write;

use crate::models::{Meal, NutritionProfile, NutritionTotals, SelectedMeal, Unit, UserProfile};
use crate::planner::calculations::NutritionTargets;
use crate::planner::constants::{GRAM_STEP, MAX_SUGGESTED_GRAMS};

fn goal_guidance(profile: &UserProfile) -> &'static str {
    match profile.goal {
        crate::models::Goal::Lose => {
            "Keep total calories below the daily target and make sure protein is sufficient."
        }
        crate::models::Goal::Gain => {
            "Push total calories above the daily target and increase protein."
        }
        crate::models::Goal::Maintain => {
            "Keep calories stable around the target and balance the macronutrients."
        }
    }
}

fn profile_block(out: &mut String, profile: &UserProfile, targets: &NutritionTargets) {
    let _ = writeln!(out, "User profile:");
    let _ = writeln!(
        out,
        "- Age: {}, gender: {}",
        profile.age,
        profile.gender.as_str()
    );
    let _ = writeln!(
        out,
        "- Height: {}cm, weight: {}kg",
        profile.height, profile.weight
    );
    let _ = writeln!(
        out,
        "- Activity: {}, goal: {}",
        profile.activity.as_str(),
        profile.goal.as_str()
    );
    let _ = writeln!(out, "- Daily calorie target: {:.0}", targets.daily_calories);
    let _ = writeln!(out, "- Protein target: {:.1}g", targets.macros.protein);
    let _ = writeln!(out, "- Carb target: {:.1}g", targets.macros.carbs);
    let _ = writeln!(out, "- Fat target: {:.1}g", targets.macros.fat);
    let _ = writeln!(out, "- Fiber target: {:.1}g", targets.macros.fiber);
}

/// "100g" or "portion", the amount catalog values are given for.
fn basis_label(unit: Unit) -> String {
    match unit {
        Unit::Grams => format!("{}{}", unit.basis(), unit.symbol()),
        Unit::Portion => unit.symbol().to_string(),
    }
}

fn profile_values(p: &NutritionProfile) -> String {
    format!(
        "{} kcal, {}g protein, {}g carbs, {}g fat, {}g fiber, {} VND",
        p.calories, p.protein, p.carbs, p.fat, p.fiber, p.price
    )
}

/// Prompt asking the model to re-balance the quantities of a selection.
pub fn portion_prompt(
    profile: &UserProfile,
    targets: &NutritionTargets,
    selection: &[SelectedMeal],
    current: &NutritionTotals,
    language: &str,
) -> String {
    let n = selection.len();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "You are a professional nutritionist. Review the current meal plan and adjust \
         the portions so it fits the user's goal and nutrition targets."
    );
    let _ = writeln!(out);
    profile_block(&mut out, profile, targets);
    let _ = writeln!(out);

    let _ = writeln!(out, "Current meal plan:");
    for selected in selection {
        let unit = selected.meal.unit;
        let (values, _) = selected.meal.resolve(selected.method.as_deref());
        let _ = writeln!(
            out,
            "- {}: {}{} (per {}: {})",
            selected.label(),
            selected.quantity,
            unit.symbol(),
            basis_label(unit),
            profile_values(values)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Current totals:");
    let _ = writeln!(
        out,
        "- Calories: {:.1} (target {:.0})",
        current.calories, targets.daily_calories
    );
    let _ = writeln!(
        out,
        "- Protein: {:.1}g (target {:.1}g)",
        current.protein, targets.macros.protein
    );
    let _ = writeln!(
        out,
        "- Carbs: {:.1}g (target {:.1}g)",
        current.carbs, targets.macros.carbs
    );
    let _ = writeln!(
        out,
        "- Fat: {:.1}g (target {:.1}g)",
        current.fat, targets.macros.fat
    );
    let _ = writeln!(
        out,
        "- Fiber: {:.1}g (target {:.1}g)",
        current.fiber, targets.macros.fiber
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Protein and carbs carry 4 kcal per gram, fat 9 kcal per gram."
    );
    let _ = writeln!(out, "Goal '{}': {}", profile.goal.as_str(), goal_guidance(profile));
    let _ = writeln!(out);

    let _ = writeln!(out, "Rules:");
    let _ = writeln!(
        out,
        "1. Return exactly {} quantities, one per meal, in the order listed.",
        n
    );
    let _ = writeln!(
        out,
        "2. Gram-measured meals take {step}-{max}g and every amount must be a multiple of {step}g.",
        step = GRAM_STEP,
        max = MAX_SUGGESTED_GRAMS
    );
    let _ = writeln!(
        out,
        "3. Portion-measured meals take whole portions, at least one."
    );
    let _ = writeln!(
        out,
        "4. Make meaningful changes when the totals are far from target; if within 10%, \
         change each meal by at most {} or {}g.",
        GRAM_STEP,
        GRAM_STEP * 2.0
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Write the explanation in {}. Reply with JSON only:",
        language
    );
    let _ = writeln!(
        out,
        "{{\"adjusted_grams\": [{} numbers], \"explanation\": \"why these changes fit the user's targets\"}}",
        n
    );
    out
}

/// Prompt asking the model for a three-meal menu within a budget.
pub fn menu_prompt(
    profile: &UserProfile,
    targets: &NutritionTargets,
    catalog: &[&Meal],
    budget: f64,
    language: &str,
) -> String {
    let mut out = String::new();

    profile_block(&mut out, profile, targets);
    let _ = writeln!(out, "- Daily budget: {} VND", budget);
    let _ = writeln!(out);

    let _ = writeln!(out, "Available meals:");
    for meal in catalog {
        let _ = writeln!(
            out,
            "- {} (per {}): {}",
            meal.name,
            basis_label(meal.unit),
            profile_values(&meal.nutrition)
        );
        if !meal.cooking_methods.is_empty() {
            let methods: Vec<String> = meal
                .cooking_methods
                .iter()
                .map(|m| format!("{} ({})", m.method, profile_values(&m.nutrition)))
                .collect();
            let _ = writeln!(out, "  Cooking methods: {}", methods.join(", "));
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Build a full-day menu (breakfast, lunch, dinner) that:"
    );
    let _ = writeln!(out, "1. Stays within the budget of {} VND.", budget);
    let _ = writeln!(
        out,
        "2. Reaches about {:.0} kcal.",
        targets.daily_calories
    );
    let _ = writeln!(
        out,
        "3. Fits the goal '{}': {}",
        profile.goal.as_str(),
        goal_guidance(profile)
    );
    let _ = writeln!(
        out,
        "4. Uses a cooking method and an amount for each meal: \"grams\" in multiples of {step}g \
         (at least {step}g) for gram-measured meals, whole \"portions\" (at least one) for \
         portion-measured meals.",
        step = GRAM_STEP
    );
    let _ = writeln!(out, "5. Only uses meals from the list above.");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Prices follow the same basis: price x grams / 100 for gram-measured meals, \
         price x portions for portion-measured meals."
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Write the explanation in {}. Reply with JSON only:",
        language
    );
    let _ = writeln!(
        out,
        "{{\"breakfast\": [{{\"name\": \"meal name\", \"method\": \"cooking method\", \"grams\": 100, \
         \"calories\": 100, \"protein\": 10, \"carbs\": 20, \"fat\": 5, \"fiber\": 3, \"price\": 10000}}], \
         \"lunch\": [...], \"dinner\": [...], \"explanation\": \"why this menu fits\"}}"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender, Goal};
    use crate::planner::calculations::nutrition_targets;
    use crate::state::default_catalog;

    fn profile() -> UserProfile {
        UserProfile {
            name: String::new(),
            age: 30,
            gender: Gender::Female,
            height: 160.0,
            weight: 55.0,
            activity: ActivityLevel::Light,
            goal: Goal::Lose,
        }
    }

    #[test]
    fn test_portion_prompt_mentions_count_and_step() {
        let catalog = default_catalog();
        let selection = vec![
            SelectedMeal::new(
                catalog.get_meal("ức gà").unwrap().clone(),
                Some("grilled".to_string()),
                150.0,
            ),
            SelectedMeal::new(catalog.get_meal("gạo lứt").unwrap().clone(), None, 200.0),
        ];
        let p = profile();
        let targets = nutrition_targets(&p);
        let prompt = portion_prompt(&p, &targets, &selection, &NutritionTotals::default(), "Vietnamese");

        assert!(prompt.contains("exactly 2 quantities"));
        assert!(prompt.contains("multiple of 25g"));
        assert!(prompt.contains("Ức gà (grilled): 150g"));
        assert!(prompt.contains("adjusted_grams"));
        assert!(prompt.contains("in Vietnamese"));
    }

    #[test]
    fn test_menu_prompt_lists_catalog_and_budget() {
        let catalog = default_catalog();
        let p = profile();
        let targets = nutrition_targets(&p);
        let prompt = menu_prompt(&p, &targets, &catalog.all_meals(), 150000.0, "English");

        assert!(prompt.contains("150000 VND"));
        for meal in catalog.all_meals() {
            assert!(prompt.contains(&meal.name));
        }
        assert!(prompt.contains("\"breakfast\""));
    }

    #[test]
    fn test_menu_prompt_labels_portion_meals() {
        let mut eggs = default_catalog().get_meal("Trứng gà").unwrap().clone();
        eggs.unit = Unit::Portion;
        let oats = default_catalog().get_meal("Yến mạch").unwrap().clone();
        let p = profile();
        let targets = nutrition_targets(&p);
        let prompt = menu_prompt(&p, &targets, &[&eggs, &oats], 50000.0, "English");

        assert!(prompt.contains("- Trứng gà (per portion):"));
        assert!(prompt.contains("- Yến mạch (per 100g):"));
        assert!(prompt.contains("whole \"portions\""));
    }
}
