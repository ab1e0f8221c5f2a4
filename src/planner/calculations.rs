use serde::{Deserialize, Serialize};

use crate::models::{Goal, NutritionTotals, PortionLine, SelectedMeal, UserProfile};
use crate::planner::constants::*;

/// Daily gram targets for the macros plus fiber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl MacroTargets {
    /// Calories implied by the protein, carb and fat grams.
    pub fn macro_calories(&self) -> f64 {
        self.protein * KCAL_PER_G_PROTEIN + self.carbs * KCAL_PER_G_CARB + self.fat * KCAL_PER_G_FAT
    }
}

/// Full energy breakdown for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub daily_calories: f64,
    pub macros: MacroTargets,
}

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
pub fn calculate_bmr(profile: &UserProfile) -> f64 {
    BMR_WEIGHT_COEF * profile.weight + BMR_HEIGHT_COEF * profile.height
        - BMR_AGE_COEF * profile.age as f64
        + bmr_offset(profile.gender)
}

/// Total daily energy expenditure for a given BMR.
pub fn calculate_tdee(profile: &UserProfile, bmr: f64) -> f64 {
    bmr * activity_multiplier(profile.activity)
}

/// Goal-adjusted calorie target.
pub fn daily_calories(profile: &UserProfile) -> f64 {
    let tdee = calculate_tdee(profile, calculate_bmr(profile));
    adjust_for_goal(tdee, profile.goal)
}

fn adjust_for_goal(tdee: f64, goal: Goal) -> f64 {
    match goal {
        Goal::Lose => tdee - GOAL_CALORIE_DELTA,
        Goal::Gain => tdee + GOAL_CALORIE_DELTA,
        Goal::Maintain => tdee,
    }
}

/// Split a calorie target into macro grams using the goal's ratios.
pub fn macro_targets(goal: Goal, daily_calories: f64) -> MacroTargets {
    let ratios = macro_ratios(goal);
    MacroTargets {
        protein: daily_calories * ratios.protein / KCAL_PER_G_PROTEIN,
        carbs: daily_calories * ratios.carbs / KCAL_PER_G_CARB,
        fat: daily_calories * ratios.fat / KCAL_PER_G_FAT,
        fiber: daily_calories / 1000.0 * FIBER_G_PER_1000_KCAL,
    }
}

/// BMR, TDEE, calorie target and macro targets in one pass.
pub fn nutrition_targets(profile: &UserProfile) -> NutritionTargets {
    let bmr = calculate_bmr(profile);
    let tdee = calculate_tdee(profile, bmr);
    let daily_calories = adjust_for_goal(tdee, profile.goal);
    NutritionTargets {
        bmr,
        tdee,
        daily_calories,
        macros: macro_targets(profile.goal, daily_calories),
    }
}

/// Snap a quantity to the nearest multiple of `step`, never below one step.
///
/// Halfway values round to the even multiple.
pub fn round_to_step(quantity: f64, step: f64) -> f64 {
    let snapped = (quantity / step).round_ties_even() * step;
    snapped.max(step)
}

/// Lines for each selected meal at the given quantities.
///
/// Quantities pair up with selections by position.
pub fn portion_lines(selection: &[SelectedMeal], quantities: &[f64]) -> Vec<PortionLine> {
    selection
        .iter()
        .zip(quantities)
        .map(|(selected, &qty)| selected.line_at(qty))
        .collect()
}

/// Summed nutrition and cost of the selection at its own quantities.
pub fn selection_totals(selection: &[SelectedMeal]) -> NutritionTotals {
    selection
        .iter()
        .map(|s| s.meal.nutrition_for(s.method.as_deref(), s.quantity))
        .sum()
}

/// Snap every selected quantity to its meal's grid.
pub fn rounded_quantities(selection: &[SelectedMeal]) -> Vec<f64> {
    selection
        .iter()
        .map(|s| round_to_step(s.quantity, s.meal.unit.step()))
        .collect()
}

/// Factor that would bring `current` calories to `target`.
pub fn scale_factor(target: f64, current: f64) -> f64 {
    target / current.max(MIN_SCALING_CALORIES)
}

/// Scale every selected quantity by `factor`, then snap to the grid.
pub fn scaled_quantities(selection: &[SelectedMeal], factor: f64) -> Vec<f64> {
    selection
        .iter()
        .map(|s| round_to_step(s.quantity * factor, s.meal.unit.step()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Category, Gender, Meal, NutritionProfile, Unit};

    fn profile(gender: Gender, activity: ActivityLevel, goal: Goal) -> UserProfile {
        UserProfile {
            name: String::new(),
            age: 25,
            gender,
            height: 170.0,
            weight: 70.0,
            activity,
            goal,
        }
    }

    fn meal(name: &str, calories: f64, unit: Unit) -> Meal {
        Meal {
            name: name.to_string(),
            nutrition: NutritionProfile {
                calories,
                protein: 10.0,
                carbs: 10.0,
                fat: 5.0,
                fiber: 1.0,
                price: 1000.0,
            },
            category: Category::Carb,
            food_type: String::new(),
            unit,
            cooking_methods: vec![],
        }
    }

    #[test]
    fn test_bmr_male_reference() {
        let mut p = profile(Gender::Male, ActivityLevel::Moderate, Goal::Maintain);
        p.height = 175.0;
        let targets = nutrition_targets(&p);
        assert!((targets.bmr - 1673.75).abs() < 1e-9);
        assert!((targets.tdee - 2594.3125).abs() < 1e-9);
        assert!((targets.daily_calories - 2594.3125).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_female_offset() {
        let p = profile(Gender::Female, ActivityLevel::Moderate, Goal::Maintain);
        assert!((calculate_bmr(&p) - 1476.5).abs() < 1e-9);
    }

    #[test]
    fn test_goal_adjustment() {
        let maintain = daily_calories(&profile(Gender::Male, ActivityLevel::Sedentary, Goal::Maintain));
        let lose = daily_calories(&profile(Gender::Male, ActivityLevel::Sedentary, Goal::Lose));
        let gain = daily_calories(&profile(Gender::Male, ActivityLevel::Sedentary, Goal::Gain));
        assert!((maintain - 1971.0).abs() < 1e-9);
        assert!((maintain - lose - 500.0).abs() < 1e-9);
        assert!((gain - maintain - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_macro_targets_gain() {
        let macros = macro_targets(Goal::Gain, 3000.0);
        assert!((macros.protein - 225.0).abs() < 1e-9);
        assert!((macros.carbs - 337.5).abs() < 1e-9);
        assert!((macros.fat - 3000.0 * 0.25 / 9.0).abs() < 1e-9);
        assert!((macros.fiber - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(110.0, 25.0), 100.0);
        assert_eq!(round_to_step(113.0, 25.0), 125.0);
        assert_eq!(round_to_step(0.0, 25.0), 25.0);
        assert_eq!(round_to_step(-80.0, 25.0), 25.0);
        // Halfway rounds to the even multiple
        assert_eq!(round_to_step(62.5, 25.0), 50.0);
        assert_eq!(round_to_step(87.5, 25.0), 100.0);
        assert_eq!(round_to_step(2.4, 1.0), 2.0);
    }

    #[test]
    fn test_selection_totals_mixed_units() {
        let selection = vec![
            SelectedMeal::new(meal("Rice", 200.0, Unit::Grams), None, 150.0),
            SelectedMeal::new(meal("Soup", 120.0, Unit::Portion), None, 2.0),
        ];
        let totals = selection_totals(&selection);
        assert!((totals.calories - 540.0).abs() < 1e-9);
        assert!((totals.cost - 3500.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaled_quantities_snap_per_unit() {
        let selection = vec![
            SelectedMeal::new(meal("Rice", 200.0, Unit::Grams), None, 100.0),
            SelectedMeal::new(meal("Soup", 120.0, Unit::Portion), None, 1.0),
        ];
        assert_eq!(scaled_quantities(&selection, 1.6), vec![150.0, 2.0]);
    }

    #[test]
    fn test_scale_factor_floor() {
        assert_eq!(scale_factor(2000.0, 0.0), 2000.0);
        assert!((scale_factor(2000.0, 1000.0) - 2.0).abs() < 1e-9);
    }
}
