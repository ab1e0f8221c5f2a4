use serde::{Deserialize, Serialize};

use crate::models::plan::NutritionTotals;

/// Nutrition and price for one basis amount of a food (100 g for gram entries).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    pub price: f64,
}

impl NutritionProfile {
    /// Values for `factor` basis amounts.
    pub fn scaled(&self, factor: f64) -> NutritionTotals {
        NutritionTotals {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
            cost: self.price * factor,
        }
    }

    pub fn is_valid(&self) -> bool {
        [
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
            self.fiber,
            self.price,
        ]
        .into_iter()
        .all(|v| v.is_finite() && v >= 0.0)
    }
}

/// A cooking-method variant overriding the base values of a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingMethod {
    pub method: String,
    #[serde(flatten)]
    pub nutrition: NutritionProfile,
}

/// Macro component a catalog meal is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Carb,
    Protein,
    GoodFat,
    Fiber,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Carb,
        Category::Protein,
        Category::GoodFat,
        Category::Fiber,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Carb => "carb",
            Category::Protein => "protein",
            Category::GoodFat => "good_fat",
            Category::Fiber => "fiber",
        }
    }
}

/// Unit of measure a catalog entry is quantified in.
///
/// Gram entries carry values per 100 g and snap to 25 g steps; portion
/// entries carry values per portion and snap to whole portions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Grams,
    Portion,
}

impl Unit {
    /// Amount the nutrition profile is expressed for.
    pub fn basis(&self) -> f64 {
        match self {
            Unit::Grams => 100.0,
            Unit::Portion => 1.0,
        }
    }

    /// Rounding increment, also the smallest allowed quantity.
    pub fn step(&self) -> f64 {
        match self {
            Unit::Grams => crate::planner::constants::GRAM_STEP,
            Unit::Portion => crate::planner::constants::PORTION_STEP,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Portion => "portion",
        }
    }
}

/// A catalog meal with its base nutrition and cooking-method variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,

    #[serde(flatten)]
    pub nutrition: NutritionProfile,

    #[serde(rename = "component_type")]
    pub category: Category,

    #[serde(default)]
    pub food_type: String,

    #[serde(default)]
    pub unit: Unit,

    #[serde(default)]
    pub cooking_methods: Vec<CookingMethod>,
}

impl Meal {
    /// Find a cooking method by name (case-insensitive).
    pub fn method(&self, name: &str) -> Option<&CookingMethod> {
        self.cooking_methods
            .iter()
            .find(|m| m.method.to_lowercase() == name.to_lowercase())
    }

    /// Nutrition for an optional cooking method, falling back to base values.
    ///
    /// Returns the profile and the canonical method name when one matched.
    pub fn resolve(&self, method: Option<&str>) -> (&NutritionProfile, Option<&str>) {
        match method.and_then(|m| self.method(m)) {
            Some(cm) => (&cm.nutrition, Some(cm.method.as_str())),
            None => (&self.nutrition, None),
        }
    }

    /// Nutrition and cost for `quantity` units of this meal.
    pub fn nutrition_for(&self, method: Option<&str>, quantity: f64) -> NutritionTotals {
        let (profile, _) = self.resolve(method);
        profile.scaled(quantity / self.unit.basis())
    }

    /// Basic validation: a name and non-negative, finite values everywhere.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.nutrition.is_valid()
            && self
                .cooking_methods
                .iter()
                .all(|m| !m.method.trim().is_empty() && m.nutrition.is_valid())
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl PartialEq for Meal {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Meal {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meal() -> Meal {
        Meal {
            name: "Trứng gà".to_string(),
            nutrition: NutritionProfile {
                calories: 155.0,
                protein: 13.0,
                carbs: 1.1,
                fat: 11.0,
                fiber: 0.0,
                price: 1500.0,
            },
            category: Category::Protein,
            food_type: "eggs".to_string(),
            unit: Unit::Grams,
            cooking_methods: vec![CookingMethod {
                method: "fried".to_string(),
                nutrition: NutritionProfile {
                    calories: 184.0,
                    protein: 13.0,
                    carbs: 1.1,
                    fat: 14.0,
                    fiber: 0.0,
                    price: 3000.0,
                },
            }],
        }
    }

    #[test]
    fn test_resolve_method_case_insensitive() {
        let meal = sample_meal();
        let (profile, method) = meal.resolve(Some("FRIED"));
        assert_eq!(method, Some("fried"));
        assert_eq!(profile.calories, 184.0);
    }

    #[test]
    fn test_resolve_unknown_method_uses_base() {
        let meal = sample_meal();
        let (profile, method) = meal.resolve(Some("poached"));
        assert_eq!(method, None);
        assert_eq!(profile.calories, 155.0);

        let (profile, _) = meal.resolve(None);
        assert_eq!(profile.price, 1500.0);
    }

    #[test]
    fn test_nutrition_for_grams() {
        let meal = sample_meal();
        let totals = meal.nutrition_for(Some("fried"), 150.0);
        assert!((totals.calories - 276.0).abs() < 1e-9);
        assert!((totals.fat - 21.0).abs() < 1e-9);
        assert!((totals.cost - 4500.0).abs() < 1e-9);
    }

    #[test]
    fn test_nutrition_for_portions() {
        let mut meal = sample_meal();
        meal.unit = Unit::Portion;
        let totals = meal.nutrition_for(None, 2.0);
        assert!((totals.calories - 310.0).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_flattened_catalog_entry() {
        let json = r#"{
            "name": "Táo", "calories": 52, "protein": 0.3, "carbs": 13.8, "fat": 0.2,
            "fiber": 2.4, "price": 4000, "component_type": "fiber", "food_type": "fruits",
            "cooking_methods": [{"method": "raw", "calories": 95, "protein": 0.5,
                                 "carbs": 25.1, "fat": 0.3, "price": 5000}]
        }"#;
        let meal: Meal = serde_json::from_str(json).unwrap();
        assert_eq!(meal.category, Category::Fiber);
        assert_eq!(meal.unit, Unit::Grams);
        assert_eq!(meal.cooking_methods[0].nutrition.fiber, 0.0);
        assert!(meal.is_valid());
    }

    #[test]
    fn test_is_valid_rejects_negative() {
        let mut meal = sample_meal();
        meal.cooking_methods[0].nutrition.fat = -1.0;
        assert!(!meal.is_valid());
    }

    #[test]
    fn test_equality_case_insensitive() {
        let meal1 = sample_meal();
        let mut meal2 = sample_meal();
        meal2.name = "TRỨNG GÀ".to_string();
        assert_eq!(meal1, meal2);
    }
}
