use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{NutriError, Result};
use crate::models::{Category, CookingMethod, Meal, NutritionProfile, Unit};

/// Minimum similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Read-only meal catalog with case-insensitive lookups.
///
/// Keeps the order meals were supplied in.
#[derive(Debug, Clone, Default)]
pub struct MealCatalog {
    meals: Vec<Meal>,
    /// Position in `meals`, keyed by lowercase name.
    index: HashMap<String, usize>,
}

impl MealCatalog {
    /// Build a catalog; a later meal with the same name replaces an earlier one.
    pub fn new(meals: Vec<Meal>) -> Self {
        let mut catalog = Self::default();
        for meal in meals {
            match catalog.index.get(&meal.key()) {
                Some(&pos) => catalog.meals[pos] = meal,
                None => {
                    catalog.index.insert(meal.key(), catalog.meals.len());
                    catalog.meals.push(meal);
                }
            }
        }
        catalog
    }

    /// Get a meal by name (case-insensitive).
    pub fn get_meal(&self, name: &str) -> Option<&Meal> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&pos| &self.meals[pos])
    }

    /// Get a meal or fail with the closest known name as a hint.
    pub fn require_meal(&self, name: &str) -> Result<&Meal> {
        self.get_meal(name).ok_or_else(|| NutriError::UnknownMeal {
            name: name.to_string(),
            suggestion: self.closest_name(name).map(str::to_string),
        })
    }

    /// Closest catalog name by Jaro-Winkler similarity, if any is close enough.
    pub fn closest_name(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        self.meals
            .iter()
            .map(|m| (m, jaro_winkler(&m.key(), &needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(m, _)| m.name.as_str())
    }

    /// All meals in catalog order.
    pub fn all_meals(&self) -> Vec<&Meal> {
        self.meals.iter().collect()
    }

    /// Meals of one category, in catalog order.
    pub fn by_category(&self, category: Category) -> Vec<&Meal> {
        self.meals
            .iter()
            .filter(|m| m.category == category)
            .collect()
    }

    /// Convert the catalog back to a list for JSON serialization.
    pub fn to_meals(&self) -> Vec<Meal> {
        self.meals.clone()
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

fn profile(values: [f64; 6]) -> NutritionProfile {
    let [calories, protein, carbs, fat, fiber, price] = values;
    NutritionProfile {
        calories,
        protein,
        carbs,
        fat,
        fiber,
        price,
    }
}

fn meal(
    name: &str,
    base: [f64; 6],
    category: Category,
    food_type: &str,
    methods: &[(&str, [f64; 6])],
) -> Meal {
    Meal {
        name: name.to_string(),
        nutrition: profile(base),
        category,
        food_type: food_type.to_string(),
        unit: Unit::Grams,
        cooking_methods: methods
            .iter()
            .map(|(method, values)| CookingMethod {
                method: method.to_string(),
                nutrition: profile(*values),
            })
            .collect(),
    }
}

/// Built-in catalog. Values are per 100 g: kcal, protein, carbs, fat, fiber, price (VND).
pub fn default_catalog() -> MealCatalog {
    use Category::*;

    MealCatalog::new(vec![
        meal("Gạo lứt", [130.0, 2.7, 27.0, 1.0, 2.8, 2500.0], Carb, "grains", &[
            ("boiled", [216.0, 4.5, 45.0, 1.7, 4.6, 4000.0]),
            ("steamed", [216.0, 4.5, 45.0, 1.7, 4.6, 4000.0]),
        ]),
        meal("Yến mạch", [379.0, 13.2, 66.3, 6.9, 10.1, 12500.0], Carb, "grains", &[
            ("boiled", [307.0, 10.7, 54.1, 5.6, 8.2, 10000.0]),
            ("raw", [189.0, 6.6, 33.2, 3.5, 5.1, 6250.0]),
        ]),
        meal("Khoai lang", [86.0, 1.6, 20.0, 0.1, 3.0, 4000.0], Carb, "tubers", &[
            ("baked", [129.0, 2.4, 30.0, 0.2, 4.5, 6000.0]),
            ("boiled", [129.0, 2.4, 30.0, 0.2, 4.5, 6000.0]),
        ]),
        meal("Quả chuối", [89.0, 1.1, 23.0, 0.3, 2.6, 2500.0], Carb, "fruits", &[
            ("raw", [105.0, 1.3, 27.0, 0.4, 3.1, 3000.0]),
        ]),
        meal("Ức gà", [165.0, 31.0, 0.0, 3.6, 0.0, 40000.0], Protein, "poultry", &[
            ("grilled", [248.0, 46.5, 0.0, 5.4, 0.0, 20000.0]),
            ("boiled", [248.0, 46.5, 0.0, 5.4, 0.0, 20000.0]),
            ("baked", [248.0, 46.5, 0.0, 5.4, 0.0, 20000.0]),
        ]),
        meal("Trứng gà", [155.0, 13.0, 1.1, 11.0, 0.0, 1500.0], Protein, "eggs", &[
            ("boiled", [155.0, 13.0, 1.1, 11.0, 0.0, 3000.0]),
            ("fried", [184.0, 13.0, 1.1, 14.0, 0.0, 3000.0]),
            ("scrambled", [170.0, 13.0, 1.1, 12.0, 0.0, 3000.0]),
        ]),
        meal("Cá hồi", [208.0, 22.0, 0.0, 13.0, 0.0, 60000.0], Protein, "fish", &[
            ("baked", [312.0, 33.0, 0.0, 19.5, 0.0, 60000.0]),
            ("grilled", [312.0, 33.0, 0.0, 19.5, 0.0, 60000.0]),
        ]),
        meal("Sữa chua", [61.0, 3.5, 4.7, 3.3, 0.0, 7500.0], Protein, "dairy", &[
            ("plain", [122.0, 7.0, 9.4, 6.6, 0.0, 15000.0]),
        ]),
        meal("Hạnh nhân", [579.0, 21.2, 21.6, 49.9, 12.5, 17500.0], GoodFat, "nuts", &[
            ("raw", [173.0, 6.4, 6.5, 15.0, 3.8, 5250.0]),
        ]),
        meal("Bơ", [717.0, 2.5, 4.4, 81.1, 10.0, 22500.0], GoodFat, "dairy", &[
            ("spread", [107.0, 0.4, 0.7, 12.2, 1.5, 3375.0]),
        ]),
        meal("Dầu ô liu", [884.0, 0.0, 0.0, 100.0, 0.0, 12500.0], GoodFat, "oils", &[
            ("drizzled", [132.0, 0.0, 0.0, 15.0, 0.0, 1875.0]),
        ]),
        meal("Bông cải", [34.0, 2.8, 6.6, 0.4, 2.6, 7500.0], Fiber, "vegetables", &[
            ("steamed", [51.0, 4.2, 9.9, 0.6, 3.9, 11250.0]),
            ("boiled", [51.0, 4.2, 9.9, 0.6, 3.9, 11250.0]),
            ("raw", [51.0, 4.2, 9.9, 0.6, 3.9, 8000.0]),
        ]),
        meal("Cà chua", [18.0, 0.9, 3.9, 0.2, 1.2, 5000.0], Fiber, "vegetables", &[
            ("raw", [36.0, 1.8, 7.8, 0.4, 2.4, 10000.0]),
        ]),
        meal("Cải xoăn", [49.0, 4.3, 8.8, 0.9, 3.6, 6000.0], Fiber, "vegetables", &[
            ("steamed", [98.0, 8.6, 17.6, 1.8, 7.2, 10000.0]),
            ("sautéed", [98.0, 8.6, 17.6, 1.8, 7.2, 10000.0]),
            ("raw", [98.0, 8.6, 17.6, 1.8, 7.2, 5000.0]),
        ]),
        meal("Táo", [52.0, 0.3, 13.8, 0.2, 2.4, 4000.0], Fiber, "fruits", &[
            ("raw", [95.0, 0.5, 25.1, 0.3, 4.4, 5000.0]),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 15);
        assert!(catalog.all_meals().iter().all(|m| m.is_valid()));
        for category in Category::ALL {
            assert!(!catalog.by_category(category).is_empty());
        }
    }

    #[test]
    fn test_get_meal_case_insensitive() {
        let catalog = default_catalog();
        assert!(catalog.get_meal("ức gà").is_some());
        assert!(catalog.get_meal("ỨC GÀ").is_some());
        assert!(catalog.get_meal(" Táo ").is_some());
        assert!(catalog.get_meal("pizza").is_none());
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let mut first = default_catalog().to_meals();
        let mut replacement = first[0].clone();
        replacement.name = "GẠO LỨT".to_string();
        replacement.nutrition.price = 1.0;
        first.push(replacement);

        let catalog = MealCatalog::new(first);
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.all_meals()[0].nutrition.price, 1.0);
    }

    #[test]
    fn test_require_meal_suggests_close_name() {
        let catalog = default_catalog();
        let err = catalog.require_meal("Ca hoi").unwrap_err();
        match err {
            NutriError::UnknownMeal { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("Cá hồi"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_suggestion_for_unrelated_name() {
        let catalog = default_catalog();
        assert_eq!(catalog.closest_name("zzzzzzzz"), None);
    }
}
