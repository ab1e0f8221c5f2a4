use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::models::meal::{Meal, Unit};

/// Summed nutrition and cost for some amount of food.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub cost: f64,
}

impl Add for NutritionTotals {
    type Output = NutritionTotals;

    fn add(self, rhs: Self) -> Self::Output {
        NutritionTotals {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
            fiber: self.fiber + rhs.fiber,
            cost: self.cost + rhs.cost,
        }
    }
}

impl Sum for NutritionTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionTotals::default(), Add::add)
    }
}

/// One chosen catalog meal with its cooking method and quantity.
///
/// Pairing meal and quantity in one element keeps the selection's meals and
/// quantities the same length by construction.
#[derive(Debug, Clone)]
pub struct SelectedMeal {
    pub meal: Meal,
    pub method: Option<String>,
    pub quantity: f64,
}

impl SelectedMeal {
    pub fn new(meal: Meal, method: Option<String>, quantity: f64) -> Self {
        Self {
            meal,
            method,
            quantity,
        }
    }

    /// Display name, including the cooking method when one resolved.
    pub fn label(&self) -> String {
        match self.meal.resolve(self.method.as_deref()).1 {
            Some(method) => format!("{} ({})", self.meal.name, method),
            None => self.meal.name.clone(),
        }
    }

    /// Compute the line for this meal at an arbitrary quantity.
    pub fn line_at(&self, quantity: f64) -> PortionLine {
        let (_, method) = self.meal.resolve(self.method.as_deref());
        PortionLine {
            name: self.meal.name.clone(),
            method: method.map(str::to_string),
            unit: self.meal.unit,
            quantity,
            nutrition: self.meal.nutrition_for(self.method.as_deref(), quantity),
        }
    }
}

/// Nutrition of one selected meal at a given quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionLine {
    pub name: String,
    pub method: Option<String>,
    pub unit: Unit,
    pub quantity: f64,
    #[serde(flatten)]
    pub nutrition: NutritionTotals,
}

/// Where the adjusted quantities of a recommendation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    Ai,
    RoundedFallback,
    ScaledFallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub adjusted_meals: Vec<PortionLine>,
    pub adjusted_quantities: Vec<f64>,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_fiber: f64,
    pub total_cost: f64,
    pub explanation: String,
    pub source: RecommendationSource,
}

impl Recommendation {
    pub fn new(
        lines: Vec<PortionLine>,
        explanation: String,
        source: RecommendationSource,
    ) -> Self {
        let totals: NutritionTotals = lines.iter().map(|l| l.nutrition).sum();
        let adjusted_quantities = lines.iter().map(|l| l.quantity).collect();
        Self {
            adjusted_meals: lines,
            adjusted_quantities,
            total_calories: totals.calories,
            total_protein: totals.protein,
            total_carbs: totals.carbs,
            total_fat: totals.fat,
            total_fiber: totals.fiber,
            total_cost: totals.cost,
            explanation,
            source,
        }
    }
}

/// A menu entry with nutrition and price for its amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub method: Option<String>,
    /// Amount in `unit`: grams, or whole portions for portion meals.
    pub grams: f64,
    #[serde(default)]
    pub unit: Unit,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub price: f64,
    /// False when the name was not in the catalog and reported numbers were used.
    pub resolved: bool,
}

impl MenuItem {
    pub fn from_totals(
        name: String,
        method: Option<String>,
        grams: f64,
        unit: Unit,
        totals: NutritionTotals,
        resolved: bool,
    ) -> Self {
        Self {
            name,
            method,
            grams,
            unit,
            calories: totals.calories,
            protein: totals.protein,
            carbs: totals.carbs,
            fat: totals.fat,
            fiber: totals.fiber,
            price: totals.cost,
            resolved,
        }
    }

    pub fn totals(&self) -> NutritionTotals {
        NutritionTotals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
            cost: self.price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSource {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub breakfast: Vec<MenuItem>,
    pub lunch: Vec<MenuItem>,
    pub dinner: Vec<MenuItem>,
    pub total_cost: f64,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_fiber: f64,
    pub explanation: String,
    pub source: MenuSource,
}

impl Menu {
    /// Build a menu whose totals are summed from its items.
    pub fn from_items(
        breakfast: Vec<MenuItem>,
        lunch: Vec<MenuItem>,
        dinner: Vec<MenuItem>,
        explanation: String,
    ) -> Self {
        let totals: NutritionTotals = breakfast
            .iter()
            .chain(&lunch)
            .chain(&dinner)
            .map(MenuItem::totals)
            .sum();
        Self {
            breakfast,
            lunch,
            dinner,
            total_cost: totals.cost,
            total_calories: totals.calories,
            total_protein: totals.protein,
            total_carbs: totals.carbs,
            total_fat: totals.fat,
            total_fiber: totals.fiber,
            explanation,
            source: MenuSource::Ai,
        }
    }

    pub fn item_count(&self) -> usize {
        self.breakfast.len() + self.lunch.len() + self.dinner.len()
    }
}
