use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::{NutriError, Result};
use crate::models::NutritionTotals;

/// A shopping-cart line. Quantity is in grams; nutrition and price are for that amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub cooking_method: Option<String>,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_fiber: f64,
    pub total_cost: f64,
}

impl CartSummary {
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let totals: NutritionTotals = items
            .iter()
            .map(|i| NutritionTotals {
                calories: i.calories,
                protein: i.protein,
                carbs: i.carbs,
                fat: i.fat,
                fiber: i.fiber,
                cost: i.price,
            })
            .sum();
        Self {
            items,
            total_calories: totals.calories,
            total_protein: totals.protein,
            total_carbs: totals.carbs,
            total_fat: totals.fat,
            total_fiber: totals.fiber,
            total_cost: totals.cost,
        }
    }
}

/// Storage behind the cart endpoints.
pub trait CartStore: Send + Sync {
    /// Append an item; returns the new cart size.
    fn add(&self, item: CartItem) -> usize;

    /// Remove the item at `index`; returns it with the new cart size.
    fn remove(&self, index: usize) -> Result<(CartItem, usize)>;

    fn clear(&self);

    fn items(&self) -> Vec<CartItem>;

    fn summary(&self) -> CartSummary {
        CartSummary::from_items(self.items())
    }
}

/// Process-lifetime cart kept in memory.
#[derive(Debug, Default)]
pub struct InMemoryCart {
    items: Mutex<Vec<CartItem>>,
}

impl InMemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartItem>> {
        // A panic while holding the lock cannot leave the Vec half-updated.
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CartStore for InMemoryCart {
    fn add(&self, item: CartItem) -> usize {
        let mut items = self.lock();
        items.push(item);
        items.len()
    }

    fn remove(&self, index: usize) -> Result<(CartItem, usize)> {
        let mut items = self.lock();
        if index >= items.len() {
            return Err(NutriError::CartItemNotFound(index));
        }
        let removed = items.remove(index);
        Ok((removed, items.len()))
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn items(&self) -> Vec<CartItem> {
        self.lock().clone()
    }
}
