//! Typed schemas for model replies.
//!
//! Replies are untrusted: they are checked here before the planner reads any
//! number out of them.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{NutritionProfile, Unit};
use crate::planner::constants::{DEFAULT_MENU_GRAMS, PORTION_STEP};

/// Why a reply could not be used.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply is not valid JSON for the expected shape: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected {expected} quantities, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("field '{0}' is not a finite number")]
    NotANumber(String),
}

/// A number the model may send as JSON number or numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub fn value(&self) -> Option<f64> {
        let v = match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => s.trim().parse().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

fn required_number(amount: &Amount, field: &str) -> Result<f64, ReplyError> {
    amount
        .value()
        .ok_or_else(|| ReplyError::NotANumber(field.to_string()))
}

fn optional_number(amount: &Option<Amount>, field: &str) -> Result<f64, ReplyError> {
    match amount {
        Some(a) => required_number(a, field),
        None => Ok(0.0),
    }
}

/// Strip a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Reply to a portion-adjustment prompt.
#[derive(Debug, Deserialize)]
pub struct PortionReply {
    #[serde(default)]
    adjusted_grams: Option<Vec<Amount>>,
    #[serde(default)]
    adjusted_quantities: Option<Vec<Amount>>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Checked portion reply: raw suggested quantities, not yet snapped.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedPortions {
    /// `None` when the reply carried no quantity list.
    pub quantities: Option<Vec<f64>>,
    pub explanation: Option<String>,
}

impl PortionReply {
    /// Parse and check a reply that must carry `expected` quantities.
    pub fn parse(text: &str, expected: usize) -> Result<AdjustedPortions, ReplyError> {
        let reply: PortionReply = serde_json::from_str(strip_code_fence(text))?;
        let explanation = reply.explanation.filter(|e| !e.trim().is_empty());

        let Some(raw) = reply.adjusted_grams.or(reply.adjusted_quantities) else {
            return Ok(AdjustedPortions {
                quantities: None,
                explanation,
            });
        };

        if raw.len() != expected {
            return Err(ReplyError::WrongLength {
                expected,
                got: raw.len(),
            });
        }

        let quantities = raw
            .iter()
            .enumerate()
            .map(|(i, a)| required_number(a, &format!("adjusted_grams[{}]", i)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AdjustedPortions {
            quantities: Some(quantities),
            explanation,
        })
    }
}

/// One meal the model placed on the menu.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    grams: Option<Amount>,
    #[serde(default)]
    portions: Option<Amount>,
    #[serde(default)]
    calories: Option<Amount>,
    #[serde(default)]
    protein: Option<Amount>,
    #[serde(default)]
    carbs: Option<Amount>,
    #[serde(default)]
    fat: Option<Amount>,
    #[serde(default)]
    fiber: Option<Amount>,
    #[serde(default)]
    price: Option<Amount>,
}

impl MenuEntry {
    pub fn name_or_unknown(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown")
    }

    /// Non-empty method name, if any.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    /// Requested amount: `grams`, else `portions`, else the default.
    pub fn requested_grams(&self) -> Result<f64, ReplyError> {
        match (&self.grams, &self.portions) {
            (Some(g), _) => required_number(g, "grams"),
            (None, Some(p)) => required_number(p, "portions"),
            (None, None) => Ok(DEFAULT_MENU_GRAMS),
        }
    }

    /// Requested amount expressed in `unit`.
    ///
    /// Portion entries read `portions`; a bare `grams` value counts the
    /// 100 g reference amount as one portion.
    pub fn requested_amount(&self, unit: Unit) -> Result<f64, ReplyError> {
        match unit {
            Unit::Grams => self.requested_grams(),
            Unit::Portion => match (&self.portions, &self.grams) {
                (Some(p), _) => required_number(p, "portions"),
                (None, Some(g)) => Ok(required_number(g, "grams")? / DEFAULT_MENU_GRAMS),
                (None, None) => Ok(PORTION_STEP),
            },
        }
    }

    /// Numbers the model reported, read as per-100g values. Missing fields are zero.
    pub fn reported_profile(&self) -> Result<NutritionProfile, ReplyError> {
        Ok(NutritionProfile {
            calories: optional_number(&self.calories, "calories")?,
            protein: optional_number(&self.protein, "protein")?,
            carbs: optional_number(&self.carbs, "carbs")?,
            fat: optional_number(&self.fat, "fat")?,
            fiber: optional_number(&self.fiber, "fiber")?,
            price: optional_number(&self.price, "price")?,
        })
    }
}

/// Reply to a budget-menu prompt.
#[derive(Debug, Deserialize)]
pub struct MenuReply {
    #[serde(default)]
    pub breakfast: Vec<MenuEntry>,
    #[serde(default)]
    pub lunch: Vec<MenuEntry>,
    #[serde(default)]
    pub dinner: Vec<MenuEntry>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl MenuReply {
    pub fn parse(text: &str) -> Result<MenuReply, ReplyError> {
        let reply: MenuReply = serde_json::from_str(strip_code_fence(text))?;
        // Surface bad numbers now so the whole reply is rejected at once.
        for entry in reply.breakfast.iter().chain(&reply.lunch).chain(&reply.dinner) {
            entry.requested_grams()?;
        }
        Ok(reply)
    }
}
