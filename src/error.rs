use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutriError {
    #[error("Unknown meal '{name}'{}", suggestion_suffix(.suggestion))]
    UnknownMeal {
        name: String,
        suggestion: Option<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No meals selected")]
    EmptySelection,

    #[error("Cart item {0} not found")]
    CartItemNotFound(usize),

    #[error("Server error: {0}")]
    Server(String),

    #[error("AI client error: {0}")]
    Ai(#[from] crate::ai::AiError),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{}'?)", name),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, NutriError>;
