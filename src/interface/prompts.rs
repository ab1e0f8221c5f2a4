use dialoguer::{Input, Select};

use crate::cli::ProfileArgs;
use crate::error::{NutriError, Result};
use crate::models::{ActivityLevel, Gender, Goal, UserProfile};

/// Prompt for a positive number.
fn prompt_positive(prompt: &str, default: &str) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| NutriError::InvalidInput("Invalid number".to_string()))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(NutriError::InvalidInput(
            "Value must be greater than 0".to_string(),
        ));
    }
    Ok(value)
}

/// Prompt for age in years.
pub fn prompt_age() -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("Age (years)")
        .default("30".to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| NutriError::InvalidInput("Invalid age".to_string()))
}

pub fn prompt_gender() -> Result<Gender> {
    let options = [Gender::Male, Gender::Female];
    let labels: Vec<&str> = options.iter().map(Gender::as_str).collect();
    let selection = Select::new()
        .with_prompt("Gender")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(options[selection])
}

pub fn prompt_activity() -> Result<ActivityLevel> {
    let labels: Vec<&str> = ActivityLevel::ALL.iter().map(ActivityLevel::as_str).collect();
    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&labels)
        .default(2) // moderate
        .interact()?;
    Ok(ActivityLevel::ALL[selection])
}

pub fn prompt_goal() -> Result<Goal> {
    let labels: Vec<&str> = Goal::ALL.iter().map(Goal::as_str).collect();
    let selection = Select::new()
        .with_prompt("Goal")
        .items(&labels)
        .default(1) // maintain
        .interact()?;
    Ok(Goal::ALL[selection])
}

/// Prompt for the daily menu budget in VND.
pub fn prompt_budget() -> Result<f64> {
    prompt_positive("Daily budget (VND)", "150000")
}

/// Build a profile from command-line values, asking for whatever is missing.
pub fn collect_profile(args: &ProfileArgs) -> Result<UserProfile> {
    let age = match args.age {
        Some(age) => age,
        None => prompt_age()?,
    };
    let gender = match args.gender {
        Some(gender) => gender,
        None => prompt_gender()?,
    };
    let height = match args.height {
        Some(height) => height,
        None => prompt_positive("Height (cm)", "170")?,
    };
    let weight = match args.weight {
        Some(weight) => weight,
        None => prompt_positive("Weight (kg)", "65")?,
    };
    let activity = match args.activity {
        Some(activity) => activity,
        None => prompt_activity()?,
    };
    let goal = match args.goal {
        Some(goal) => goal,
        None => prompt_goal()?,
    };

    let profile = UserProfile {
        name: args.name.clone().unwrap_or_default(),
        age,
        gender,
        height,
        weight,
        activity,
        goal,
    };
    profile.validate()?;
    Ok(profile)
}
