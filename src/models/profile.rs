use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{NutriError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Activity level used for the TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::Lose, Goal::Maintain, Goal::Gain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }
}

/// A person's body metrics and goal, as submitted with a request.
///
/// Height is in centimetres, weight in kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

impl UserProfile {
    /// Reject profiles the formulas cannot meaningfully use.
    pub fn validate(&self) -> Result<()> {
        if self.age == 0 {
            return Err(NutriError::InvalidInput("age must be positive".to_string()));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(NutriError::InvalidInput(
                "height must be a positive number of centimetres".to_string(),
            ));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(NutriError::InvalidInput(
                "weight must be a positive number of kilograms".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            name: "An".to_string(),
            age: 25,
            gender: Gender::Male,
            height: 170.0,
            weight: 70.0,
            activity: ActivityLevel::Moderate,
            goal: Goal::Maintain,
        }
    }

    #[test]
    fn test_deserialize_lowercase_enums() {
        let json = r#"{"age": 30, "gender": "female", "height": 160, "weight": 55,
                       "activity": "light", "goal": "lose"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.activity, ActivityLevel::Light);
        assert_eq!(profile.goal, Goal::Lose);
        assert!(profile.name.is_empty());
    }

    #[test]
    fn test_unknown_activity_rejected() {
        let json = r#"{"age": 30, "gender": "female", "height": 160, "weight": 55,
                       "activity": "extreme", "goal": "lose"}"#;
        assert!(serde_json::from_str::<UserProfile>(json).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(sample_profile().validate().is_ok());

        let mut no_age = sample_profile();
        no_age.age = 0;
        assert!(no_age.validate().is_err());

        let mut bad_height = sample_profile();
        bad_height.height = -1.0;
        assert!(bad_height.validate().is_err());

        let mut bad_weight = sample_profile();
        bad_weight.weight = f64::NAN;
        assert!(bad_weight.validate().is_err());
    }
}
