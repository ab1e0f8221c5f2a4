use std::fs;
use std::path::Path;

use crate::error::{NutriError, Result};
use crate::models::Meal;
use crate::state::catalog::MealCatalog;

/// Load a meal catalog from a JSON file.
///
/// Deduplicates by lowercase name (last occurrence wins) and rejects entries
/// with a blank name or negative values.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<MealCatalog> {
    let content = fs::read_to_string(path)?;
    let meals: Vec<Meal> = serde_json::from_str(&content)?;

    if let Some(bad) = meals.iter().find(|m| !m.is_valid()) {
        return Err(NutriError::InvalidInput(format!(
            "catalog entry '{}' has a blank name or invalid values",
            bad.name
        )));
    }

    Ok(MealCatalog::new(meals))
}

/// Save a meal catalog to a JSON file.
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &MealCatalog) -> Result<()> {
    let json = serde_json::to_string_pretty(&catalog.to_meals())?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::default_catalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_and_save_roundtrip() {
        let out_file = NamedTempFile::new().unwrap();
        save_catalog(out_file.path(), &default_catalog()).unwrap();

        let reloaded = load_catalog(out_file.path()).unwrap();
        assert_eq!(reloaded.len(), 15);
        assert_eq!(reloaded.all_meals()[0].name, "Gạo lứt");
        assert_eq!(
            reloaded.get_meal("ức gà").unwrap().cooking_methods.len(),
            3
        );
    }

    #[test]
    fn test_deduplication() {
        let json = r#"[
            {"name": "Apple", "calories": 52, "protein": 0.3, "carbs": 14, "fat": 0.2, "price": 4000, "component_type": "fiber"},
            {"name": "apple", "calories": 52, "protein": 0.3, "carbs": 14, "fat": 0.2, "price": 6000, "component_type": "fiber"}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        // Last occurrence wins
        assert_eq!(catalog.get_meal("APPLE").unwrap().nutrition.price, 6000.0);
    }

    #[test]
    fn test_portion_unit_entry() {
        let json = r#"[
            {"name": "Phở bò", "calories": 450, "protein": 25, "carbs": 60, "fat": 12,
             "price": 50000, "component_type": "carb", "unit": "portion"}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        let meal = catalog.get_meal("phở bò").unwrap();
        assert_eq!(meal.unit, crate::models::Unit::Portion);
        assert_eq!(meal.nutrition_for(None, 2.0).calories, 900.0);
    }

    #[test]
    fn test_rejects_negative_values() {
        let json = r#"[
            {"name": "Bad", "calories": -5, "protein": 0, "carbs": 0, "fat": 0, "price": 0, "component_type": "carb"}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert!(matches!(
            load_catalog(file.path()),
            Err(NutriError::InvalidInput(_))
        ));
    }
}
