use tracing::{debug, info, instrument, warn};

use crate::ai::prompts::menu_prompt;
use crate::ai::{MenuEntry, MenuReply, ReplyError, TextGenerator};
use crate::models::{Category, Meal, Menu, MenuItem, MenuSource, Unit, UserProfile};
use crate::planner::calculations::{nutrition_targets, round_to_step, NutritionTargets};
use crate::planner::constants::{
    DEFAULT_MENU_EXPLANATION, DEFAULT_MENU_GRAMS, FALLBACK_BUDGET_SPLIT, FALLBACK_CALORIE_SPLIT,
    FALLBACK_MENU_CATEGORIES, FALLBACK_MENU_EXPLANATION, FALLBACK_MENU_MEALS, GRAM_STEP,
};
use crate::planner::recommend::AiSettings;
use crate::state::MealCatalog;

/// Turn one model entry into a menu item with catalog-backed numbers.
///
/// Catalog meals are quantified in their own unit and snapped to its step.
/// Names the catalog does not know keep the model's per-100g numbers and are
/// marked unresolved.
fn resolve_entry(catalog: &MealCatalog, entry: &MenuEntry) -> Result<MenuItem, ReplyError> {
    let name = entry.name_or_unknown();

    match catalog.get_meal(name) {
        Some(meal) => {
            let amount = round_to_step(entry.requested_amount(meal.unit)?, meal.unit.step());
            let (_, method) = meal.resolve(entry.method());
            let totals = meal.nutrition_for(entry.method(), amount);
            Ok(MenuItem::from_totals(
                meal.name.clone(),
                method.map(str::to_string),
                amount,
                meal.unit,
                totals,
                true,
            ))
        }
        None => {
            debug!(name, "Menu entry not in catalog, using reported values");
            let grams = round_to_step(entry.requested_grams()?, GRAM_STEP);
            let totals = entry.reported_profile()?.scaled(grams / DEFAULT_MENU_GRAMS);
            Ok(MenuItem::from_totals(
                name.to_string(),
                entry.method().map(str::to_string),
                grams,
                Unit::Grams,
                totals,
                false,
            ))
        }
    }
}

fn resolve_reply(catalog: &MealCatalog, reply: &MenuReply) -> Result<Menu, ReplyError> {
    let resolve_all = |entries: &[MenuEntry]| {
        entries
            .iter()
            .map(|e| resolve_entry(catalog, e))
            .collect::<Result<Vec<_>, _>>()
    };

    let explanation = reply
        .explanation
        .clone()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MENU_EXPLANATION.to_string());

    Ok(Menu::from_items(
        resolve_all(&reply.breakfast)?,
        resolve_all(&reply.lunch)?,
        resolve_all(&reply.dinner)?,
        explanation,
    ))
}

/// Static menu used whenever the model cannot produce one.
///
/// Each meal time shows one catalog meal at its reference amount (100 g or
/// one portion). A fixed meal missing from the catalog is replaced by the
/// first meal of its category, then by the first catalog meal. Totals report
/// the budget and the calorie and macro targets split across the day.
pub fn fallback_menu(catalog: &MealCatalog, targets: &NutritionTargets, budget: f64) -> Menu {
    let pick = |name: &str, category: Category| {
        catalog
            .get_meal(name)
            .or_else(|| catalog.by_category(category).first().copied())
            .or_else(|| catalog.all_meals().first().copied())
    };
    let item = |meal: &Meal| {
        let amount = meal.unit.basis();
        MenuItem::from_totals(
            meal.name.clone(),
            None,
            amount,
            meal.unit,
            meal.nutrition_for(None, amount),
            true,
        )
    };

    let [breakfast, lunch, dinner]: [Vec<MenuItem>; 3] = std::array::from_fn(|i| {
        pick(FALLBACK_MENU_MEALS[i], FALLBACK_MENU_CATEGORIES[i])
            .map(&item)
            .into_iter()
            .collect()
    });

    let day_share = |split: [f64; 3], total: f64| split.iter().map(|s| s * total).sum::<f64>();

    Menu {
        breakfast,
        lunch,
        dinner,
        total_cost: day_share(FALLBACK_BUDGET_SPLIT, budget),
        total_calories: day_share(FALLBACK_CALORIE_SPLIT, targets.daily_calories),
        total_protein: day_share(FALLBACK_CALORIE_SPLIT, targets.macros.protein),
        total_carbs: day_share(FALLBACK_CALORIE_SPLIT, targets.macros.carbs),
        total_fat: day_share(FALLBACK_CALORIE_SPLIT, targets.macros.fat),
        total_fiber: day_share(FALLBACK_CALORIE_SPLIT, targets.macros.fiber),
        explanation: FALLBACK_MENU_EXPLANATION.to_string(),
        source: MenuSource::Fallback,
    }
}

/// Ask the model for a breakfast/lunch/dinner menu within `budget`.
#[instrument(skip_all, fields(budget = budget))]
pub async fn optimize_menu(
    generator: &dyn TextGenerator,
    settings: &AiSettings,
    catalog: &MealCatalog,
    profile: &UserProfile,
    budget: f64,
) -> Menu {
    let targets = nutrition_targets(profile);
    let prompt = menu_prompt(
        profile,
        &targets,
        &catalog.all_meals(),
        budget,
        &settings.response_language,
    );
    debug!(prompt_len = prompt.len(), "Built menu prompt");

    let text = match generator.generate_json(&settings.menu_model, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Menu optimization call failed, using fallback menu");
            return fallback_menu(catalog, &targets, budget);
        }
    };

    match MenuReply::parse(&text).and_then(|reply| resolve_reply(catalog, &reply)) {
        Ok(menu) => {
            info!(
                items = menu.item_count(),
                total_cost = menu.total_cost,
                "Menu optimized"
            );
            menu
        }
        Err(e) => {
            warn!(error = %e, "Unusable menu reply, using fallback menu");
            fallback_menu(catalog, &targets, budget)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::default_catalog;

    #[test]
    fn test_resolve_entry_uses_catalog_method() {
        let catalog = default_catalog();
        let reply = MenuReply::parse(
            r#"{"lunch": [{"name": "ức gà", "method": "GRILLED", "grams": 160, "calories": 1}]}"#,
        )
        .unwrap();
        let item = resolve_entry(&catalog, &reply.lunch[0]).unwrap();

        assert!(item.resolved);
        assert_eq!(item.name, "Ức gà");
        assert_eq!(item.method.as_deref(), Some("grilled"));
        assert_eq!(item.grams, 150.0);
        assert!((item.calories - 372.0).abs() < 1e-9);
        assert!((item.price - 30000.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_method_uses_base_values() {
        let catalog = default_catalog();
        let reply =
            MenuReply::parse(r#"{"dinner": [{"name": "Táo", "method": "juiced", "grams": 200}]}"#)
                .unwrap();
        let item = resolve_entry(&catalog, &reply.dinner[0]).unwrap();

        assert_eq!(item.method, None);
        assert!((item.calories - 104.0).abs() < 1e-9);
    }

    fn meal(name: &str, category: Category, unit: Unit, calories: f64, price: f64) -> Meal {
        Meal {
            name: name.to_string(),
            nutrition: crate::models::NutritionProfile {
                calories,
                protein: 10.0,
                carbs: 20.0,
                fat: 5.0,
                fiber: 2.0,
                price,
            },
            category,
            food_type: String::new(),
            unit,
            cooking_methods: Vec::new(),
        }
    }

    fn targets() -> NutritionTargets {
        NutritionTargets {
            bmr: 0.0,
            tdee: 0.0,
            daily_calories: 2000.0,
            macros: crate::planner::calculations::macro_targets(
                crate::models::Goal::Maintain,
                2000.0,
            ),
        }
    }

    #[test]
    fn test_portion_meal_snaps_to_whole_portions() {
        let catalog = MealCatalog::new(vec![meal(
            "Bánh cuốn",
            Category::Carb,
            Unit::Portion,
            300.0,
            25000.0,
        )]);
        let reply = MenuReply::parse(
            r#"{"breakfast": [{"name": "Bánh cuốn", "portions": 1.6}, {"name": "bánh cuốn", "grams": 250}]}"#,
        )
        .unwrap();

        let item = resolve_entry(&catalog, &reply.breakfast[0]).unwrap();
        assert_eq!(item.unit, Unit::Portion);
        assert_eq!(item.grams, 2.0);
        assert!((item.calories - 600.0).abs() < 1e-9);
        assert!((item.price - 50000.0).abs() < 1e-9);

        // 250 g reads as 2.5 portions, which rounds to even.
        let item = resolve_entry(&catalog, &reply.breakfast[1]).unwrap();
        assert_eq!(item.grams, 2.0);
    }

    #[test]
    fn test_fallback_menu_substitutes_by_category() {
        let catalog = MealCatalog::new(vec![
            meal("Rau muống", Category::Fiber, Unit::Grams, 20.0, 1500.0),
            meal("Đậu phụ", Category::Protein, Unit::Grams, 76.0, 3000.0),
            meal("Xôi", Category::Carb, Unit::Portion, 350.0, 15000.0),
        ]);
        let menu = fallback_menu(&catalog, &targets(), 90000.0);

        assert_eq!(menu.breakfast[0].name, "Xôi");
        assert_eq!(menu.breakfast[0].unit, Unit::Portion);
        assert_eq!(menu.breakfast[0].grams, 1.0);
        assert!((menu.breakfast[0].calories - 350.0).abs() < 1e-9);
        assert_eq!(menu.lunch[0].name, "Đậu phụ");
        assert_eq!(menu.dinner[0].name, "Rau muống");
        assert_eq!(menu.dinner[0].grams, 100.0);
    }

    #[test]
    fn test_fallback_menu_uses_first_meal_when_category_is_missing() {
        let catalog = MealCatalog::new(vec![meal(
            "Hạt điều",
            Category::GoodFat,
            Unit::Grams,
            553.0,
            30000.0,
        )]);
        let menu = fallback_menu(&catalog, &targets(), 60000.0);

        assert_eq!(menu.item_count(), 3);
        assert!(
            [&menu.breakfast, &menu.lunch, &menu.dinner]
                .iter()
                .all(|items| items[0].name == "Hạt điều")
        );
        assert!((menu.total_cost - 60000.0).abs() < 1e-6);
    }

    #[test]
    fn test_fallback_menu_of_empty_catalog_has_no_items() {
        let menu = fallback_menu(&MealCatalog::new(Vec::new()), &targets(), 60000.0);
        assert_eq!(menu.item_count(), 0);
        assert!((menu.total_calories - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_fallback_menu_shape() {
        let catalog = default_catalog();
        let menu = fallback_menu(&catalog, &targets(), 100000.0);

        assert_eq!(menu.source, MenuSource::Fallback);
        assert_eq!(menu.breakfast[0].name, "Yến mạch");
        assert_eq!(menu.lunch[0].name, "Ức gà");
        assert_eq!(menu.dinner[0].name, "Bông cải");
        assert!((menu.total_cost - 100000.0).abs() < 1e-6);
        assert!((menu.total_calories - 2000.0).abs() < 1e-6);
    }
}
