use crate::models::{Category, Menu, MenuItem, MenuSource, UserProfile};
use crate::planner::{category_name, method_label, NutritionTargets};
use crate::state::MealCatalog;

/// Display daily energy and macro targets.
pub fn display_targets(profile: &UserProfile, targets: &NutritionTargets) {
    println!();
    println!("=== Daily Targets ===");
    if !profile.name.is_empty() {
        println!("Profile: {}", profile.name);
    }
    println!(
        "{} y, {}, {} cm, {} kg, {} activity, goal: {}",
        profile.age,
        profile.gender.as_str(),
        profile.height,
        profile.weight,
        profile.activity.as_str(),
        profile.goal.as_str()
    );
    println!();
    println!("BMR:             {:>8.1} kcal", targets.bmr);
    println!("TDEE:            {:>8.1} kcal", targets.tdee);
    println!("Calorie target:  {:>8.1} kcal", targets.daily_calories);
    println!("Protein:         {:>8.1} g", targets.macros.protein);
    println!("Carbs:           {:>8.1} g", targets.macros.carbs);
    println!("Fat:             {:>8.1} g", targets.macros.fat);
    println!("Fiber:           {:>8.1} g", targets.macros.fiber);
    println!();
}

/// Display the catalog grouped by category.
pub fn display_catalog(catalog: &MealCatalog) {
    if catalog.is_empty() {
        println!("Catalog: (none)");
        return;
    }

    println!();
    println!("=== Meal Catalog ({} meals) ===", catalog.len());

    for category in Category::ALL {
        let meals = catalog.by_category(category);
        if meals.is_empty() {
            continue;
        }
        println!();
        println!("{}", category_name(category));

        let width = meals.iter().map(|m| m.name.chars().count()).max().unwrap_or(10);
        for meal in meals {
            let n = &meal.nutrition;
            let pad = width.saturating_sub(meal.name.chars().count());
            println!(
                "  {}{} - per {}{}: {:>4.0} kcal | P:{} C:{} F:{} Fib:{} | {:.0} VND",
                meal.name,
                " ".repeat(pad),
                meal.unit.basis(),
                meal.unit.symbol(),
                n.calories,
                n.protein,
                n.carbs,
                n.fat,
                n.fiber,
                n.price
            );
            if !meal.cooking_methods.is_empty() {
                let methods: Vec<String> = meal
                    .cooking_methods
                    .iter()
                    .map(|m| method_label(&m.method))
                    .collect();
                println!("  {}   methods: {}", " ".repeat(width), methods.join(", "));
            }
        }
    }
    println!();
}

fn display_menu_items(title: &str, items: &[MenuItem]) {
    println!("{}:", title);
    if items.is_empty() {
        println!("  (none)");
        return;
    }
    for item in items {
        let method = item
            .method
            .as_deref()
            .map(|m| format!(" ({})", method_label(m)))
            .unwrap_or_default();
        // Unresolved names carry the model's own numbers.
        let marker = if item.resolved { "" } else { " *" };
        println!(
            "  {}{} - {:.0} {}, {:.0} kcal, {:.0} VND{}",
            item.name,
            method,
            item.grams,
            item.unit.symbol(),
            item.calories,
            item.price,
            marker
        );
    }
}

/// Display a budget menu.
pub fn display_menu(menu: &Menu) {
    println!();
    println!("=== Daily Menu ===");
    if menu.source == MenuSource::Fallback {
        println!("(fallback menu)");
    }
    println!();

    display_menu_items("Breakfast", &menu.breakfast);
    display_menu_items("Lunch", &menu.lunch);
    display_menu_items("Dinner", &menu.dinner);

    println!();
    println!("--- Summary ---");
    println!("Total cost: {:.0} VND", menu.total_cost);
    println!("Total calories: {:.0}", menu.total_calories);
    println!(
        "Protein {:.1} g | Carbs {:.1} g | Fat {:.1} g | Fiber {:.1} g",
        menu.total_protein, menu.total_carbs, menu.total_fat, menu.total_fiber
    );
    println!();
    println!("{}", menu.explanation);
    println!();
}
