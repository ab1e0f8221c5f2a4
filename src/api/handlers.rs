use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::error::NutriError;
use crate::models::{Category, Menu, Recommendation, SelectedMeal, UserProfile};
use crate::planner::constants::DEFAULT_DAILY_QUANTITY;
use crate::planner::{
    category_name, method_label, nutrition_targets, optimize_menu, recommend_portions,
};
use crate::state::{CartItem, CartSummary, MealCatalog};

type ApiResult<T> = Result<Json<T>, ApiError>;

const RUNNING_MESSAGE: &str = "Nutri AI API is running";

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub bmr: f64,
    pub tdee: f64,
    pub daily_calories: f64,
    pub protein_target: f64,
    pub carb_target: f64,
    pub fat_target: f64,
    pub fiber_target: f64,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct SelectedMealRequest {
    pub name: String,
    #[serde(default)]
    pub cooking_method: Option<String>,
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub user: UserProfile,
    pub selected_meals: Vec<SelectedMealRequest>,
}

/// Meals chosen for one meal time, as parallel lists.
#[derive(Debug, Default, Deserialize)]
pub struct MealTimeRequest {
    #[serde(default)]
    pub meals: Vec<String>,
    #[serde(default)]
    pub quantities: Vec<f64>,
    #[serde(default)]
    pub methods: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct DailyMealsRequest {
    #[serde(default)]
    pub breakfast: MealTimeRequest,
    #[serde(default)]
    pub lunch: MealTimeRequest,
    #[serde(default)]
    pub dinner: MealTimeRequest,
}

#[derive(Debug, Deserialize)]
pub struct DailyRecommendRequest {
    pub user: UserProfile,
    pub daily_meals: DailyMealsRequest,
}

#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    pub user: UserProfile,
    pub budget: f64,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub message: String,
    pub cart_size: usize,
}

/// Look up one requested meal and pair it with its quantity.
fn select_meal(
    catalog: &MealCatalog,
    name: &str,
    method: Option<String>,
    quantity: f64,
) -> Result<SelectedMeal, NutriError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(NutriError::InvalidInput(format!(
            "Quantity for '{}' must be a positive number",
            name
        )));
    }
    let meal = catalog.require_meal(name)?;
    let method = method.filter(|m| !m.trim().is_empty());
    Ok(SelectedMeal::new(meal.clone(), method, quantity))
}

fn daily_selection(
    catalog: &MealCatalog,
    daily: DailyMealsRequest,
) -> Result<Vec<SelectedMeal>, NutriError> {
    let mut selection = Vec::new();
    for meal_time in [daily.breakfast, daily.lunch, daily.dinner] {
        for (i, name) in meal_time.meals.iter().enumerate() {
            let quantity = meal_time
                .quantities
                .get(i)
                .copied()
                .unwrap_or(DEFAULT_DAILY_QUANTITY);
            let method = meal_time.methods.get(i).cloned().flatten();
            selection.push(select_meal(catalog, name, method, quantity)?);
        }
    }
    Ok(selection)
}

async fn recommend(
    state: &AppState,
    user: UserProfile,
    selection: Vec<SelectedMeal>,
) -> ApiResult<Recommendation> {
    user.validate()?;
    if selection.is_empty() {
        return Err(NutriError::EmptySelection.into());
    }
    let recommendation =
        recommend_portions(state.generator.as_ref(), &state.ai, &user, &selection).await;
    Ok(Json(recommendation))
}

/// GET / - Service banner
pub async fn root() -> Json<Value> {
    Json(json!({ "message": RUNNING_MESSAGE }))
}

/// GET /api/health - Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "message": RUNNING_MESSAGE }))
}

/// GET /api/meals - Catalog grouped by category
pub async fn list_meals(State(state): State<AppState>) -> ApiResult<Value> {
    let mut categories = Map::new();
    for category in Category::ALL {
        let meals = serde_json::to_value(state.catalog.by_category(category))
            .map_err(NutriError::from)?;
        categories.insert(
            category.key().to_string(),
            json!({ "name": category_name(category), "meals": meals }),
        );
    }
    Ok(Json(json!({ "categories": categories })))
}

/// POST /api/user/calculate - Energy and macro targets for a profile
pub async fn calculate_profile(
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> ApiResult<ProfileResponse> {
    let Json(user) = payload?;
    user.validate()?;

    let targets = nutrition_targets(&user);
    Ok(Json(ProfileResponse {
        bmr: targets.bmr,
        tdee: targets.tdee,
        daily_calories: targets.daily_calories,
        protein_target: targets.macros.protein,
        carb_target: targets.macros.carbs,
        fat_target: targets.macros.fat,
        fiber_target: targets.macros.fiber,
        user,
    }))
}

/// POST /api/meals/recommend - Re-balance a selection of meals
pub async fn recommend_meals(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> ApiResult<Recommendation> {
    let Json(request) = payload?;
    let selection = request
        .selected_meals
        .into_iter()
        .map(|m| select_meal(&state.catalog, &m.name, m.cooking_method, m.quantity))
        .collect::<Result<Vec<_>, _>>()?;
    recommend(&state, request.user, selection).await
}

/// POST /api/daily/recommend - Re-balance a breakfast/lunch/dinner plan
pub async fn recommend_daily(
    State(state): State<AppState>,
    payload: Result<Json<DailyRecommendRequest>, JsonRejection>,
) -> ApiResult<Recommendation> {
    let Json(request) = payload?;
    let selection = daily_selection(&state.catalog, request.daily_meals)?;
    recommend(&state, request.user, selection).await
}

/// POST /api/budget/optimize - Three-meal menu within a daily budget
pub async fn optimize_budget(
    State(state): State<AppState>,
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> ApiResult<Menu> {
    let Json(request) = payload?;
    request.user.validate()?;
    if !request.budget.is_finite() || request.budget <= 0.0 {
        return Err(ApiError::bad_request("Budget must be greater than 0"));
    }

    let menu = optimize_menu(
        state.generator.as_ref(),
        &state.ai,
        &state.catalog,
        &request.user,
        request.budget,
    )
    .await;
    Ok(Json(menu))
}

/// GET /api/cart - Cart contents with totals
pub async fn get_cart(State(state): State<AppState>) -> Json<CartSummary> {
    Json(state.cart.summary())
}

/// POST /api/cart/add
pub async fn add_to_cart(
    State(state): State<AppState>,
    payload: Result<Json<CartItem>, JsonRejection>,
) -> ApiResult<CartResponse> {
    let Json(mut item) = payload?;
    item.cooking_method = item.cooking_method.as_deref().map(method_label);

    let cart_size = state.cart.add(item);
    Ok(Json(CartResponse {
        message: "Item added to cart".to_string(),
        cart_size,
    }))
}

/// DELETE /api/cart/clear
pub async fn clear_cart(State(state): State<AppState>) -> Json<CartResponse> {
    state.cart.clear();
    info!("Cart cleared");
    Json(CartResponse {
        message: "Cart cleared".to_string(),
        cart_size: 0,
    })
}

/// DELETE /api/cart/item/{index}
pub async fn remove_cart_item(
    State(state): State<AppState>,
    index: Result<Path<i64>, PathRejection>,
) -> ApiResult<CartResponse> {
    let Path(index) = index?;
    let index = usize::try_from(index)
        .map_err(|_| ApiError::not_found("Item not found in cart"))?;
    let (removed, cart_size) = state.cart.remove(index)?;
    Ok(Json(CartResponse {
        message: format!("Removed {} from cart", removed.name),
        cart_size,
    }))
}
