use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    add_to_cart, calculate_profile, clear_cart, get_cart, health, list_meals, optimize_budget,
    recommend_daily, recommend_meals, remove_cart_item, root,
};
use crate::api::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/meals", get(list_meals))
        .route("/api/user/calculate", post(calculate_profile))
        .route("/api/meals/recommend", post(recommend_meals))
        .route("/api/daily/recommend", post(recommend_daily))
        .route("/api/budget/optimize", post(optimize_budget))
        .route("/api/cart", get(get_cart))
        .route("/api/cart/add", post(add_to_cart))
        .route("/api/cart/clear", delete(clear_cart))
        .route("/api/cart/item/{index}", delete(remove_cart_item))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
