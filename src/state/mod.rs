mod cart;
mod catalog;
mod persistence;

pub use cart::{CartItem, CartStore, CartSummary, InMemoryCart};
pub use catalog::{default_catalog, MealCatalog};
pub use persistence::{load_catalog, save_catalog};
