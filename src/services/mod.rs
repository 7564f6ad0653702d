pub mod errors;
pub mod favorites;
pub mod ingredients;
pub mod recipes;
pub mod shopping_cart;
pub mod subscriptions;
pub mod tags;
pub mod users;
pub mod views;

#[cfg(test)]
mod fixtures;

pub use errors::{ServiceError, ServiceResult};
