pub mod controller;
pub mod error;
pub mod plan;

#[cfg(test)]
mod tests;

pub use controller::{ReorderController, ReorderOutcome, ReorderReport};
pub use error::ReorderError;
pub use plan::{locate, move_by_id, move_item, plan_reorder, renumber};
