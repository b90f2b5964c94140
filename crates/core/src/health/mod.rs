//! Health module - structured service diagnostics.

mod model;

pub use model::Health;
