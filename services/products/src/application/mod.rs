//! Application layer

mod handler;

pub use handler::ProductHandler;
