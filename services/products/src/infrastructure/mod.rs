//! Infrastructure layer

pub mod migrations;
pub mod persistence;
