// Shared HTTP API types

pub mod common;

pub use common::ErrorResponse;
