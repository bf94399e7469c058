//! Error handling for the engine.

pub mod domain;

pub use domain::DomainError;

#[cfg(test)]
mod tests_error_mapping;
