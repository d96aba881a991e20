/// Application layer - Controller, use cases and read models
///
/// This layer holds the page state and orchestration. It drives the domain
/// policies and reaches infrastructure only through ports.
pub mod controller;
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod use_cases;
