pub mod agent;
pub mod config;
pub mod errors;
pub mod resume_generator;
pub mod routes;
pub mod state;
