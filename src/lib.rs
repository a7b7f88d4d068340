pub mod clients;
pub mod config;
pub mod context;
pub mod report;
pub mod scoring;
pub mod tasks;
pub mod trajectory;
