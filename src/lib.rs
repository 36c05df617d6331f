pub mod api_connection;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod matcher;
pub mod pantry;
pub mod planner;
pub mod shopping;
pub mod store;
