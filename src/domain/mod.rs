pub mod analytics;
pub mod listing;
