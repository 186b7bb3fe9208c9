pub mod config;
pub mod fazel;
pub mod plan;
pub mod pointing;
pub mod scan;
pub mod sky;
