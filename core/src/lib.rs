pub mod bmr;
pub mod catalog;
pub mod classifier;
pub mod db;
pub mod models;
pub mod recommend;
