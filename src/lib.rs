pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod lesson;
pub mod model;
pub mod session;
pub mod ui;
pub mod view_models;

pub use app::LearnApp;
