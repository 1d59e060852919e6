// Presentation layer - HTTP handlers and the HTML surface
pub mod app_state;
pub mod handlers;
pub mod page;
