pub mod actions;
mod app;
pub mod events;
pub mod worker;

pub use app::App;
