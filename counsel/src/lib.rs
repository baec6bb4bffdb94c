mod app;
pub mod cli;
mod format;
pub mod logging;

pub use app::App;
