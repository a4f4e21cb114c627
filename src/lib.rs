#[cfg(feature = "cli")]
pub mod cli;
pub mod chart;
pub mod config;
pub mod dot;
pub mod ir;
pub mod label;
pub mod org;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use chart::build_chart;
pub use config::{Config, GraphDefaults, load_config};
pub use dot::to_dot;
pub use ir::Graph;
pub use org::Org;
pub use theme::Theme;
