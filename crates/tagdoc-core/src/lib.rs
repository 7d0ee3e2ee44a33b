pub mod adapter;
pub mod assets;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod grouping;
pub mod parse;
pub mod route;

pub use adapter::{DocAdapter, Outcome};
pub use assets::ui_asset_root;
pub use route::Protocol;
