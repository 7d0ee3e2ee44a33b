pub mod layer;
pub mod middleware;
pub mod response;

pub use layer::{DocAdapterLayer, DocAdapterService};
pub use middleware::{DocState, serve_docs};
pub use tagdoc_core::{DocAdapter, Outcome, Protocol, ui_asset_root};
