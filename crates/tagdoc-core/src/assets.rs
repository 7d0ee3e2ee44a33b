use std::path::PathBuf;

/// Directory holding the bundled viewer UI, to be mounted with a static file server
/// under the same prefix passed to the adapter.
pub fn ui_asset_root() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/ui"))
}
