//! Published model handle with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and whole-model replacement. A
//! reload builds a complete new `ContentModel` and publishes it with a
//! single pointer swap; readers holding the previous `Arc` finish their
//! request against a consistent snapshot, never a half-resolved page.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use super::error::ContentError;
use super::model::ContentModel;
use crate::config::Config;
use crate::debug;

/// Global published model. Empty until the first successful reload.
static MODEL: LazyLock<ArcSwap<ContentModel>> =
    LazyLock::new(|| ArcSwap::from_pointee(ContentModel::default()));

/// Snapshot of the currently published model.
#[inline]
pub fn model() -> Arc<ContentModel> {
    MODEL.load_full()
}

/// Rebuild the model from the configured content root and publish it.
///
/// On failure nothing is swapped: the previously published model keeps
/// serving and the cause surfaces as `ReloadAborted`.
pub fn reload(config: &Config) -> Result<(), ContentError> {
    reload_into(&MODEL, &config.content_root())
}

/// Reload against an explicit slot (the global one in production).
pub fn reload_into(slot: &ArcSwap<ContentModel>, root: &Path) -> Result<(), ContentError> {
    match ContentModel::build(root) {
        Ok(next) => {
            debug!(
                "reload";
                "content parsed: {} page(s), {} module(s), {} type(s)",
                next.pages.len(), next.modules.len(), next.type_routes.len()
            );
            slot.store(Arc::new(next));
            Ok(())
        }
        Err(cause) => Err(ContentError::aborted(cause)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reload_publishes_new_model() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.toml"), r#"title = "Home""#).unwrap();

        let slot = ArcSwap::from_pointee(ContentModel::default());
        reload_into(&slot, dir.path()).unwrap();

        assert!(slot.load().resolve("/").is_some());
    }

    #[test]
    fn test_failed_reload_keeps_prior_model() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.toml"), r#"title = "Home""#).unwrap();

        let slot = ArcSwap::from_pointee(ContentModel::default());
        reload_into(&slot, dir.path()).unwrap();

        // Author breaks a file: next reload aborts, prior model serves
        fs::write(dir.path().join("broken.toml"), "title = [unclosed").unwrap();
        let err = reload_into(&slot, dir.path()).unwrap_err();
        assert!(matches!(err, ContentError::ReloadAborted(_)));

        let published = slot.load();
        assert!(published.resolve("/").is_some());
        assert!(published.resolve("/broken").is_none());
    }

    #[test]
    fn test_reload_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("old.toml"), r#"title = "Old""#).unwrap();

        let slot = ArcSwap::from_pointee(ContentModel::default());
        reload_into(&slot, dir.path()).unwrap();
        assert!(slot.load().resolve("/old").is_some());

        // No incremental mutation: removed files vanish on the next cycle
        fs::remove_file(dir.path().join("old.toml")).unwrap();
        fs::write(dir.path().join("new.toml"), r#"title = "New""#).unwrap();
        reload_into(&slot, dir.path()).unwrap();

        let published = slot.load();
        assert!(published.resolve("/old").is_none());
        assert!(published.resolve("/new").is_some());
    }

    #[test]
    fn test_prior_snapshot_outlives_swap() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.toml"), r#"title = "A""#).unwrap();

        let slot = ArcSwap::from_pointee(ContentModel::default());
        reload_into(&slot, dir.path()).unwrap();

        // A concurrent reader's snapshot stays consistent across a swap
        let snapshot = slot.load_full();
        fs::write(dir.path().join("b.toml"), r#"title = "B""#).unwrap();
        reload_into(&slot, dir.path()).unwrap();

        assert!(snapshot.resolve("/b").is_none());
        assert!(slot.load().resolve("/b").is_some());
    }
}
