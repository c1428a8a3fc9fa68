//! `check` command - parse the content tree once and report.
//!
//! Used by content CI: exit status 0 means every file decoded and the
//! model built; a decode failure surfaces with its path and reason.

use anyhow::Result;

use crate::config::Config;
use crate::content::ContentModel;
use crate::log;

pub fn run_check(config: &Config) -> Result<()> {
    let model = ContentModel::build(&config.content_root())?;

    let unresolved = model
        .pages
        .values()
        .filter(|p| !p.type_name.is_empty() && !p.extends.is_empty() && !p.extension_base_applied)
        .count();

    log!(
        "check";
        "OK: {} page(s), {} module(s), {} type(s)",
        model.pages.len(), model.modules.len(), model.type_routes.len()
    );
    if unresolved > 0 {
        log!("check"; "warning: {} page(s) with unresolved extension", unresolved);
    }
    Ok(())
}
