//! Content tree traversal: files in, route-keyed records out.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::error::ContentError;
use super::module::Module;
use super::page::Page;
use super::route::RouteKey;

/// File extension of legacy flat-mapping pages.
pub const PAGE_EXTENSION: &str = "toml";

/// File extension of new-generation nested modules.
pub const MODULE_EXTENSION: &str = "json";

/// Records collected by one walk, keyed per generation.
#[derive(Debug, Default)]
pub struct WalkOutput {
    pub pages: BTreeMap<RouteKey, Page>,
    pub modules: BTreeMap<RouteKey, Module>,
}

/// Recursively visit every file under `root` and parse the eligible ones.
///
/// Anything that is neither a page nor a module file is ignored here;
/// those are assets served by the static file path. Any read or decode
/// failure aborts the walk - there is no skip-and-continue mode.
pub fn walk_content(root: &Path) -> Result<WalkOutput, ContentError> {
    if !root.is_dir() {
        return Err(ContentError::MissingContentRoot(root.to_path_buf()));
    }

    let mut output = WalkOutput::default();
    walk_dir(root, root, &mut output)?;
    Ok(output)
}

fn walk_dir(root: &Path, dir: &Path, output: &mut WalkOutput) -> Result<(), ContentError> {
    let entries = fs::read_dir(dir).map_err(|source| ContentError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| ContentError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            walk_dir(root, &path, output)?;
            continue;
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(PAGE_EXTENSION) => load_page(root, &path, output)?,
            Some(MODULE_EXTENSION) => load_module(root, &path, output)?,
            _ => {}
        }
    }

    Ok(())
}

fn load_page(root: &Path, path: &Path, output: &mut WalkOutput) -> Result<(), ContentError> {
    let raw = read_file(path)?;
    let mut page: Page = toml::from_str(&raw).map_err(|e| ContentError::Decode {
        path: path.to_path_buf(),
        reason: e.message().to_string(),
    })?;

    // The parser is a pure bytes -> record transform; path identity is
    // stamped here, after the decode succeeded
    let resource = resource_path(root, path);
    let route = RouteKey::normalize(&resource);
    page.resource_path = resource;

    output.pages.insert(route, page);
    Ok(())
}

fn load_module(root: &Path, path: &Path, output: &mut WalkOutput) -> Result<(), ContentError> {
    let raw = read_file(path)?;
    let mut module: Module = serde_json::from_str(&raw).map_err(|e| ContentError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let resource = resource_path(root, path);
    let route = RouteKey::normalize(&resource);
    module.resource_path = resource;
    module.name = route.final_segment().to_string();

    output.modules.insert(route, module);
    Ok(())
}

fn read_file(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Root-relative path with `/` separators (`<root>/guides/foo.toml` ->
/// `/guides/foo.toml`), the identity recorded on every parsed record.
fn resource_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut out = String::new();
    for component in relative.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}
