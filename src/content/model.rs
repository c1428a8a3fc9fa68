//! The published content model - one full parse cycle's output.

use std::collections::BTreeMap;
use std::path::Path;

use rustc_hash::FxHashMap;

use super::error::ContentError;
use super::module::Module;
use super::page::Page;
use super::resolver::resolve_extensions;
use super::route::RouteKey;
use super::walker::{WalkOutput, walk_content};
use crate::log;

/// Complete, immutable content model: both route indexes plus the type
/// index. Rebuilt from nothing on every parse cycle and swapped in whole;
/// never mutated while published.
#[derive(Debug, Default)]
pub struct ContentModel {
    pub pages: BTreeMap<RouteKey, Page>,
    pub modules: BTreeMap<RouteKey, Module>,
    /// Declared type name -> route of the legacy page documenting it.
    pub type_routes: FxHashMap<String, RouteKey>,
}

/// A record found at a route, either generation.
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    Page(&'a Page),
    Module(&'a Module),
}

impl ContentModel {
    /// Run one full parse cycle: walk, index, resolve, sanitize.
    ///
    /// Strictly sequential; the resolver's ordering guarantees depend on
    /// the type index being complete before resolution starts.
    pub fn build(root: &Path) -> Result<Self, ContentError> {
        let WalkOutput {
            mut pages,
            mut modules,
        } = walk_content(root)?;

        let type_routes = build_type_routes(&pages);
        resolve_extensions(&mut pages, &type_routes);

        for page in pages.values_mut() {
            page.sanitize();
        }
        for module in modules.values_mut() {
            module.sanitize();
        }

        Ok(Self {
            pages,
            modules,
            type_routes,
        })
    }

    /// Look up the record published at a route. Legacy pages shadow
    /// modules on the rare route defined in both generations.
    pub fn resolve(&self, route: &str) -> Option<Record<'_>> {
        if let Some(page) = self.pages.get(route) {
            return Some(Record::Page(page));
        }
        self.modules.get(route).map(Record::Module)
    }

    /// Route of the page documenting `type_name`, if any.
    pub fn route_for_type(&self, type_name: &str) -> Option<&RouteKey> {
        self.type_routes.get(type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.modules.is_empty()
    }
}

/// Build the type index: every page with a non-empty `type` claims its
/// name. Always succeeds; a duplicate declaration overwrites the earlier
/// one (last write wins) with a logged warning.
pub(crate) fn build_type_routes(pages: &BTreeMap<RouteKey, Page>) -> FxHashMap<String, RouteKey> {
    let mut type_routes = FxHashMap::default();
    for (route, page) in pages {
        if page.type_name.is_empty() {
            continue;
        }
        if let Some(previous) = type_routes.insert(page.type_name.clone(), route.clone()) {
            log!(
                "index";
                "type `{}` declared at both `{}` and `{}`, keeping the latter",
                page.type_name, previous, route
            );
        }
    }
    type_routes
}
