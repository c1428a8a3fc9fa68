//! Extension resolution - merges inherited members across type pages.
//!
//! Pages declaring `extends` are processed through a FIFO work queue.
//! A page is merged only once its base is finalized, so multi-level
//! chains resolve bottom-up no matter what order the walk discovered
//! them in, and a merge never reads a half-resolved base.

use std::collections::{BTreeMap, VecDeque};

use rustc_hash::FxHashMap;

use super::page::Page;
use super::route::RouteKey;
use crate::{debug, log};

/// Resolve every extension chain in `pages`, in place.
///
/// Non-fatal outcomes, both logged:
/// - dangling reference (`extends` names an unindexed type): the page is
///   dropped from the queue and renders with only its local content;
/// - cycle: once a full queue rotation makes no progress, the remaining
///   pages are left unresolved instead of spinning forever.
pub fn resolve_extensions(
    pages: &mut BTreeMap<RouteKey, Page>,
    type_routes: &FxHashMap<String, RouteKey>,
) {
    let mut queue: VecDeque<RouteKey> = pages
        .iter()
        .filter(|(_, page)| !page.type_name.is_empty() && !page.extends.is_empty())
        .map(|(route, _)| route.clone())
        .collect();

    // Consecutive deferrals since the last successful merge. Exceeding the
    // queue length means every queued page was retried once without
    // progress, which only a cycle can cause.
    let mut stalled = 0usize;

    while let Some(route) = queue.pop_front() {
        let Some(extends) = pages.get(&route).map(|p| p.extends.clone()) else {
            continue;
        };

        let Some(base_route) = type_routes.get(&extends) else {
            log!(
                "resolve";
                "dangling extension: `{}` extends unknown type `{}`",
                route, extends
            );
            continue;
        };

        let base_ready = pages.get(base_route).is_some_and(Page::ready_as_base);
        if base_ready {
            let inherited = pages
                .get(base_route)
                .map(Page::inheritable)
                .unwrap_or_default();
            if let Some(page) = pages.get_mut(&route) {
                page.merge_base(inherited);
                debug!("resolve"; "`{}` inherited from `{}`", route, extends);
            }
            stalled = 0;
        } else {
            // Base is itself an unresolved extension; retry once it has
            // had a chance to resolve
            if stalled >= queue.len() + 1 {
                log!(
                    "resolve";
                    "extension cycle detected, {} page(s) left unresolved",
                    queue.len() + 1
                );
                break;
            }
            stalled += 1;
            queue.push_back(route);
        }
    }
}
