//! Minimal built-in HTML writer.
//!
//! Deliberately template-free: the presentation here is a thin readable
//! rendering of the resolved records. Type names hyperlink to the page
//! documenting them when the type index knows one, and fall back to a
//! local anchor otherwise.

use std::fmt::Write;

use crate::content::{Block, ContentModel, Function, Module, Page, Property};

pub fn render_page(page: &Page, model: &ContentModel) -> String {
    let mut out = String::with_capacity(1024);
    head(&mut out, page.display_title());

    let _ = writeln!(out, "<h1>{}</h1>", escape(page.display_title()));
    if !page.type_name.is_empty() {
        let _ = writeln!(out, "<p class=\"kind\">type <code id=\"type-{}\">{}</code>{}</p>",
            slugify(&page.type_name),
            escape(&page.type_name),
            if page.creatable { "" } else { " (not creatable)" },
        );
    }
    if !page.extends.is_empty() {
        let _ = writeln!(
            out,
            "<p class=\"extends\">extends {}</p>",
            type_link(&page.extends, model)
        );
    }
    if !page.description.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", escape(&page.description));
    }

    blocks(&mut out, &page.blocks);

    if !page.constructors.is_empty() {
        let _ = writeln!(out, "<h2>Constructors</h2>");
        for ctor in &page.constructors {
            function(&mut out, ctor, model);
        }
    }
    if !page.properties.is_empty() {
        let _ = writeln!(out, "<h2>Properties</h2>");
        for prop in &page.properties {
            property(&mut out, prop, model);
        }
    }
    if !page.functions.is_empty() {
        let _ = writeln!(out, "<h2>Functions</h2>");
        for func in &page.functions {
            function(&mut out, func, model);
        }
    }
    if !page.events.is_empty() {
        let _ = writeln!(out, "<h2>Events</h2>");
        for event in &page.events {
            let _ = writeln!(
                out,
                "<div class=\"event\"><h3>{}</h3><p>{}</p></div>",
                escape(&event.name),
                escape(&event.description)
            );
        }
    }

    foot(&mut out);
    out
}

pub fn render_module(module: &Module) -> String {
    let mut out = String::with_capacity(512);
    head(&mut out, &module.name);

    let _ = writeln!(out, "<h1>{}</h1>", escape(&module.name));
    if !module.description.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", escape(&module.description));
    }
    blocks(&mut out, &module.blocks);

    foot(&mut out);
    out
}

fn head(out: &mut String, title: &str) {
    let _ = writeln!(
        out,
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title>\
         <link rel=\"stylesheet\" href=\"/style/site.css\"></head><body>",
        escape(title)
    );
}

fn foot(out: &mut String) {
    out.push_str("</body></html>\n");
}

fn blocks(out: &mut String, blocks: &[Block]) {
    for block in blocks {
        if !block.subtitle.is_empty() {
            let _ = writeln!(out, "<h2>{}</h2>", escape(&block.subtitle));
        }
        if !block.text.is_empty() {
            let _ = writeln!(out, "<p>{}</p>", escape(&block.text));
        }
        if !block.code.is_empty() {
            let _ = writeln!(out, "<pre><code>{}</code></pre>", escape(&block.code));
        }
        if !block.media.is_empty() {
            let _ = writeln!(out, "<img src=\"{}\" alt=\"\">", escape(&block.media));
        }
    }
}

fn property(out: &mut String, prop: &Property, model: &ContentModel) {
    let _ = writeln!(
        out,
        "<div class=\"property\"><h3>{} {}{}</h3><p>{}</p></div>",
        type_link(&prop.value_type, model),
        escape(&prop.name),
        if prop.read_only { " <em>read-only</em>" } else { "" },
        escape(&prop.description)
    );
}

fn function(out: &mut String, func: &Function, model: &ContentModel) {
    let arguments = func
        .arguments
        .iter()
        .map(|a| format!("{} {}", type_link(&a.value_type, model), escape(&a.name)))
        .collect::<Vec<_>>()
        .join(", ");
    let returns = func
        .returns
        .iter()
        .map(|r| type_link(&r.value_type, model))
        .collect::<Vec<_>>()
        .join(", ");

    let _ = writeln!(
        out,
        "<div class=\"function\"><h3>{}({}){}</h3><p>{}</p></div>",
        escape(&func.name),
        arguments,
        if returns.is_empty() {
            String::new()
        } else {
            format!(" → {returns}")
        },
        escape(&func.description)
    );
    blocks(out, &func.samples);
}

/// Hyperlink for a type reference: the route documenting the type when
/// indexed, a local anchor otherwise.
fn type_link(type_name: &str, model: &ContentModel) -> String {
    let href = match model.route_for_type(type_name) {
        Some(route) => route.to_string(),
        None => format!("#type-{}", slugify(type_name)),
    };
    format!("<a href=\"{}\">{}</a>", escape(&href), escape(type_name))
}

/// Minimal HTML escaping for text nodes and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Anchor-safe slug: lowercase alphanumerics, everything else collapsed
/// to single dashes.
fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RouteKey;
    use std::collections::BTreeMap;

    fn model_with_type(type_name: &str, route: &str) -> ContentModel {
        let mut pages = BTreeMap::new();
        pages.insert(
            RouteKey::normalize(route),
            Page {
                type_name: type_name.to_string(),
                ..Default::default()
            },
        );
        let mut model = ContentModel {
            pages,
            ..Default::default()
        };
        model.type_routes.insert(
            type_name.to_string(),
            RouteKey::normalize(route),
        );
        model
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Number3"), "number3");
        assert_eq!(slugify("Key Value!"), "key-value");
    }

    #[test]
    fn test_type_link_known_type() {
        let model = model_with_type("Object", "/reference/object");
        let link = type_link("Object", &model);
        assert!(link.contains("href=\"/reference/object\""));
    }

    #[test]
    fn test_type_link_unknown_type_local_anchor() {
        let model = ContentModel::default();
        let link = type_link("Number3", &model);
        assert!(link.contains("href=\"#type-number3\""));
    }

    #[test]
    fn test_render_page_links_extends() {
        let model = model_with_type("Object", "/reference/object");
        let page = Page {
            type_name: "Player".to_string(),
            extends: "Object".to_string(),
            description: "A player avatar.".to_string(),
            ..Default::default()
        };

        let html = render_page(&page, &model);
        assert!(html.contains("<h1>Player</h1>"));
        assert!(html.contains("href=\"/reference/object\""));
        assert!(html.contains("A player avatar."));
    }

    #[test]
    fn test_render_module_uses_derived_name() {
        let module = Module {
            name: "sound".to_string(),
            description: "audio".to_string(),
            ..Default::default()
        };
        let html = render_module(&module);
        assert!(html.contains("<h1>sound</h1>"));
    }
}
