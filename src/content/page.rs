//! Legacy page record - flat mapping format, one file per route.
//!
//! A page either documents prose (guides, index pages) or an API type.
//! Type pages may extend another type; the extension resolver merges the
//! base type's inheritable members in before the model is published.
//!
//! # Standard Fields
//!
//! | Field          | Type             | Description                        |
//! |----------------|------------------|------------------------------------|
//! | `type`         | `String`         | API type documented by this page   |
//! | `extends`      | `String`         | Base type this type extends        |
//! | `title`        | `String`         | Page title (falls back to `type`)  |
//! | `description`  | `String`         | Short summary                      |
//! | `keywords`     | `Vec<String>`    | Search keywords                    |
//! | `creatable`    | `bool`           | Type can be instantiated           |
//! | `blocks`       | `Vec<Block>`     | Prose/sample content               |
//! | `constructors` | `Vec<Function>`  | Constructors (never inherited)     |
//! | `properties`   | `Vec<Property>`  | Inheritable members                |
//! | `functions`    | `Vec<Function>`  | Inheritable members                |
//! | `events`       | `Vec<Event>`     | Inheritable members                |

use serde::Deserialize;

/// One content block: prose text, a subtitle, or a code/media sample.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Block {
    pub text: String,
    pub subtitle: String,
    pub code: String,
    pub media: String,
}

impl Block {
    fn sanitize(&mut self) {
        trim_in_place(&mut self.text);
        trim_in_place(&mut self.subtitle);
        trim_in_place(&mut self.media);
        // Only trailing whitespace: leading indentation is significant in code
        let trimmed_len = self.code.trim_end().len();
        self.code.truncate(trimmed_len);
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty() && self.subtitle.is_empty() && self.code.is_empty() && self.media.is_empty()
    }
}

/// A documented property of a type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Property {
    pub name: String,
    /// Type of the property's value (links to the type's page when known).
    #[serde(rename = "type")]
    pub value_type: String,
    pub read_only: bool,
    pub description: String,
}

/// A documented function, method or constructor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Function {
    pub name: String,
    pub description: String,
    pub arguments: Vec<Argument>,
    pub returns: Vec<ReturnValue>,
    pub samples: Vec<Block>,
}

/// A named, typed function argument.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
}

/// A typed function return value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReturnValue {
    #[serde(rename = "type")]
    pub value_type: String,
    pub description: String,
}

/// A documented event a type can emit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Event {
    pub name: String,
    pub description: String,
}

/// Legacy page record, decoded from one flat-mapping content file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Normalized path the record is filed under. Stamped by the walker
    /// after a successful decode, immutable afterwards.
    #[serde(skip)]
    pub resource_path: String,

    /// API type documented by this page ("" for prose pages).
    #[serde(rename = "type")]
    pub type_name: String,

    /// Type this page's type extends ("" when there is no inheritance).
    pub extends: String,

    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub creatable: bool,

    pub blocks: Vec<Block>,
    pub constructors: Vec<Function>,
    pub properties: Vec<Property>,
    pub functions: Vec<Function>,
    pub events: Vec<Event>,

    /// True once the base type's members have been merged in. A page with
    /// a non-empty `extends` is unresolved until this is set; it stays
    /// false forever when the reference is dangling or cyclic.
    #[serde(skip)]
    pub extension_base_applied: bool,
}

/// Members copied forward from a finalized base page.
///
/// Cloned out of the base before the derived page is borrowed mutably,
/// so a merge never reads and writes the page map at the same time.
#[derive(Debug, Clone, Default)]
pub struct InheritedMembers {
    pub properties: Vec<Property>,
    pub functions: Vec<Function>,
    pub events: Vec<Event>,
}

impl Page {
    /// A page can serve as an extension base once it has nothing left to
    /// inherit itself: either it extends nothing, or its own base has
    /// already been merged in.
    #[inline]
    pub fn ready_as_base(&self) -> bool {
        self.extends.is_empty() || self.extension_base_applied
    }

    /// Clone the members a derived page may inherit.
    pub fn inheritable(&self) -> InheritedMembers {
        InheritedMembers {
            properties: self.properties.clone(),
            functions: self.functions.clone(),
            events: self.events.clone(),
        }
    }

    /// Merge a finalized base's members into this page.
    ///
    /// Members the page already declares (matched by name) are local
    /// overrides and win; everything else is appended in base order.
    /// Constructors are deliberately not inherited - constructing a
    /// derived type through the base's constructor is meaningless.
    pub fn merge_base(&mut self, base: InheritedMembers) {
        for property in base.properties {
            if !self.properties.iter().any(|p| p.name == property.name) {
                self.properties.push(property);
            }
        }
        for function in base.functions {
            if !self.functions.iter().any(|f| f.name == function.name) {
                self.functions.push(function);
            }
        }
        for event in base.events {
            if !self.events.iter().any(|e| e.name == event.name) {
                self.events.push(event);
            }
        }
        self.extension_base_applied = true;
    }

    /// Display title: `title`, falling back to `type`, then the path.
    pub fn display_title(&self) -> &str {
        if !self.title.is_empty() {
            &self.title
        } else if !self.type_name.is_empty() {
            &self.type_name
        } else {
            &self.resource_path
        }
    }

    /// Post-resolution normalization pass. Idempotent: live reload reruns
    /// the full cycle over already-clean data.
    pub fn sanitize(&mut self) {
        trim_in_place(&mut self.type_name);
        trim_in_place(&mut self.extends);
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.description);
        sanitize_keywords(&mut self.keywords);
        sanitize_blocks(&mut self.blocks);
        for ctor in &mut self.constructors {
            sanitize_function(ctor);
        }
        for property in &mut self.properties {
            trim_in_place(&mut property.name);
            trim_in_place(&mut property.value_type);
            trim_in_place(&mut property.description);
        }
        for function in &mut self.functions {
            sanitize_function(function);
        }
        for event in &mut self.events {
            trim_in_place(&mut event.name);
            trim_in_place(&mut event.description);
        }
    }
}

pub(super) fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

pub(super) fn sanitize_keywords(keywords: &mut Vec<String>) {
    for keyword in keywords.iter_mut() {
        trim_in_place(keyword);
    }
    keywords.retain(|k| !k.is_empty());
}

pub(super) fn sanitize_blocks(blocks: &mut Vec<Block>) {
    for block in blocks.iter_mut() {
        block.sanitize();
    }
    blocks.retain(|b| !b.is_empty());
}

fn sanitize_function(function: &mut Function) {
    trim_in_place(&mut function.name);
    trim_in_place(&mut function.description);
    for argument in &mut function.arguments {
        trim_in_place(&mut argument.name);
        trim_in_place(&mut argument.value_type);
    }
    for ret in &mut function.returns {
        trim_in_place(&mut ret.value_type);
        trim_in_place(&mut ret.description);
    }
    sanitize_blocks(&mut function.samples);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str) -> Property {
        Property {
            name: name.to_string(),
            value_type: "Number".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_page_deserialize() {
        let page: Page = toml::from_str(
            r#"
            type = "Player"
            extends = "Object"
            description = "A player avatar."
            keywords = ["player", "avatar"]
            creatable = true

            [[blocks]]
            text = "Players are driven by clients."

            [[properties]]
            name = "Head"
            type = "Shape"

            [[functions]]
            name = "Jump"
            description = "Makes the player jump."
            "#,
        )
        .unwrap();

        assert_eq!(page.type_name, "Player");
        assert_eq!(page.extends, "Object");
        assert!(page.creatable);
        assert_eq!(page.properties[0].name, "Head");
        assert_eq!(page.functions[0].name, "Jump");
        assert!(!page.extension_base_applied);
    }

    #[test]
    fn test_prose_page_defaults() {
        let page: Page = toml::from_str(r#"title = "Getting Started""#).unwrap();
        assert!(page.type_name.is_empty());
        assert!(page.extends.is_empty());
        assert!(page.ready_as_base());
    }

    #[test]
    fn test_ready_as_base() {
        let mut page = Page {
            extends: "Object".to_string(),
            ..Default::default()
        };
        assert!(!page.ready_as_base());
        page.extension_base_applied = true;
        assert!(page.ready_as_base());
    }

    #[test]
    fn test_merge_base_appends_missing_members() {
        let base = Page {
            properties: vec![property("Position"), property("Scale")],
            functions: vec![Function {
                name: "Destroy".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut derived = Page {
            properties: vec![property("Head")],
            ..Default::default()
        };

        derived.merge_base(base.inheritable());

        assert!(derived.extension_base_applied);
        let names: Vec<_> = derived.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Head", "Position", "Scale"]);
        assert_eq!(derived.functions.len(), 1);
    }

    #[test]
    fn test_merge_base_local_override_wins() {
        let base = Page {
            properties: vec![Property {
                name: "Position".to_string(),
                description: "base docs".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut derived = Page {
            properties: vec![Property {
                name: "Position".to_string(),
                description: "derived docs".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        derived.merge_base(base.inheritable());

        assert_eq!(derived.properties.len(), 1);
        assert_eq!(derived.properties[0].description, "derived docs");
    }

    #[test]
    fn test_merge_base_does_not_inherit_constructors() {
        let base = Page {
            constructors: vec![Function::default()],
            ..Default::default()
        };
        let mut derived = Page::default();
        derived.merge_base(base.inheritable());
        assert!(derived.constructors.is_empty());
    }

    #[test]
    fn test_sanitize_trims_and_drops_empties() {
        let mut page = Page {
            title: "  Player  ".to_string(),
            keywords: vec!["  player ".to_string(), "   ".to_string()],
            blocks: vec![
                Block {
                    text: " hello ".to_string(),
                    ..Default::default()
                },
                Block::default(),
            ],
            ..Default::default()
        };

        page.sanitize();

        assert_eq!(page.title, "Player");
        assert_eq!(page.keywords, ["player"]);
        assert_eq!(page.blocks.len(), 1);
        assert_eq!(page.blocks[0].text, "hello");
    }

    #[test]
    fn test_sanitize_idempotent() {
        let mut page = Page {
            title: "  Player  ".to_string(),
            description: "docs \n".to_string(),
            keywords: vec![" a ".to_string()],
            blocks: vec![Block {
                code: "let x = 1;\n  ".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        page.sanitize();
        let once = format!("{page:?}");
        page.sanitize();
        assert_eq!(once, format!("{page:?}"));
    }

    #[test]
    fn test_display_title_fallbacks() {
        let mut page = Page {
            resource_path: "/guides/intro.toml".to_string(),
            ..Default::default()
        };
        assert_eq!(page.display_title(), "/guides/intro.toml");
        page.type_name = "Player".to_string();
        assert_eq!(page.display_title(), "Player");
        page.title = "The Player".to_string();
        assert_eq!(page.display_title(), "The Player");
    }
}
