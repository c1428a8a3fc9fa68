//! Content resolution engine.
//!
//! One parse cycle runs walk -> index -> resolve -> sanitize -> publish:
//!
//! ```text
//! content/
//! ├── route      # RouteKey normalization
//! ├── page       # legacy flat-mapping records (+ inheritance merge)
//! ├── module     # new-generation nested records
//! ├── walker     # tree traversal, both route indexes
//! ├── resolver   # extension work queue
//! ├── model      # ContentModel build + queries
//! └── store      # published handle, atomic swap
//! ```

mod error;
mod model;
mod module;
mod page;
mod resolver;
mod route;
mod store;
mod walker;

pub use error::ContentError;
pub use model::{ContentModel, Record};
pub use module::Module;
pub use page::{Block, Function, Page, Property};
pub use route::RouteKey;
pub use store::{model, reload};

/// A JSON object map for storing arbitrary nested module fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
