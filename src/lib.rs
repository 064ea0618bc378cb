//! # ShortSQL
//!
//! > **A whole query in one URL parameter.**
//!
//! ShortSQL packs a relational query description (table, fields, joins,
//! filters, ordering, limit, grouping) into a compact, delimiter-based string,
//! with an optional percent-encoded form for URLs.
//!
//! ## Quick Example
//!
//! ```
//! use shortsql::prelude::*;
//!
//! let mut sql = ShortSql::new("manuscripts");
//! sql.add_field("id", Some("ID"))
//!     .add_order("cmclid", None)
//!     .add_limit(0, Some(10));
//! sql.add_where("cmclid", "like", "ciao", None)?;
//!
//! assert_eq!(sql.render(false), "@manuscripts~[id:ID~?cmclid|like|ciao~>cmclid~-0:10");
//! # Ok::<(), ShortSqlError>(())
//! ```
//!
//! ## Symbology
//!
//! | Symbol | Segment  | Content                              |
//! |--------|----------|--------------------------------------|
//! | `@`    | Table    | Target table                         |
//! | `+`    | Join     | `table\|\|cond\|\|cond`, one per join |
//! | `[`    | Fields   | `name:alias,name`                    |
//! | `?`    | Where    | `field\|op\|value\|\|conn\|field...` |
//! | `>`    | Order    | `field` or `field:dir`, one per field |
//! | `-`    | Limit    | `count` or `count:offset`            |
//! | `[`    | Group    | `field,field` (always last)          |
//! | `~`    | Split    | Separates segments                   |

pub mod ast;
pub mod builder;
pub mod config;
pub mod encode;
pub mod error;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::builder::ShortSql;
    pub use crate::error::*;
    pub use crate::transpiler::{Segment, SegmentKind, ToShortSql};
}

/// Build a [`ShortSql`](builder::ShortSql) from a JSON query description.
///
/// # Example
///
/// ```
/// let sql = shortsql::from_json(r#"{"table": "users", "group": ["role"]}"#).unwrap();
/// assert_eq!(sql.to_string(), "@users~[role");
/// ```
pub fn from_json(input: &str) -> Result<builder::ShortSql, error::ShortSqlError> {
    let query: ast::Query = serde_json::from_str(input)?;
    query.into_builder()
}

/// Build a [`ShortSql`](builder::ShortSql) from a TOML query description.
pub fn from_toml(input: &str) -> Result<builder::ShortSql, error::ShortSqlError> {
    let query: ast::Query = toml::from_str(input)?;
    query.into_builder()
}
