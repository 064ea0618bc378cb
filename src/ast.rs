//! Clause values held by the builder.
//!
//! Each type renders its own ShortSQL token through `Display`; the
//! transpiler only arranges tokens into segments.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::builder::ShortSql;
use crate::error::ShortSqlResult;

/// Separator between a name and its alias, a count and its offset, etc.
pub const PAIR_SEP: char = ':';
/// Separator between the parts of a condition.
pub const PART_SEP: char = '|';
/// Separator between conditions of a join or where segment.
pub const COND_SEP: &str = "||";
/// Marker appended to ordered fields that carry a direction.
pub const DIRECTION_MARKER: &str = "dir";

/// Empty strings count as "not given", same as a missing value.
pub(crate) fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// A projected field, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alias.as_deref().filter(|a| !a.is_empty()) {
            Some(alias) => write!(f, "{}{}{}", self.name, PAIR_SEP, alias),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Writes `(connector|)left|op|right`.
fn write_condition(
    f: &mut fmt::Formatter<'_>,
    connector: Option<&str>,
    parts: [&str; 3],
) -> fmt::Result {
    if let Some(conn) = connector.filter(|c| !c.is_empty()) {
        write!(f, "{}{}", conn, PART_SEP)?;
    }
    write!(
        f,
        "{}{}{}{}{}",
        parts[0], PART_SEP, parts[1], PART_SEP, parts[2]
    )
}

/// One ON condition of a join.
///
/// Unlike where conditions, join conditions never validate their
/// connector: the first one may carry a connector and later ones may omit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinCondition {
    pub left: String,
    pub op: String,
    pub right: String,
    #[serde(default)]
    pub connector: Option<String>,
}

impl JoinCondition {
    pub fn new(left: impl Into<String>, op: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            op: op.into(),
            right: right.into(),
            connector: None,
        }
    }

    /// Set the connector linking this condition to the previous one.
    pub fn connector(mut self, connector: impl Into<String>) -> Self {
        self.connector = Some(connector.into());
        self
    }
}

impl fmt::Display for JoinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_condition(
            f,
            self.connector.as_deref(),
            [&self.left, &self.op, &self.right],
        )
    }
}

/// A joined table with its ON conditions, in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    pub table: String,
    #[serde(default)]
    pub on: Vec<JoinCondition>,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)?;
        for cond in &self.on {
            write!(f, "{}{}", COND_SEP, cond)?;
        }
        Ok(())
    }
}

/// A where condition. Only the first condition of a chain has no connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhereCondition {
    pub field: String,
    pub op: String,
    pub value: String,
    #[serde(default)]
    pub connector: Option<String>,
}

impl fmt::Display for WhereCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_condition(
            f,
            self.connector.as_deref(),
            [&self.field, &self.op, &self.value],
        )
    }
}

/// An ordered field.
///
/// Any direction renders as the fixed `:dir` marker, not the direction
/// itself; consumers of the format expect exactly that token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    #[serde(default)]
    pub direction: Option<String>,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if self.direction.as_deref().is_some_and(|d| !d.is_empty()) {
            write!(f, "{}{}", PAIR_SEP, DIRECTION_MARKER)?;
        }
        Ok(())
    }
}

/// Row count with an optional offset. A zero offset is not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    pub count: u64,
    #[serde(default)]
    pub offset: Option<u64>,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset.filter(|o| *o != 0) {
            Some(offset) => write!(f, "{}{}{}", self.count, PAIR_SEP, offset),
            None => write!(f, "{}", self.count),
        }
    }
}

/// A whole query described as data, e.g. loaded from JSON or TOML.
///
/// ```
/// use shortsql::ast::Query;
///
/// let query: Query = serde_json::from_str(r#"{
///     "table": "users",
///     "fields": [{ "name": "id" }],
///     "where": [{ "field": "active", "op": "=", "value": "1" }]
/// }"#).unwrap();
/// assert_eq!(query.into_builder().unwrap().to_string(), "@users~[id~?active|=|1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub table: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub joins: Vec<Join>,
    #[serde(default, rename = "where")]
    pub wheres: Vec<WhereCondition>,
    #[serde(default)]
    pub order: Vec<OrderBy>,
    #[serde(default)]
    pub limit: Option<Limit>,
    #[serde(default)]
    pub group: Vec<String>,
}

impl Query {
    /// Replay the description through the builder's append operations.
    ///
    /// Where conditions go through `add_where`, so a malformed chain fails
    /// here exactly as it would when built by hand.
    pub fn into_builder(self) -> ShortSqlResult<ShortSql> {
        let mut sql = ShortSql::new(self.table);
        for field in self.fields {
            sql.add_field(field.name, field.alias.as_deref());
        }
        for join in self.joins {
            sql.add_join(join.table, join.on);
        }
        for cond in self.wheres {
            sql.add_where(
                cond.field,
                cond.op,
                cond.value,
                cond.connector.as_deref(),
            )?;
        }
        for order in self.order {
            sql.add_order(order.field, order.direction.as_deref());
        }
        if let Some(limit) = self.limit {
            sql.add_limit(limit.count, limit.offset);
        }
        for group in self.group {
            sql.add_group(group);
        }
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_tokens() {
        assert_eq!(Field::new("id").to_string(), "id");
        assert_eq!(Field::aliased("id", "ID").to_string(), "id:ID");
        assert_eq!(Field::aliased("id", "").to_string(), "id");
    }

    #[test]
    fn test_join_condition_connector_is_optional() {
        let first = JoinCondition::new("a.id", "=", "b.id");
        let later = JoinCondition::new("a.kind", "=", "x").connector("and");
        assert_eq!(first.to_string(), "a.id|=|b.id");
        assert_eq!(later.to_string(), "and|a.kind|=|x");
        // A leading connector is rendered, not rejected
        assert_eq!(first.connector("or").to_string(), "or|a.id|=|b.id");
    }

    #[test]
    fn test_join_without_conditions() {
        let join = Join {
            table: "geodata".to_string(),
            on: vec![],
        };
        assert_eq!(join.to_string(), "geodata");
    }

    #[test]
    fn test_order_uses_fixed_marker() {
        let asc = OrderBy {
            field: "name".to_string(),
            direction: None,
        };
        let desc = OrderBy {
            field: "name".to_string(),
            direction: Some("desc".to_string()),
        };
        assert_eq!(asc.to_string(), "name");
        assert_eq!(desc.to_string(), "name:dir");
    }

    #[test]
    fn test_limit_tokens() {
        assert_eq!(Limit { count: 10, offset: None }.to_string(), "10");
        assert_eq!(Limit { count: 0, offset: Some(10) }.to_string(), "0:10");
        assert_eq!(Limit { count: 10, offset: Some(0) }.to_string(), "10");
    }

    #[test]
    fn test_query_from_toml() {
        let query: Query = toml::from_str(
            r#"
            table = "manuscripts"
            group = ["cmcl"]

            [[fields]]
            name = "id"
            alias = "ID"

            [[where]]
            field = "cmclid"
            op = "like"
            value = "ciao"

            [limit]
            count = 5
            "#,
        )
        .unwrap();
        let sql = query.into_builder().unwrap();
        assert_eq!(sql.to_string(), "@manuscripts~[id:ID~?cmclid|like|ciao~-5~[cmcl");
    }

    #[test]
    fn test_query_rejects_bad_where_chain() {
        let query = Query {
            table: "t".to_string(),
            wheres: vec![WhereCondition {
                field: "a".to_string(),
                op: "=".to_string(),
                value: "1".to_string(),
                connector: Some("and".to_string()),
            }],
            ..Default::default()
        };
        assert!(query.into_builder().unwrap_err().is_sequence());
    }
}
