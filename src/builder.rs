//! The ShortSQL builder.
//!
//! An append-only accumulator for one query. Nothing is rendered until
//! [`ShortSql::render`] (or [`ToShortSql`](crate::transpiler::ToShortSql)) is
//! called, and rendering never changes the builder.

use crate::ast::{Field, Join, JoinCondition, Limit, OrderBy, WhereCondition, present};
use crate::error::{SequenceError, ShortSqlResult};

/// A query under construction.
///
/// # Example
///
/// ```
/// use shortsql::prelude::*;
///
/// let mut sql = ShortSql::new("users");
/// sql.add_field("id", None)
///     .add_field("email", Some("mail"))
///     .add_limit(10, None);
/// sql.add_where("active", "=", "1", None)?;
///
/// assert_eq!(sql.render(false), "@users~[id,email:mail~?active|=|1~-10");
/// # Ok::<(), ShortSqlError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortSql {
    table: String,
    fields: Vec<Field>,
    joins: Vec<Join>,
    wheres: Vec<WhereCondition>,
    orders: Vec<OrderBy>,
    limit: Option<Limit>,
    groups: Vec<String>,
}

impl ShortSql {
    /// Start a query on `table`. The name is stored verbatim.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            fields: vec![],
            joins: vec![],
            wheres: vec![],
            orders: vec![],
            limit: None,
            groups: vec![],
        }
    }

    /// Project a field, optionally under an alias. Duplicates are kept.
    pub fn add_field(&mut self, name: impl Into<String>, alias: Option<&str>) -> &mut Self {
        let field = Field {
            name: name.into(),
            alias: present(alias),
        };
        tracing::trace!(field = %field, "add field");
        self.fields.push(field);
        self
    }

    /// Join `table` on the given conditions, rendered in order.
    ///
    /// Connectors are not checked here: any condition may carry one or not.
    pub fn add_join(
        &mut self,
        table: impl Into<String>,
        conditions: impl IntoIterator<Item = JoinCondition>,
    ) -> &mut Self {
        let join = Join {
            table: table.into(),
            on: conditions.into_iter().collect(),
        };
        tracing::trace!(join = %join, "add join");
        self.joins.push(join);
        self
    }

    /// Append a where condition.
    ///
    /// The first condition must not have a connector and every later one
    /// must. On violation nothing is appended.
    pub fn add_where(
        &mut self,
        field: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<String>,
        connector: Option<&str>,
    ) -> ShortSqlResult<&mut Self> {
        let connector = present(connector);
        match (self.wheres.is_empty(), connector.as_ref()) {
            (true, Some(conn)) => {
                tracing::debug!(connector = %conn, "rejected connector on first where condition");
                return Err(SequenceError::UnexpectedConnector {
                    connector: conn.clone(),
                }
                .into());
            }
            (false, None) => {
                let index = self.wheres.len();
                tracing::debug!(index, "rejected where condition without connector");
                return Err(SequenceError::MissingConnector { index }.into());
            }
            _ => {}
        }

        let cond = WhereCondition {
            field: field.into(),
            op: op.into(),
            value: value.into(),
            connector,
        };
        tracing::trace!(condition = %cond, "add where");
        self.wheres.push(cond);
        Ok(self)
    }

    /// Order by `field`. Any direction renders as the `:dir` marker.
    pub fn add_order(&mut self, field: impl Into<String>, direction: Option<&str>) -> &mut Self {
        let order = OrderBy {
            field: field.into(),
            direction: present(direction),
        };
        tracing::trace!(order = %order, "add order");
        self.orders.push(order);
        self
    }

    /// Set the limit, replacing any previous one.
    pub fn add_limit(&mut self, count: u64, offset: Option<u64>) -> &mut Self {
        let limit = Limit { count, offset };
        tracing::trace!(limit = %limit, "set limit");
        self.limit = Some(limit);
        self
    }

    /// Group by `field`.
    pub fn add_group(&mut self, field: impl Into<String>) -> &mut Self {
        let field = field.into();
        tracing::trace!(field = %field, "add group");
        self.groups.push(field);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn wheres(&self) -> &[WhereCondition] {
        &self.wheres
    }

    pub fn orders(&self) -> &[OrderBy] {
        &self.orders
    }

    pub fn limit(&self) -> Option<&Limit> {
        self.limit.as_ref()
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShortSqlError;

    #[test]
    fn test_new_is_empty() {
        let sql = ShortSql::new("users");
        assert_eq!(sql.table(), "users");
        assert!(sql.fields().is_empty());
        assert!(sql.joins().is_empty());
        assert!(sql.wheres().is_empty());
        assert!(sql.orders().is_empty());
        assert!(sql.limit().is_none());
        assert!(sql.groups().is_empty());
    }

    #[test]
    fn test_first_where_rejects_connector() {
        let mut sql = ShortSql::new("users");
        let err = sql.add_where("id", "=", "1", Some("and")).unwrap_err();
        assert!(matches!(
            err,
            ShortSqlError::Sequence(SequenceError::UnexpectedConnector { ref connector })
                if connector == "and"
        ));
        assert!(sql.wheres().is_empty());
    }

    #[test]
    fn test_later_where_requires_connector() {
        let mut sql = ShortSql::new("users");
        sql.add_where("id", "=", "1", None).unwrap();
        let err = sql.add_where("id", "=", "2", None).unwrap_err();
        assert!(matches!(
            err,
            ShortSqlError::Sequence(SequenceError::MissingConnector { index: 1 })
        ));
        assert_eq!(sql.wheres().len(), 1);

        sql.add_where("id", "=", "2", Some("or")).unwrap();
        assert_eq!(sql.wheres().len(), 2);
    }

    #[test]
    fn test_empty_connector_counts_as_missing() {
        let mut sql = ShortSql::new("users");
        sql.add_where("id", "=", "1", Some("")).unwrap();
        assert!(sql.add_where("id", "=", "2", Some("")).is_err());
        assert_eq!(sql.wheres()[0].connector, None);
    }

    #[test]
    fn test_limit_overwrites() {
        let mut sql = ShortSql::new("users");
        sql.add_limit(10, None).add_limit(5, Some(20));
        assert_eq!(sql.limit(), Some(&Limit { count: 5, offset: Some(20) }));
    }

    #[test]
    fn test_duplicate_fields_kept_in_order() {
        let mut sql = ShortSql::new("users");
        sql.add_field("id", None)
            .add_field("id", Some("ID"))
            .add_field("email", None);
        let names: Vec<String> = sql.fields().iter().map(|f| f.to_string()).collect();
        assert_eq!(names, vec!["id", "id:ID", "email"]);
    }
}
