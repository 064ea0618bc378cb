//! ShortSQL rendering.
//!
//! Segments are emitted in a fixed order, whatever order the clauses were
//! added in:
//!
//! ```text
//! @table ~ +join... ~ [fields ~ ?where ~ >order... ~ -limit ~ [group
//! ```
//!
//! Fields and group share the `[` sigil. A reader tells them apart by
//! position: the group segment is always last, after any limit.

use std::fmt;

use crate::builder::ShortSql;
use crate::encode;

/// Separator between segments.
pub const SEGMENT_SEP: char = '~';
/// Separator between items of a list segment.
pub const LIST_SEP: char = ',';

/// The clause a segment carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Table,
    Join,
    Fields,
    Where,
    Order,
    Limit,
    Group,
}

impl SegmentKind {
    /// Leading character of the segment.
    pub fn sigil(self) -> char {
        match self {
            SegmentKind::Table => '@',
            SegmentKind::Join => '+',
            SegmentKind::Fields | SegmentKind::Group => '[',
            SegmentKind::Where => '?',
            SegmentKind::Order => '>',
            SegmentKind::Limit => '-',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SegmentKind::Table => "table",
            SegmentKind::Join => "join",
            SegmentKind::Fields => "fields",
            SegmentKind::Where => "where",
            SegmentKind::Order => "order",
            SegmentKind::Limit => "limit",
            SegmentKind::Group => "group",
        }
    }
}

/// One `~`-delimited chunk of a ShortSQL string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub body: String,
}

impl Segment {
    fn new(kind: SegmentKind, body: String) -> Self {
        Self { kind, body }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.sigil(), self.body)
    }
}

fn join_tokens<T: ToString>(items: &[T], sep: &str) -> String {
    items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(sep)
}

/// Trait for rendering a query to ShortSQL.
pub trait ToShortSql {
    /// Render the plain ShortSQL string.
    fn to_short_sql(&self) -> String;

    /// Render and percent-encode for use in a URL.
    fn to_short_sql_url_safe(&self) -> String {
        encode::encode(&self.to_short_sql())
    }
}

impl ShortSql {
    /// The segments this query renders to, in output order.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = vec![Segment::new(SegmentKind::Table, self.table().to_string())];

        // One segment per join
        for join in self.joins() {
            segments.push(Segment::new(SegmentKind::Join, join.to_string()));
        }

        if !self.fields().is_empty() {
            let body = join_tokens(self.fields(), &LIST_SEP.to_string());
            segments.push(Segment::new(SegmentKind::Fields, body));
        }

        if !self.wheres().is_empty() {
            let body = join_tokens(self.wheres(), crate::ast::COND_SEP);
            segments.push(Segment::new(SegmentKind::Where, body));
        }

        // One segment per ordered field
        for order in self.orders() {
            segments.push(Segment::new(SegmentKind::Order, order.to_string()));
        }

        if let Some(limit) = self.limit() {
            segments.push(Segment::new(SegmentKind::Limit, limit.to_string()));
        }

        if !self.groups().is_empty() {
            let body = join_tokens(self.groups(), &LIST_SEP.to_string());
            segments.push(Segment::new(SegmentKind::Group, body));
        }

        segments
    }

    /// Render the query, percent-encoded when `url_safe` is set.
    pub fn render(&self, url_safe: bool) -> String {
        let sql = self.to_short_sql();
        tracing::debug!(table = %self.table(), url_safe, "render");
        if url_safe { encode::encode(&sql) } else { sql }
    }
}

impl ToShortSql for ShortSql {
    fn to_short_sql(&self) -> String {
        join_tokens(&self.segments(), &SEGMENT_SEP.to_string())
    }
}

impl fmt::Display for ShortSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_short_sql())
    }
}
