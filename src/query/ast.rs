use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::expr::Expr;
use crate::ast::{Column, Relation, Table};
use crate::error::ParseSortDirectionError;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Where NULLs land relative to other values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullsOrder {
    First,
    Last,
}

/// A single ORDER BY term
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: SortDirection,
    pub nulls: Option<NullsOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    FullOuter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: Table,
    pub on: Expr,
    pub kind: JoinKind,
}

/// What the statement selects
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Columns(Vec<Column>),
    /// `SELECT 1`, for existence probes
    One,
}

/// A SELECT statement.
///
/// Every builder method consumes the statement and returns the extended one;
/// clone first to keep the original around.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub projection: Projection,
    pub from: Table,
    pub joins: Vec<Join>,
    /// Conjunctive WHERE terms, AND-ed on output
    pub where_terms: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Select {
    /// SELECT every column of `table`
    pub fn new(table: Table) -> Self {
        Select {
            projection: Projection::Columns(table.all_columns().collect()),
            from: table,
            joins: Vec::new(),
            where_terms: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// SELECT 1 FROM `table`
    pub fn one(table: Table) -> Self {
        Select {
            projection: Projection::One,
            ..Select::new(table)
        }
    }

    /// Add a WHERE term (AND-ed with the existing ones)
    pub fn filter(mut self, expr: Expr) -> Self {
        self.where_terms.push(expr);
        self
    }

    /// Join `table` on `on`. A join identical to one already present is skipped.
    pub fn join(mut self, table: Table, on: Expr, kind: JoinKind) -> Self {
        self.push_join(Join { table, on, kind });
        self
    }

    /// Join along a relation. An explicit `onclause` joins the target table
    /// directly instead of using the relation's own condition(s).
    pub fn join_relation(mut self, relation: &Relation, onclause: Option<Expr>, kind: JoinKind) -> Self {
        match onclause {
            Some(on) => self.push_join(Join {
                table: relation.target,
                on,
                kind,
            }),
            None => {
                for join in relation.joins(kind) {
                    self.push_join(join);
                }
            }
        }
        self
    }

    /// Add an ORDER BY term
    pub fn order_by(mut self, term: OrderByExpr) -> Self {
        self.order_by.push(term);
        self
    }

    /// Set limit
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set offset
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// The whole WHERE clause as one expression
    pub fn where_clause(&self) -> Option<Expr> {
        Expr::and_all(self.where_terms.iter().cloned())
    }

    pub fn with_where_terms(mut self, terms: Vec<Expr>) -> Self {
        self.where_terms = terms;
        self
    }

    fn push_join(&mut self, join: Join) {
        if !self.joins.contains(&join) {
            self.joins.push(join);
        }
    }
}

impl OrderByExpr {
    pub fn new(expr: Expr, direction: SortDirection) -> Self {
        OrderByExpr {
            expr,
            direction,
            nulls: None,
        }
    }

    pub fn nulls(mut self, nulls: Option<NullsOrder>) -> Self {
        self.nulls = nulls;
        self
    }

    pub fn nulls_first(self) -> Self {
        self.nulls(Some(NullsOrder::First))
    }

    pub fn nulls_last(self) -> Self {
        self.nulls(Some(NullsOrder::Last))
    }
}

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ParseSortDirectionError(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}
