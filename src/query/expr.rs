use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use super::ast::{OrderByExpr, Select, SortDirection};
use crate::ast::Column;

/// Represents a single value that can be used in an expression
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    List(Vec<Value>),
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,  // =
    Neq, // !=
    Gt,  // >
    Gte, // >=
    Lt,  // <
    Lte, // <=
}

/// Logical operators to combine expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// A boolean / value expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(Column),
    Value(Value),
    /// lhs op rhs
    Compare {
        lhs: Box<Expr>,
        op: ComparisonOp,
        rhs: Box<Expr>,
    },
    /// expr [NOT] IN (v1, v2, ...)
    InList {
        expr: Box<Expr>,
        list: Vec<Value>,
        negated: bool,
    },
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// expr LIKE pattern, or ILIKE when case-insensitive
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        case_insensitive: bool,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
    /// N-ary AND / OR, never nested with the same operator
    Logical {
        op: LogicalOp,
        operands: Vec<Expr>,
    },
    Not(Box<Expr>),
    Exists(Box<Select>),
}

impl Expr {
    pub fn value(value: impl Into<Value>) -> Self {
        Expr::Value(value.into())
    }

    /// Combine with AND
    pub fn and(self, other: Expr) -> Self {
        Self::combine(LogicalOp::And, self, other)
    }

    /// Combine with OR
    pub fn or(self, other: Expr) -> Self {
        Self::combine(LogicalOp::Or, self, other)
    }

    pub fn not(self) -> Self {
        match self {
            Expr::Not(inner) => *inner,
            other => Expr::Not(Box::new(other)),
        }
    }

    pub fn exists(subquery: Select) -> Self {
        Expr::Exists(Box::new(subquery))
    }

    /// AND of every expression; `None` when there is nothing to combine
    pub fn and_all(exprs: impl IntoIterator<Item = Expr>) -> Option<Expr> {
        exprs.into_iter().reduce(Expr::and)
    }

    /// OR of every expression; `None` when there is nothing to combine
    pub fn or_all(exprs: impl IntoIterator<Item = Expr>) -> Option<Expr> {
        exprs.into_iter().reduce(Expr::or)
    }

    fn combine(op: LogicalOp, left: Expr, right: Expr) -> Self {
        let mut operands = Vec::new();
        for side in [left, right] {
            match side {
                Expr::Logical {
                    op: side_op,
                    operands: nested,
                } if side_op == op => operands.extend(nested),
                other => operands.push(other),
            }
        }
        Expr::Logical { op, operands }
    }

    fn compare(lhs: Expr, op: ComparisonOp, rhs: Expr) -> Self {
        Expr::Compare {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }
}

impl From<Column> for Expr {
    fn from(column: Column) -> Self {
        Expr::Column(column)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

/// Expression constructors on a column operand
impl Column {
    pub fn eq(self, value: impl Into<Value>) -> Expr {
        match value.into() {
            Value::Null => self.is_null(),
            value => Expr::compare(self.into(), ComparisonOp::Eq, value.into()),
        }
    }

    pub fn ne(self, value: impl Into<Value>) -> Expr {
        match value.into() {
            Value::Null => self.is_not_null(),
            value => Expr::compare(self.into(), ComparisonOp::Neq, value.into()),
        }
    }

    pub fn gt(self, value: impl Into<Value>) -> Expr {
        Expr::compare(self.into(), ComparisonOp::Gt, Expr::value(value))
    }

    pub fn ge(self, value: impl Into<Value>) -> Expr {
        Expr::compare(self.into(), ComparisonOp::Gte, Expr::value(value))
    }

    pub fn lt(self, value: impl Into<Value>) -> Expr {
        Expr::compare(self.into(), ComparisonOp::Lt, Expr::value(value))
    }

    pub fn le(self, value: impl Into<Value>) -> Expr {
        Expr::compare(self.into(), ComparisonOp::Lte, Expr::value(value))
    }

    /// column = other_column, used for join conditions
    pub fn eq_column(self, other: Column) -> Expr {
        Expr::compare(self.into(), ComparisonOp::Eq, other.into())
    }

    pub fn in_list<I, V>(self, values: I) -> Expr
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expr::InList {
            expr: Box::new(self.into()),
            list: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    pub fn not_in_list<I, V>(self, values: I) -> Expr
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expr::InList {
            expr: Box::new(self.into()),
            list: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    pub fn between(self, low: impl Into<Value>, high: impl Into<Value>) -> Expr {
        Expr::Between {
            expr: Box::new(self.into()),
            low: Box::new(Expr::value(low)),
            high: Box::new(Expr::value(high)),
        }
    }

    pub fn like(self, pattern: impl Into<String>) -> Expr {
        self.like_expr(pattern.into(), false)
    }

    pub fn ilike(self, pattern: impl Into<String>) -> Expr {
        self.like_expr(pattern.into(), true)
    }

    /// LIKE '%needle%' with wildcard characters in `needle` escaped
    pub fn contains(self, needle: &str) -> Expr {
        self.like_expr(format!("%{}%", escape_like(needle)), false)
    }

    /// ILIKE '%needle%'
    pub fn icontains(self, needle: &str) -> Expr {
        self.like_expr(format!("%{}%", escape_like(needle)), true)
    }

    pub fn is_null(self) -> Expr {
        Expr::IsNull {
            expr: Box::new(self.into()),
            negated: false,
        }
    }

    pub fn is_not_null(self) -> Expr {
        Expr::IsNull {
            expr: Box::new(self.into()),
            negated: true,
        }
    }

    pub fn asc(self) -> OrderByExpr {
        OrderByExpr::new(self.into(), SortDirection::Asc)
    }

    pub fn desc(self) -> OrderByExpr {
        OrderByExpr::new(self.into(), SortDirection::Desc)
    }

    fn like_expr(self, pattern: String, case_insensitive: bool) -> Expr {
        Expr::Like {
            expr: Box::new(self.into()),
            pattern: Box::new(Expr::Value(Value::String(pattern))),
            case_insensitive,
        }
    }
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

// ─── VALUE CONVERSIONS ───

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v.and_utc())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}
