use std::fmt;

use super::naming::quote_ident;
use super::options::{Placeholder, RenderOptions};
use crate::ast::Column;
use crate::query::{
    ComparisonOp, Expr, JoinKind, LogicalOp, NullsOrder, OrderByExpr, Projection, Select,
    SortDirection, Value,
};

/// Result of generating SQL for a statement
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSql {
    pub sql: String,
    /// Bound values in placeholder order; empty when literals are inlined
    pub params: Vec<Value>,
}

/// Generate SQL for a statement.
///
/// Clauses are always emitted in the same order, so statements built with
/// the same operations compile to the same text whatever the call order.
pub fn generate_sql(select: &Select, options: &RenderOptions) -> GeneratedSql {
    let mut writer = SqlWriter {
        options,
        params: Vec::new(),
    };
    let sql = writer.select(select, options.pretty);

    GeneratedSql {
        sql,
        params: writer.params,
    }
}

/// Shorthand for literal, multi-line SQL
pub fn to_sql(select: &Select) -> String {
    generate_sql(select, &RenderOptions::default()).sql
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_sql(self))
    }
}

struct SqlWriter<'a> {
    options: &'a RenderOptions,
    params: Vec<Value>,
}

impl SqlWriter<'_> {
    fn select(&mut self, select: &Select, pretty: bool) -> String {
        let mut parts: Vec<String> = Vec::new();

        // SELECT
        let projection = match &select.projection {
            Projection::Columns(columns) => columns
                .iter()
                .map(|c| column(*c))
                .collect::<Vec<_>>()
                .join(", "),
            Projection::One => "1".to_string(),
        };
        parts.push(format!("SELECT {}", projection));

        // FROM
        parts.push(format!("FROM {}", quote_ident(select.from.name)));

        // JOINs
        for join in &select.joins {
            let keyword = match join.kind {
                JoinKind::Inner => "JOIN",
                JoinKind::LeftOuter => "LEFT OUTER JOIN",
                JoinKind::FullOuter => "FULL OUTER JOIN",
            };
            let on = self.expr(&join.on);
            parts.push(format!("{} {} ON {}", keyword, quote_ident(join.table.name), on));
        }

        // WHERE
        if let Some(clause) = select.where_clause() {
            let where_sql = self.expr(&clause);
            parts.push(format!("WHERE {}", where_sql));
        }

        // ORDER BY
        if !select.order_by.is_empty() {
            let terms: Vec<String> = select.order_by.iter().map(|t| self.order_term(t)).collect();
            parts.push(format!("ORDER BY {}", terms.join(", ")));
        }

        if let Some(limit) = select.limit {
            parts.push(format!("LIMIT {}", limit));
        }

        if let Some(offset) = select.offset {
            parts.push(format!("OFFSET {}", offset));
        }

        parts.join(if pretty { "\n" } else { " " })
    }

    fn order_term(&mut self, term: &OrderByExpr) -> String {
        let mut sql = self.operand(&term.expr);
        sql.push_str(match term.direction {
            SortDirection::Asc => " ASC",
            SortDirection::Desc => " DESC",
        });
        match term.nulls {
            Some(NullsOrder::First) => sql.push_str(" NULLS FIRST"),
            Some(NullsOrder::Last) => sql.push_str(" NULLS LAST"),
            None => {}
        }
        sql
    }

    fn expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Column(c) => column(*c),
            Expr::Value(value) => self.value(value),
            Expr::Compare { lhs, op, rhs } => {
                let op_sql = match op {
                    ComparisonOp::Eq => "=",
                    ComparisonOp::Neq => "!=",
                    ComparisonOp::Gt => ">",
                    ComparisonOp::Gte => ">=",
                    ComparisonOp::Lt => "<",
                    ComparisonOp::Lte => "<=",
                };
                let lhs_sql = self.operand(lhs);
                let rhs_sql = self.operand(rhs);
                format!("{} {} {}", lhs_sql, op_sql, rhs_sql)
            }
            Expr::InList { expr, list, negated } => {
                // Nothing can be IN an empty list
                if list.is_empty() {
                    let always = if *negated { "1 = 1" } else { "1 != 1" };
                    return always.to_string();
                }
                let expr_sql = self.operand(expr);
                let values: Vec<String> = list.iter().map(|v| self.value(v)).collect();
                let keyword = if *negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", expr_sql, keyword, values.join(", "))
            }
            Expr::Between { expr, low, high } => {
                let expr_sql = self.operand(expr);
                let low_sql = self.operand(low);
                let high_sql = self.operand(high);
                format!("{} BETWEEN {} AND {}", expr_sql, low_sql, high_sql)
            }
            Expr::Like {
                expr,
                pattern,
                case_insensitive,
            } => {
                let expr_sql = self.operand(expr);
                let pattern_sql = self.operand(pattern);
                let keyword = if *case_insensitive { "ILIKE" } else { "LIKE" };
                format!("{} {} {}", expr_sql, keyword, pattern_sql)
            }
            Expr::IsNull { expr, negated } => {
                let expr_sql = self.operand(expr);
                let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
                format!("{} {}", expr_sql, keyword)
            }
            Expr::Logical { op, operands } => {
                let op_sql = match op {
                    LogicalOp::And => " AND ",
                    LogicalOp::Or => " OR ",
                };
                let parts: Vec<String> = operands.iter().map(|o| self.operand(o)).collect();
                parts.join(op_sql)
            }
            Expr::Not(inner) => match inner.as_ref() {
                Expr::Exists(_) => format!("NOT {}", self.expr(inner)),
                other => format!("NOT ({})", self.expr(other)),
            },
            Expr::Exists(subquery) => format!("EXISTS ({})", self.select(subquery, false)),
        }
    }

    /// An expression nested in another one; AND/OR groups get parenthesised
    fn operand(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Logical { .. } => format!("({})", self.expr(expr)),
            _ => self.expr(expr),
        }
    }

    fn value(&mut self, value: &Value) -> String {
        if let Value::List(items) = value {
            let rendered: Vec<String> = items.iter().map(|v| self.value(v)).collect();
            return format!("({})", rendered.join(", "));
        }

        if self.options.inline_literals {
            return literal(value);
        }

        self.params.push(value.clone());
        match self.options.placeholder {
            Placeholder::Dollar => format!("${}", self.params.len()),
            Placeholder::QuestionMark => "?".to_string(),
        }
    }
}

fn column(c: Column) -> String {
    format!("{}.{}", quote_ident(c.table), quote_ident(c.name))
}

/// Convert a Value to a SQL literal
fn literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => float_literal(*f),
        Value::String(s) => quote_string(s),
        Value::Uuid(u) => quote_string(&u.to_string()),
        Value::Timestamp(ts) => quote_string(&ts.format("%Y-%m-%d %H:%M:%S%.6f%:z").to_string()),
        Value::List(items) => {
            let rendered: Vec<String> = items.iter().map(literal).collect();
            format!("({})", rendered.join(", "))
        }
    }
}

/// PostgreSQL spells non-finite floats as quoted, cast strings
fn float_literal(f: f64) -> String {
    if f.is_nan() {
        "'NaN'::float8".to_string()
    } else if f.is_infinite() {
        let sign = if f.is_sign_negative() { "-" } else { "" };
        format!("'{}Infinity'::float8", sign)
    } else {
        f.to_string()
    }
}

fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
