pub mod ast;
pub mod expr;

pub use ast::{Join, JoinKind, NullsOrder, OrderByExpr, Projection, Select, SortDirection};
pub use expr::{ComparisonOp, Expr, LogicalOp, Value};
