pub mod ast;
pub mod error;
pub mod filter;
pub mod query;
pub mod sql;

pub use ast::{Column, Relation, RelationKind, Table};
pub use error::{FilterError, SchemaError};
pub use filter::{
    FilterField, Filter, FilterSchema, ManualFilter, OrderingField, RelationshipInfo, Settable,
    Sorter, SorterSchema,
};
pub use query::{Expr, Select, SortDirection, Value};
pub use sql::{generate_sql, to_sql, RenderOptions};
