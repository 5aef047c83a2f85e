pub mod generator;
pub mod naming;
pub mod options;

pub use generator::{generate_sql, to_sql, GeneratedSql};
pub use options::{Placeholder, RenderOptions};
