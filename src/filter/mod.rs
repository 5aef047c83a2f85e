//! Declarative filter and sorter schemas.
//!
//! A schema is a plain struct whose attributes are `Settable` values, plus a
//! `FilterSchema` (or `SorterSchema`) built once per type that maps attribute
//! names to fields. Applying an instance walks the registered fields, skips
//! the unset ones and extends a `Select` with joins, WHERE terms and ORDER BY
//! terms.

pub mod base;
pub mod field;
pub mod manual;
pub mod ops;
pub mod ordering;
pub mod relationship;
pub mod settable;

pub use base::{Filter, FilterSchema, FilterSchemaBuilder};
pub use field::{FilterField, Operator};
pub use manual::ManualFilter;
pub use ordering::{OrderingField, Sorter, SorterSchema, SorterSchemaBuilder};
pub use relationship::RelationshipInfo;
pub use settable::Settable;

use crate::error::SchemaError;
use crate::sql::naming::is_field_name;

/// Check a name about to be registered in a schema
fn validate_field_name(name: &str, already_registered: bool) -> Result<(), SchemaError> {
    if !is_field_name(name) {
        return Err(SchemaError::InvalidFieldName(name.to_string()));
    }
    if already_registered {
        return Err(SchemaError::DuplicateField(name.to_string()));
    }
    Ok(())
}
