use crate::error::FilterError;
use crate::query::Select;

/// Custom logic for a schema attribute that a single `column op value`
/// predicate cannot express.
///
/// The handler receives the statement built so far, the name it was
/// registered under, the attribute's value and the whole filter, so it can
/// look at sibling fields. Whatever it returns replaces the statement for the
/// remaining fields.
pub trait ManualFilter<F>: Send + Sync {
    type Value;

    fn apply(
        &self,
        stmt: Select,
        field: &str,
        value: &Self::Value,
        filter: &F,
    ) -> Result<Select, FilterError>;
}
