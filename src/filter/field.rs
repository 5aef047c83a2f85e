use std::fmt;

use super::relationship::{apply_joins, RelationshipInfo};
use crate::ast::Column;
use crate::query::{Expr, Select};

/// Builds a predicate from the target column and the supplied value
pub type Operator<T> = Box<dyn Fn(Column, &T) -> Expr + Send + Sync>;

/// Declarative filter: `<operator>(column, value)` after joining `relationship`
/// and then each of `relationships`.
pub struct FilterField<T> {
    pub column: Column,
    operator: Operator<T>,
    /// For filtering by a related table's column
    pub relationship: Option<RelationshipInfo>,
    /// For filtering through several hops
    pub relationships: Vec<RelationshipInfo>,
}

impl<T> FilterField<T> {
    pub fn new<O>(column: Column, operator: O) -> Self
    where
        O: Fn(Column, &T) -> Expr + Send + Sync + 'static,
    {
        FilterField {
            column,
            operator: Box::new(operator),
            relationship: None,
            relationships: Vec::new(),
        }
    }

    pub fn relationship(mut self, relationship: RelationshipInfo) -> Self {
        self.relationship = Some(relationship);
        self
    }

    pub fn relationships(mut self, relationships: impl IntoIterator<Item = RelationshipInfo>) -> Self {
        self.relationships = relationships.into_iter().collect();
        self
    }

    /// The predicate this field adds for `value`
    pub fn predicate(&self, value: &T) -> Expr {
        (self.operator)(self.column, value)
    }

    pub(crate) fn apply(&self, stmt: Select, value: &T) -> Select {
        let predicate = self.predicate(value);
        apply_joins(stmt, &self.relationship, &self.relationships).filter(predicate)
    }
}

impl<T> fmt::Debug for FilterField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterField")
            .field("column", &self.column)
            .field("relationship", &self.relationship)
            .field("relationships", &self.relationships)
            .finish_non_exhaustive()
    }
}
