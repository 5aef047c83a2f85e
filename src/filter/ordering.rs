use std::any::type_name;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::relationship::{apply_joins, RelationshipInfo};
use super::settable::Settable;
use super::validate_field_name;
use crate::ast::Column;
use crate::error::SchemaError;
use crate::query::{NullsOrder, OrderByExpr, Select, SortDirection};

/// Declarative ordering: `ORDER BY column <direction> [NULLS FIRST|LAST]`
/// after joining `relationship` and then each of `relationships`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingField {
    pub column: Column,
    pub relationship: Option<RelationshipInfo>,
    pub relationships: Vec<RelationshipInfo>,
    pub nulls: Option<NullsOrder>,
}

impl OrderingField {
    pub fn new(column: Column) -> Self {
        OrderingField {
            column,
            relationship: None,
            relationships: Vec::new(),
            nulls: None,
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

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }

    /// The ORDER BY term for `direction`
    pub fn order_by(&self, direction: SortDirection) -> OrderByExpr {
        OrderByExpr::new(self.column.into(), direction).nulls(self.nulls)
    }

    pub(crate) fn apply(&self, stmt: Select, direction: SortDirection) -> Select {
        apply_joins(stmt, &self.relationship, &self.relationships).order_by(self.order_by(direction))
    }
}

/// A sorter schema: a struct whose `Settable<SortDirection>` attributes map to
/// registered ordering fields.
pub trait Sorter: Sized + 'static {
    fn schema() -> &'static SorterSchema<Self>;

    /// Add ORDER BY terms in declaration order
    fn apply(&self, stmt: Select) -> Select {
        Self::schema().apply(self, stmt, &[])
    }

    /// Add ORDER BY terms for the `priority` fields first, then the rest in
    /// declaration order
    fn apply_with_priority(&self, stmt: Select, priority: &[&str]) -> Select {
        Self::schema().apply(self, stmt, priority)
    }
}

type Accessor<S> = Box<dyn Fn(&S) -> &Settable<SortDirection> + Send + Sync>;

struct SortBinding<S> {
    accessor: Accessor<S>,
    field: OrderingField,
}

/// The ordering fields of a sorter type, in declaration order
pub struct SorterSchema<S> {
    fields: IndexMap<String, SortBinding<S>>,
}

pub struct SorterSchemaBuilder<S> {
    fields: IndexMap<String, SortBinding<S>>,
    error: Option<SchemaError>,
}

impl<S: 'static> SorterSchema<S> {
    pub fn builder() -> SorterSchemaBuilder<S> {
        SorterSchemaBuilder {
            fields: IndexMap::new(),
            error: None,
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in processing order: known `priority` names first (each
    /// once), then every other field in declaration order.
    pub fn resolve_order<'a>(&'a self, priority: &[&str]) -> Vec<&'a str> {
        let mut order: Vec<&str> = Vec::with_capacity(self.fields.len());

        for name in priority {
            match self.fields.get_key_value(*name) {
                Some((key, _)) if !order.contains(&key.as_str()) => order.push(key),
                Some(_) => {}
                None => trace!(field = %name, "unknown priority field skipped"),
            }
        }
        for key in self.fields.keys() {
            if !order.contains(&key.as_str()) {
                order.push(key);
            }
        }

        order
    }

    pub fn apply(&self, sorter: &S, mut stmt: Select, priority: &[&str]) -> Select {
        debug!(sorter = type_name::<S>(), priority = ?priority, "applying sorter");

        for name in self.resolve_order(priority) {
            let Some(binding) = self.fields.get(name) else {
                continue;
            };
            if let Settable::Set(direction) = (binding.accessor)(sorter) {
                trace!(
                    field = %name,
                    column = %binding.field.column,
                    %direction,
                    "applied ordering field"
                );
                stmt = binding.field.apply(stmt, *direction);
            }
        }

        stmt
    }
}

impl<S: 'static> SorterSchemaBuilder<S> {
    /// Register an ordering field. The accessor must yield a
    /// `Settable<SortDirection>`, so ordering on any other attribute type is
    /// rejected by the compiler.
    pub fn field<A>(mut self, name: &str, accessor: A, field: OrderingField) -> Self
    where
        A: Fn(&S) -> &Settable<SortDirection> + Send + Sync + 'static,
    {
        if self.error.is_none() {
            match validate_field_name(name, self.fields.contains_key(name)) {
                Ok(()) => {
                    let binding = SortBinding {
                        accessor: Box::new(accessor),
                        field,
                    };
                    self.fields.insert(name.to_string(), binding);
                }
                Err(err) => self.error = Some(err),
            }
        }
        self
    }

    pub fn build(self) -> Result<SorterSchema<S>, SchemaError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(SorterSchema {
                fields: self.fields,
            }),
        }
    }
}
