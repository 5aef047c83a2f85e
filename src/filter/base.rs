use std::any::type_name;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::field::FilterField;
use super::manual::ManualFilter;
use super::settable::Settable;
use super::validate_field_name;
use crate::error::{FilterError, SchemaError};
use crate::query::{Expr, Join, JoinKind, Select};

/// A filter schema: a struct whose `Settable` attributes map to registered
/// fields.
///
/// ```ignore
/// impl Filter for BookFilter {
///     fn schema() -> &'static FilterSchema<Self> {
///         &BOOK_FILTER_SCHEMA
///     }
/// }
/// ```
pub trait Filter: Sized + 'static {
    fn schema() -> &'static FilterSchema<Self>;

    /// Alternative branch OR-ed with this one. Only filters that carry an
    /// `or_` attribute override this.
    fn or_filter(&self) -> Option<&Self> {
        None
    }

    /// Add the joins and WHERE terms of every supplied field to `stmt`
    fn apply(&self, stmt: Select) -> Result<Select, FilterError> {
        Self::schema().apply(self, stmt)
    }
}

/// Type-erased view of a registered field, bound to its accessor
trait BoundField<F>: Send + Sync {
    fn is_set(&self, filter: &F) -> bool;

    /// Leaves `stmt` untouched when the attribute is unset
    fn apply(&self, stmt: Select, filter: &F) -> Select;
}

trait BoundManual<F>: Send + Sync {
    fn is_set(&self, filter: &F) -> bool;

    fn apply(&self, stmt: Select, filter: &F) -> Result<Select, FilterError>;
}

struct FieldBinding<A, T> {
    accessor: A,
    field: FilterField<T>,
}

struct ManualBinding<A, H> {
    name: String,
    accessor: A,
    handler: H,
}

impl<F, A, T> BoundField<F> for FieldBinding<A, T>
where
    A: Fn(&F) -> &Settable<T> + Send + Sync,
{
    fn is_set(&self, filter: &F) -> bool {
        (self.accessor)(filter).is_set()
    }

    fn apply(&self, stmt: Select, filter: &F) -> Select {
        match (self.accessor)(filter) {
            Settable::Set(value) => self.field.apply(stmt, value),
            Settable::Unset => stmt,
        }
    }
}

impl<F, A, H> BoundManual<F> for ManualBinding<A, H>
where
    H: ManualFilter<F>,
    A: Fn(&F) -> &Settable<H::Value> + Send + Sync,
{
    fn is_set(&self, filter: &F) -> bool {
        (self.accessor)(filter).is_set()
    }

    fn apply(&self, stmt: Select, filter: &F) -> Result<Select, FilterError> {
        match (self.accessor)(filter) {
            Settable::Set(value) => self.handler.apply(stmt, &self.name, value, filter),
            Settable::Unset => Ok(stmt),
        }
    }
}

/// A registered schema attribute
enum FilterEntry<F> {
    Declarative(Box<dyn BoundField<F>>),
    Manual(Box<dyn BoundManual<F>>),
}

impl<F> FilterEntry<F> {
    fn is_set(&self, filter: &F) -> bool {
        match self {
            FilterEntry::Declarative(field) => field.is_set(filter),
            FilterEntry::Manual(handler) => handler.is_set(filter),
        }
    }
}

/// The fields of a filter type, in declaration order. Built once per type.
pub struct FilterSchema<F> {
    fields: IndexMap<String, FilterEntry<F>>,
}

pub struct FilterSchemaBuilder<F> {
    fields: IndexMap<String, FilterEntry<F>>,
    error: Option<SchemaError>,
}

impl<F: 'static> FilterSchema<F> {
    pub fn builder() -> FilterSchemaBuilder<F> {
        FilterSchemaBuilder {
            fields: IndexMap::new(),
            error: None,
        }
    }

    /// Registered attribute names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_manual(&self, name: &str) -> Option<bool> {
        self.fields
            .get(name)
            .map(|entry| matches!(entry, FilterEntry::Manual(_)))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<F: Filter> FilterSchema<F> {
    /// Apply `filter` to `stmt`, then OR it with the filter's alternative
    /// branch when both contribute WHERE terms.
    pub fn apply(&self, filter: &F, stmt: Select) -> Result<Select, FilterError> {
        let origin = stmt.clone();
        let stmt = self.apply_fields(filter, stmt)?;

        if stmt.where_terms == origin.where_terms {
            return Ok(stmt);
        }

        match filter.or_filter() {
            Some(alternative) => self.combine_or(&origin, stmt, alternative),
            None => Ok(stmt),
        }
    }

    fn apply_fields(&self, filter: &F, mut stmt: Select) -> Result<Select, FilterError> {
        let active: Vec<_> = self
            .fields
            .iter()
            .filter(|(_, entry)| entry.is_set(filter))
            .collect();
        debug!(filter = type_name::<F>(), active = active.len(), "applying filter");

        for (name, entry) in active {
            stmt = match entry {
                FilterEntry::Declarative(field) => field.apply(stmt, filter),
                FilterEntry::Manual(handler) => handler.apply(stmt, filter)?,
            };
            trace!(field = %name, "applied filter field");
        }

        Ok(stmt)
    }

    fn combine_or(
        &self,
        origin: &Select,
        stmt: Select,
        alternative: &F,
    ) -> Result<Select, FilterError> {
        let alternative_stmt = self.apply(alternative, origin.clone())?;

        let (prefix, own) = split_terms(origin, &stmt);
        let (_, alternative_own) = split_terms(origin, &alternative_stmt);

        let (Some(primary), Some(secondary)) =
            (Expr::and_all(own), Expr::and_all(alternative_own))
        else {
            return Ok(stmt);
        };

        debug!(filter = type_name::<F>(), "combining filter with alternative branch");

        let mut terms = prefix;
        terms.push(primary.or(secondary));

        // Branch-only joins go LEFT OUTER so each branch still matches on its own
        let mut combined = stmt.clone().with_where_terms(terms);
        combined.joins = origin.joins.clone();
        for join in branch_joins(origin, &stmt).chain(branch_joins(origin, &alternative_stmt)) {
            combined = combined.join(join.table, join.on.clone(), outer(join.kind));
        }
        Ok(combined)
    }
}

/// Joins `stmt` carries that `origin` did not
fn branch_joins<'a>(origin: &'a Select, stmt: &'a Select) -> impl Iterator<Item = &'a Join> {
    stmt.joins
        .iter()
        .filter(move |join| !origin.joins.contains(join))
}

fn outer(kind: JoinKind) -> JoinKind {
    match kind {
        JoinKind::Inner => JoinKind::LeftOuter,
        other => other,
    }
}

/// Split `stmt`'s WHERE terms into the ones inherited from `origin` and the
/// ones added on top. If the origin terms are no longer a prefix, every term
/// counts as added.
fn split_terms(origin: &Select, stmt: &Select) -> (Vec<Expr>, Vec<Expr>) {
    if stmt.where_terms.starts_with(&origin.where_terms) {
        let split = origin.where_terms.len();
        (
            stmt.where_terms[..split].to_vec(),
            stmt.where_terms[split..].to_vec(),
        )
    } else {
        (Vec::new(), stmt.where_terms.clone())
    }
}

impl<F: 'static> FilterSchemaBuilder<F> {
    /// Register a declarative field for the attribute returned by `accessor`
    pub fn field<T, A>(mut self, name: &str, accessor: A, field: FilterField<T>) -> Self
    where
        T: 'static,
        A: Fn(&F) -> &Settable<T> + Send + Sync + 'static,
    {
        let entry = FilterEntry::Declarative(Box::new(FieldBinding { accessor, field }));
        self.register(name, entry);
        self
    }

    /// Register a manual handler for the attribute returned by `accessor`
    pub fn manual<H, A>(mut self, name: &str, accessor: A, handler: H) -> Self
    where
        H: ManualFilter<F> + 'static,
        A: Fn(&F) -> &Settable<H::Value> + Send + Sync + 'static,
    {
        let entry = FilterEntry::Manual(Box::new(ManualBinding {
            name: name.to_string(),
            accessor,
            handler,
        }));
        self.register(name, entry);
        self
    }

    pub fn build(self) -> Result<FilterSchema<F>, SchemaError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(FilterSchema {
                fields: self.fields,
            }),
        }
    }

    fn register(&mut self, name: &str, entry: FilterEntry<F>) {
        if self.error.is_some() {
            return;
        }
        match validate_field_name(name, self.fields.contains_key(name)) {
            Ok(()) => {
                self.fields.insert(name.to_string(), entry);
            }
            Err(err) => self.error = Some(err),
        }
    }
}
