//! Named operators for `FilterField`.
//!
//! Each one has the `(column, &value) -> predicate` shape a field expects, so
//! they can be passed by name: `FilterField::new(book::ID, ops::eq)`. Any
//! closure with the same shape works the same way.

use crate::ast::Column;
use crate::query::{Expr, Value};

/// Values usable as the right-hand side of `IN`
pub trait ValueList {
    fn to_values(&self) -> Vec<Value>;
}

impl<V: Clone + Into<Value>> ValueList for Vec<V> {
    fn to_values(&self) -> Vec<Value> {
        self.iter().cloned().map(Into::into).collect()
    }
}

impl<V: Clone + Into<Value>> ValueList for [V] {
    fn to_values(&self) -> Vec<Value> {
        self.iter().cloned().map(Into::into).collect()
    }
}

impl<V: Clone + Into<Value>, const N: usize> ValueList for [V; N] {
    fn to_values(&self) -> Vec<Value> {
        self.iter().cloned().map(Into::into).collect()
    }
}

pub fn eq<V: Clone + Into<Value>>(column: Column, value: &V) -> Expr {
    column.eq(value.clone())
}

pub fn ne<V: Clone + Into<Value>>(column: Column, value: &V) -> Expr {
    column.ne(value.clone())
}

pub fn gt<V: Clone + Into<Value>>(column: Column, value: &V) -> Expr {
    column.gt(value.clone())
}

pub fn ge<V: Clone + Into<Value>>(column: Column, value: &V) -> Expr {
    column.ge(value.clone())
}

pub fn lt<V: Clone + Into<Value>>(column: Column, value: &V) -> Expr {
    column.lt(value.clone())
}

pub fn le<V: Clone + Into<Value>>(column: Column, value: &V) -> Expr {
    column.le(value.clone())
}

pub fn in_list<L: ValueList + ?Sized>(column: Column, values: &L) -> Expr {
    column.in_list(values.to_values())
}

pub fn not_in_list<L: ValueList + ?Sized>(column: Column, values: &L) -> Expr {
    column.not_in_list(values.to_values())
}

pub fn like<S: AsRef<str>>(column: Column, pattern: &S) -> Expr {
    column.like(pattern.as_ref())
}

pub fn ilike<S: AsRef<str>>(column: Column, pattern: &S) -> Expr {
    column.ilike(pattern.as_ref())
}

pub fn contains<S: AsRef<str>>(column: Column, needle: &S) -> Expr {
    column.contains(needle.as_ref())
}

pub fn icontains<S: AsRef<str>>(column: Column, needle: &S) -> Expr {
    column.icontains(needle.as_ref())
}

/// `true` → IS NULL, `false` → IS NOT NULL
pub fn is_null(column: Column, value: &bool) -> Expr {
    if *value {
        column.is_null()
    } else {
        column.is_not_null()
    }
}
