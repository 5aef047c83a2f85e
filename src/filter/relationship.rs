use tracing::trace;

use crate::ast::Relation;
use crate::query::{Expr, JoinKind, Select};

/// One join step a field needs to reach its column
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipInfo {
    pub relation: Relation,
    /// Replaces the relation's own join condition
    pub onclause: Option<Expr>,
    pub is_outer: bool,
    pub full: bool,
}

impl RelationshipInfo {
    pub const fn new(relation: Relation) -> Self {
        RelationshipInfo {
            relation,
            onclause: None,
            is_outer: false,
            full: false,
        }
    }

    pub fn onclause(mut self, on: Expr) -> Self {
        self.onclause = Some(on);
        self
    }

    /// LEFT OUTER JOIN
    pub fn outer(mut self) -> Self {
        self.is_outer = true;
        self
    }

    /// FULL OUTER JOIN
    pub fn full(mut self) -> Self {
        self.full = true;
        self
    }

    pub fn join_kind(&self) -> JoinKind {
        if self.full {
            JoinKind::FullOuter
        } else if self.is_outer {
            JoinKind::LeftOuter
        } else {
            JoinKind::Inner
        }
    }

    pub fn apply(&self, stmt: Select) -> Select {
        trace!(relation = %self.relation, kind = ?self.join_kind(), "joining relation");
        stmt.join_relation(&self.relation, self.onclause.clone(), self.join_kind())
    }
}

/// Joins for a field: the single relationship first, then each hop of the sequence
pub(crate) fn join_path<'a>(
    relationship: &'a Option<RelationshipInfo>,
    relationships: &'a [RelationshipInfo],
) -> impl Iterator<Item = &'a RelationshipInfo> {
    relationship.iter().chain(relationships.iter())
}

pub(crate) fn apply_joins(
    stmt: Select,
    relationship: &Option<RelationshipInfo>,
    relationships: &[RelationshipInfo],
) -> Select {
    join_path(relationship, relationships).fold(stmt, |stmt, info| info.apply(stmt))
}
