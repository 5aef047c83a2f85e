use crate::query::{Expr, JoinKind};

/// A mapped table: its name and the columns a plain `SELECT` projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// A column reference, usable as an operand in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    pub table: &'static str,
    pub name: &'static str,
}

/// How two tables are connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Foreign key lives on the source table, pointing at `target.id`
    BelongsTo { foreign_key: &'static str },
    /// Foreign key lives on the target table, pointing at `source.id`
    HasOne { foreign_key: &'static str },
    HasMany { foreign_key: &'static str },
    /// Association table holding keys of both sides
    ManyToMany {
        through: Table,
        source_key: &'static str,
        target_key: &'static str,
    },
}

/// A navigable association between two tables ("Book.authors", "Author.user")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relation {
    pub name: &'static str,
    pub source: Table,
    pub target: Table,
    pub kind: RelationKind,
}

/// One hop produced by a relation: the table to join and how
#[derive(Debug, Clone, PartialEq)]
pub struct JoinStep {
    pub table: Table,
    pub on: Expr,
}

/// Key column every table is assumed to carry
pub const PRIMARY_KEY: &str = "id";

impl Table {
    pub const fn new(name: &'static str, columns: &'static [&'static str]) -> Self {
        Table { name, columns }
    }

    pub const fn column(&self, name: &'static str) -> Column {
        Column::new(self.name, name)
    }

    /// Columns in declaration order
    pub fn all_columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().map(move |name| self.column(*name))
    }
}

impl Column {
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Column { table, name }
    }
}

impl Relation {
    pub const fn new(
        name: &'static str,
        source: Table,
        target: Table,
        kind: RelationKind,
    ) -> Self {
        Relation {
            name,
            source,
            target,
            kind,
        }
    }

    /// Join steps needed to reach `target` from `source`, in order.
    /// A many-to-many relation goes through its association table first.
    pub fn join_steps(&self) -> Vec<JoinStep> {
        let source_pk = self.source.column(PRIMARY_KEY);
        let target_pk = self.target.column(PRIMARY_KEY);

        match self.kind {
            RelationKind::BelongsTo { foreign_key } => vec![JoinStep {
                table: self.target,
                on: target_pk.eq_column(self.source.column(foreign_key)),
            }],
            RelationKind::HasOne { foreign_key } | RelationKind::HasMany { foreign_key } => {
                vec![JoinStep {
                    table: self.target,
                    on: source_pk.eq_column(self.target.column(foreign_key)),
                }]
            }
            RelationKind::ManyToMany {
                through,
                source_key,
                target_key,
            } => vec![
                JoinStep {
                    table: through,
                    on: source_pk.eq_column(through.column(source_key)),
                },
                JoinStep {
                    table: self.target,
                    on: target_pk.eq_column(through.column(target_key)),
                },
            ],
        }
    }

    /// Same as `join_steps` but every step uses `kind`
    pub(crate) fn joins(&self, kind: JoinKind) -> Vec<crate::query::Join> {
        self.join_steps()
            .into_iter()
            .map(|step| crate::query::Join {
                table: step.table,
                on: step.on,
                kind,
            })
            .collect()
    }
}

/// Dotted path like "book.authors", used in join logs
impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.source.name, self.name)
    }
}

/// "table.column", used in ordering logs
impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}
