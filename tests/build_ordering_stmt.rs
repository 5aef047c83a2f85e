mod common;

use chameleon_filter::query::{JoinKind, Select};
use chameleon_filter::{
    to_sql, OrderingField, SchemaError, Settable, SortDirection, Sorter, SorterSchema,
};
use common::*;
use pretty_assertions::assert_eq;

// ─── NULLS PLACEMENT ───

#[test]
fn test_build_simple_stmt_nulls_first() {
    let sorter = BookSorter {
        created_at_nulls_first: Settable::Set(SortDirection::Desc),
        ..BookSorter::default()
    };

    let stmt = sorter.apply(Select::new(BOOK));

    let expected = Select::new(BOOK).order_by(BOOK.column("created_at").desc().nulls_first());
    assert_eq!(to_sql(&stmt), to_sql(&expected));
    assert!(to_sql(&stmt).ends_with("ORDER BY book.created_at DESC NULLS FIRST"));
}

#[test]
fn test_build_simple_stmt_nulls_last() {
    let sorter = BookSorter {
        created_at_nulls_last: Settable::Set(SortDirection::Desc),
        ..BookSorter::default()
    };

    let stmt = sorter.apply(Select::new(BOOK));

    let expected = Select::new(BOOK).order_by(BOOK.column("created_at").desc().nulls_last());
    assert_eq!(to_sql(&stmt), to_sql(&expected));
}

#[test]
fn test_build_simple_stmt_default_nulls() {
    let sorter = BookSorter {
        created_at: Settable::Set(SortDirection::Desc),
        ..BookSorter::default()
    };

    let stmt = sorter.apply(Select::new(BOOK));

    assert_eq!(
        to_sql(&stmt),
        "SELECT book.id, book.created_at\nFROM book\nORDER BY book.created_at DESC"
    );
}

#[test]
fn test_unset_sorter_leaves_statement_untouched() {
    let stmt = BookSorter::default().apply(Select::new(BOOK));
    assert_eq!(to_sql(&stmt), to_sql(&Select::new(BOOK)));
}

// ─── JOINS AND PRIORITY ───

#[test]
fn test_build_stmt_with_join() {
    let sorter = BookSorter {
        author_user_first_name: Settable::Set(SortDirection::Desc),
        author_user_is_deleted: Settable::Set(SortDirection::Asc),
        ..BookSorter::default()
    };

    let stmt = sorter.apply_with_priority(
        Select::new(BOOK),
        &["author_user_is_deleted", "author_user_last_name"],
    );

    let expected = Select::new(BOOK)
        .join_relation(&BOOK_AUTHORS, None, JoinKind::Inner)
        .join_relation(&AUTHOR_USER, None, JoinKind::Inner)
        .order_by(USER.column("is_deleted").asc())
        .order_by(USER.column("first_name").desc());
    assert_eq!(to_sql(&stmt), to_sql(&expected));
    assert_eq!(stmt.joins.len(), 3);
}

#[test]
fn test_build_stmt_with_single_join() {
    let sorter = BookSorter {
        author_alias: Settable::Set(SortDirection::Desc),
        ..BookSorter::default()
    };

    let stmt = sorter.apply(Select::new(BOOK));

    assert_eq!(
        to_sql(&stmt),
        "SELECT book.id, book.created_at\n\
         FROM book\n\
         JOIN book__author ON book.id = book__author.book_id\n\
         JOIN author ON author.id = book__author.author_id\n\
         ORDER BY author.alias DESC"
    );
}

#[test]
fn test_priority_then_declaration_order() {
    let sorter = BookSorter {
        created_at: Settable::Set(SortDirection::Asc),
        author_alias: Settable::Set(SortDirection::Desc),
        author_user_last_name: Settable::Set(SortDirection::Asc),
        ..BookSorter::default()
    };

    let stmt = sorter.apply_with_priority(
        Select::new(BOOK),
        &["author_user_last_name", "unknown", "created_at"],
    );

    assert_eq!(
        stmt.order_by,
        vec![
            USER.column("last_name").asc(),
            BOOK.column("created_at").asc(),
            AUTHOR.column("alias").desc(),
        ]
    );
}

// ─── SCHEMA ERRORS ───

#[test]
fn test_duplicate_ordering_field() {
    let result = SorterSchema::<BookSorter>::builder()
        .field("created_at", |s| &s.created_at, OrderingField::new(BOOK.column("created_at")))
        .field(
            "created_at",
            |s| &s.created_at_nulls_last,
            OrderingField::new(BOOK.column("created_at")).nulls_last(),
        )
        .build();

    assert_eq!(
        result.err(),
        Some(SchemaError::DuplicateField("created_at".to_string()))
    );
}

#[test]
fn test_sort_direction_from_query_string() {
    let direction: SortDirection = " DESC ".parse().unwrap();
    assert_eq!(direction, SortDirection::Desc);
    assert!("sideways".parse::<SortDirection>().is_err());
}
