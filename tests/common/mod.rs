#![allow(dead_code)]

use chameleon_filter::filter::ops;
use chameleon_filter::query::{JoinKind, Select};
use chameleon_filter::{
    Expr, Filter, FilterError, FilterField, FilterSchema, ManualFilter, OrderingField,
    Relation, RelationKind, RelationshipInfo, Settable, SortDirection, Sorter, SorterSchema,
    Table,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use serde::Deserialize;
use uuid::Uuid;

// ─── MODELS ───

pub const USER: Table = Table::new("user", &["id", "first_name", "last_name", "is_deleted"]);
pub const REVIEW: Table = Table::new("review", &["id", "content", "book_id", "user_id"]);
pub const AUTHOR: Table = Table::new("author", &["id", "alias", "user_id"]);
pub const BOOK_AUTHOR: Table = Table::new("book__author", &["book_id", "author_id"]);
pub const BOOK: Table = Table::new("book", &["id", "created_at"]);

pub const CONTRACT: Table = Table::new("contract", &["id", "created_at"]);
pub const JOB: Table = Table::new("job", &["id", "is_urgent"]);
pub const CONTRACT_JOB: Table = Table::new("contract_job", &["job_id", "contract_id"]);

pub const BOOK_AUTHORS: Relation = Relation::new(
    "authors",
    BOOK,
    AUTHOR,
    RelationKind::ManyToMany {
        through: BOOK_AUTHOR,
        source_key: "book_id",
        target_key: "author_id",
    },
);
pub const BOOK_REVIEWS: Relation = Relation::new(
    "reviews",
    BOOK,
    REVIEW,
    RelationKind::HasMany { foreign_key: "book_id" },
);
pub const AUTHOR_USER: Relation = Relation::new(
    "user",
    AUTHOR,
    USER,
    RelationKind::BelongsTo { foreign_key: "user_id" },
);

/// 0001-01-01 00:00:00, the earliest timestamp the service stores
pub fn min_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

// ─── FILTERS ───

#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeInterval {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct BookFilter {
    pub ident: Settable<Uuid>,
    pub created_at_from: Settable<DateTime<Utc>>,
    pub created_at_to: Settable<DateTime<Utc>>,
    pub created_at_between: Settable<DateTimeInterval>,
    pub author_ids: Settable<Vec<Uuid>>,
    pub review_ids: Settable<Vec<Uuid>>,
    pub review_content_contains: Settable<String>,
    pub author_user_id: Settable<Uuid>,
    pub is_manual_filter_enabled: Settable<bool>,
    /// Not registered in the schema; consumers read it themselves
    pub process_manually_field: Settable<String>,
}

/// `book.created_at != 0001-01-01` when enabled
pub struct BookManualFilter;

impl ManualFilter<BookFilter> for BookManualFilter {
    type Value = bool;

    fn apply(
        &self,
        stmt: Select,
        _field: &str,
        value: &bool,
        _filter: &BookFilter,
    ) -> Result<Select, FilterError> {
        if !value {
            return Ok(stmt);
        }
        Ok(stmt.filter(BOOK.column("created_at").ne(min_datetime())))
    }
}

lazy_static! {
    static ref BOOK_FILTER: FilterSchema<BookFilter> = FilterSchema::<BookFilter>::builder()
        .field("ident", |f| &f.ident, FilterField::new(BOOK.column("id"), ops::eq))
        .field(
            "created_at_from",
            |f| &f.created_at_from,
            FilterField::new(BOOK.column("created_at"), ops::ge),
        )
        .field(
            "created_at_to",
            |f| &f.created_at_to,
            FilterField::new(BOOK.column("created_at"), ops::le),
        )
        .field(
            "created_at_between",
            |f| &f.created_at_between,
            FilterField::new(BOOK.column("created_at"), |column, interval: &DateTimeInterval| {
                column.between(interval.from, interval.to)
            }),
        )
        .field(
            "author_ids",
            |f| &f.author_ids,
            FilterField::new(AUTHOR.column("id"), ops::in_list)
                .relationship(RelationshipInfo::new(BOOK_AUTHORS)),
        )
        .field(
            "review_ids",
            |f| &f.review_ids,
            FilterField::new(REVIEW.column("id"), ops::in_list)
                .relationship(RelationshipInfo::new(BOOK_REVIEWS)),
        )
        .field(
            "review_content_contains",
            |f| &f.review_content_contains,
            FilterField::new(REVIEW.column("content"), ops::icontains)
                .relationship(RelationshipInfo::new(BOOK_REVIEWS)),
        )
        .field(
            "author_user_id",
            |f| &f.author_user_id,
            FilterField::new(USER.column("id"), ops::eq).relationships([
                RelationshipInfo::new(BOOK_AUTHORS),
                RelationshipInfo::new(AUTHOR_USER),
            ]),
        )
        .manual("is_manual_filter_enabled", |f| &f.is_manual_filter_enabled, BookManualFilter)
        .build()
        .expect("book filter schema");
}

impl Filter for BookFilter {
    fn schema() -> &'static FilterSchema<Self> {
        &BOOK_FILTER
    }
}

#[derive(Debug, Default)]
pub struct BookOrFilter {
    pub ident: Settable<Uuid>,
    pub review_ids: Settable<Vec<Uuid>>,
    pub or_: Option<Box<BookOrFilter>>,
}

lazy_static! {
    static ref BOOK_OR_FILTER: FilterSchema<BookOrFilter> = FilterSchema::<BookOrFilter>::builder()
        .field("ident", |f| &f.ident, FilterField::new(BOOK.column("id"), ops::eq))
        .field(
            "review_ids",
            |f| &f.review_ids,
            FilterField::new(REVIEW.column("id"), ops::in_list)
                .relationship(RelationshipInfo::new(BOOK_REVIEWS)),
        )
        .build()
        .expect("book or-filter schema");
}

impl Filter for BookOrFilter {
    fn schema() -> &'static FilterSchema<Self> {
        &BOOK_OR_FILTER
    }

    fn or_filter(&self) -> Option<&Self> {
        self.or_.as_deref()
    }
}

/// Deserializable straight from a query payload; missing keys stay unset
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContractFilter {
    pub ident: Settable<Uuid>,
    pub has_urgent_job: Settable<bool>,
}

/// EXISTS (or NOT EXISTS) an urgent job linked to the contract in `ident`
pub struct HasUrgentJobFilter;

impl ManualFilter<ContractFilter> for HasUrgentJobFilter {
    type Value = bool;

    fn apply(
        &self,
        stmt: Select,
        _field: &str,
        value: &bool,
        filter: &ContractFilter,
    ) -> Result<Select, FilterError> {
        let ident = *filter.ident.require("ident")?;

        let urgent_job = Select::one(CONTRACT_JOB)
            .join(
                JOB,
                CONTRACT_JOB.column("job_id").eq_column(JOB.column("id")),
                JoinKind::Inner,
            )
            .filter(CONTRACT_JOB.column("contract_id").eq(ident))
            .filter(JOB.column("is_urgent").eq(true));

        let exists = Expr::exists(urgent_job);
        Ok(stmt.filter(if *value { exists } else { exists.not() }))
    }
}

lazy_static! {
    static ref CONTRACT_FILTER: FilterSchema<ContractFilter> =
        FilterSchema::<ContractFilter>::builder()
            .field("ident", |f| &f.ident, FilterField::new(CONTRACT.column("id"), ops::eq))
            .manual("has_urgent_job", |f| &f.has_urgent_job, HasUrgentJobFilter)
            .build()
            .expect("contract filter schema");
}

impl Filter for ContractFilter {
    fn schema() -> &'static FilterSchema<Self> {
        &CONTRACT_FILTER
    }
}

// ─── SORTERS ───

#[derive(Debug, Default)]
pub struct BookSorter {
    pub created_at: Settable<SortDirection>,
    pub created_at_nulls_last: Settable<SortDirection>,
    pub created_at_nulls_first: Settable<SortDirection>,
    pub author_user_first_name: Settable<SortDirection>,
    pub author_alias: Settable<SortDirection>,
    pub author_user_last_name: Settable<SortDirection>,
    pub author_user_is_deleted: Settable<SortDirection>,
}

fn author_user_path() -> [RelationshipInfo; 2] {
    [
        RelationshipInfo::new(BOOK_AUTHORS),
        RelationshipInfo::new(AUTHOR_USER),
    ]
}

lazy_static! {
    static ref BOOK_SORTER: SorterSchema<BookSorter> = SorterSchema::<BookSorter>::builder()
        .field("created_at", |s| &s.created_at, OrderingField::new(BOOK.column("created_at")))
        .field(
            "created_at_nulls_last",
            |s| &s.created_at_nulls_last,
            OrderingField::new(BOOK.column("created_at")).nulls_last(),
        )
        .field(
            "created_at_nulls_first",
            |s| &s.created_at_nulls_first,
            OrderingField::new(BOOK.column("created_at")).nulls_first(),
        )
        .field(
            "author_user_first_name",
            |s| &s.author_user_first_name,
            OrderingField::new(USER.column("first_name")).relationships(author_user_path()),
        )
        .field(
            "author_alias",
            |s| &s.author_alias,
            OrderingField::new(AUTHOR.column("alias"))
                .relationship(RelationshipInfo::new(BOOK_AUTHORS)),
        )
        .field(
            "author_user_last_name",
            |s| &s.author_user_last_name,
            OrderingField::new(USER.column("last_name")).relationships(author_user_path()),
        )
        .field(
            "author_user_is_deleted",
            |s| &s.author_user_is_deleted,
            OrderingField::new(USER.column("is_deleted")).relationships(author_user_path()),
        )
        .build()
        .expect("book sorter schema");
}

impl Sorter for BookSorter {
    fn schema() -> &'static SorterSchema<Self> {
        &BOOK_SORTER
    }
}
