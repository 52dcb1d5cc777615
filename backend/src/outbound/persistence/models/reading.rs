//! Book, reading list, list entry and goal rows.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Book, BookDraft, EntryProgress, ReadingGoal, ReadingList, ReadingListDraft, ReadingListEntry,
};

use super::super::schema::{books, reading_goals, reading_list_books, reading_lists};
use super::parse_label;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub page_count: Option<i32>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            isbn: row.isbn,
            page_count: row.page_count,
            cover_url: row.cover_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = books, treat_none_as_null = true)]
pub(crate) struct BookFields<'a> {
    pub title: &'a str,
    pub author: Option<&'a str>,
    pub isbn: Option<&'a str>,
    pub page_count: Option<i32>,
    pub cover_url: Option<&'a str>,
}

impl<'a> From<&'a BookDraft> for BookFields<'a> {
    fn from(draft: &'a BookDraft) -> Self {
        Self {
            title: &draft.title,
            author: draft.author.as_deref(),
            isbn: draft.isbn.as_deref(),
            page_count: draft.page_count,
            cover_url: draft.cover_url.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reading_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ListRow> for ReadingList {
    fn from(row: ListRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = reading_lists, treat_none_as_null = true)]
pub(crate) struct ListFields<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a ReadingListDraft> for ListFields<'a> {
    fn from(draft: &'a ReadingListDraft) -> Self {
        Self {
            name: &draft.name,
            description: draft.description.as_deref(),
        }
    }
}

/// Entry columns; the book itself is joined in separately.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reading_list_books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EntryRow {
    pub list_id: Uuid,
    pub status: String,
    pub current_page: i32,
    pub rating: Option<i16>,
    pub started_on: Option<NaiveDate>,
    pub finished_on: Option<NaiveDate>,
    pub added_at: DateTime<Utc>,
}

impl TryFrom<(EntryRow, BookRow)> for ReadingListEntry {
    type Error = RepositoryError;

    fn try_from((entry, book): (EntryRow, BookRow)) -> Result<Self, Self::Error> {
        Ok(Self {
            list_id: entry.list_id,
            book: book.into(),
            progress: EntryProgress {
                status: parse_label(&entry.status)?,
                current_page: entry.current_page,
                rating: entry.rating,
                started_on: entry.started_on,
                finished_on: entry.finished_on,
            },
            added_at: entry.added_at,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = reading_list_books, treat_none_as_null = true)]
pub(crate) struct EntryProgressFields {
    pub status: &'static str,
    pub current_page: i32,
    pub rating: Option<i16>,
    pub started_on: Option<NaiveDate>,
    pub finished_on: Option<NaiveDate>,
}

impl From<EntryProgress> for EntryProgressFields {
    fn from(progress: EntryProgress) -> Self {
        Self {
            status: progress.status.as_str(),
            current_page: progress.current_page,
            rating: progress.rating,
            started_on: progress.started_on,
            finished_on: progress.finished_on,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reading_goals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GoalRow {
    pub id: Uuid,
    pub year: i32,
    pub target_books: i32,
    pub created_at: DateTime<Utc>,
}

impl From<GoalRow> for ReadingGoal {
    fn from(row: GoalRow) -> Self {
        Self {
            id: row.id,
            year: row.year,
            target_books: row.target_books,
            created_at: row.created_at,
        }
    }
}
