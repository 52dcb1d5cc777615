//! Books, reading lists with per-book progress, and yearly reading goals.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::validation::{FieldViolation, optional_text, required_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub page_count: Option<i32>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub page_count: Option<i32>,
    pub cover_url: Option<String>,
}

impl BookDraft {
    /// ISBNs are stored without separators so duplicates are detected
    /// regardless of how they were typed.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        let isbn = optional_text("isbn", self.isbn.as_deref(), 32)?
            .map(|raw| normalise_isbn(&raw))
            .transpose()?;
        if self.page_count.is_some_and(|pages| pages <= 0) {
            return Err(FieldViolation::out_of_range("pageCount", 1, i64::from(i32::MAX)));
        }
        Ok(Self {
            title: required_text("title", &self.title, 300)?,
            author: optional_text("author", self.author.as_deref(), 200)?,
            isbn,
            cover_url: optional_text("coverUrl", self.cover_url.as_deref(), 2_000)?,
            ..self
        })
    }
}

fn normalise_isbn(raw: &str) -> Result<String, FieldViolation> {
    let isbn: String = raw
        .chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let well_formed = isbn.is_ascii()
        && match isbn.len() {
            13 => isbn.chars().all(|c| c.is_ascii_digit()),
            10 => isbn
                .chars()
                .enumerate()
                .all(|(i, c)| c.is_ascii_digit() || (i == 9 && c == 'X')),
            _ => false,
        };
    if !well_formed {
        return Err(FieldViolation::new(
            "isbn",
            "invalid",
            "isbn must have 10 or 13 digits",
        ));
    }
    Ok(isbn)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingList {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingListDraft {
    pub name: String,
    pub description: Option<String>,
}

impl ReadingListDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", &self.name, 120)?,
            description: optional_text("description", self.description.as_deref(), 2_000)?,
        })
    }
}

labelled_enum! {
    pub enum ReadingStatus as "reading status" {
        WantToRead => "want_to_read",
        Reading => "reading",
        Finished => "finished",
        Abandoned => "abandoned",
    }
}

/// A book on a reading list with its progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingListEntry {
    pub list_id: Uuid,
    pub book: Book,
    pub progress: EntryProgress,
    pub added_at: DateTime<Utc>,
}

impl ReadingListEntry {
    /// Percentage of pages read, capped at 100; `None` without a page count.
    pub fn progress_percent(&self) -> Option<f64> {
        let pages = self.book.page_count.filter(|pages| *pages > 0)?;
        let read = self.progress.current_page.clamp(0, pages);
        let raw = f64::from(read) / f64::from(pages) * 100.0;
        Some((raw * 10.0).round() / 10.0)
    }
}

/// Mutable reading state of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryProgress {
    pub status: ReadingStatus,
    pub current_page: i32,
    pub rating: Option<i16>,
    pub started_on: Option<NaiveDate>,
    pub finished_on: Option<NaiveDate>,
}

impl Default for EntryProgress {
    fn default() -> Self {
        Self {
            status: ReadingStatus::WantToRead,
            current_page: 0,
            rating: None,
            started_on: None,
            finished_on: None,
        }
    }
}

/// Caller-supplied progress change; absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub status: Option<ReadingStatus>,
    pub current_page: Option<i32>,
    pub rating: Option<i16>,
}

impl ProgressUpdate {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        if self.rating.is_some_and(|rating| !(1..=5).contains(&rating)) {
            return Err(FieldViolation::out_of_range("rating", 1, 5));
        }
        if self.current_page.is_some_and(|page| page < 0) {
            return Err(FieldViolation::negative("currentPage"));
        }
        Ok(self)
    }
}

impl EntryProgress {
    /// Apply `update` on `today`.
    ///
    /// Moving to `reading` stamps `started_on` once. Moving to `finished`
    /// stamps `finished_on` and jumps to the last page when the page count
    /// is known.
    pub fn apply(self, update: ProgressUpdate, page_count: Option<i32>, today: NaiveDate) -> Self {
        let mut next = self;
        if let Some(page) = update.current_page {
            next.current_page = page_count.map_or(page, |pages| page.min(pages));
        }
        if let Some(rating) = update.rating {
            next.rating = Some(rating);
        }
        match update.status {
            Some(ReadingStatus::Reading) => {
                next.status = ReadingStatus::Reading;
                next.started_on.get_or_insert(today);
                next.finished_on = None;
            }
            Some(ReadingStatus::Finished) => {
                next.status = ReadingStatus::Finished;
                next.started_on.get_or_insert(today);
                next.finished_on = Some(today);
                if let Some(pages) = page_count {
                    next.current_page = pages;
                }
            }
            Some(status) => next.status = status,
            None => {}
        }
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingGoal {
    pub id: Uuid,
    pub year: i32,
    pub target_books: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingGoalDraft {
    pub year: i32,
    pub target_books: i32,
}

impl ReadingGoalDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        if !(1900..=9999).contains(&self.year) {
            return Err(FieldViolation::out_of_range("year", 1900, 9999));
        }
        validate_target(self.target_books)?;
        Ok(self)
    }
}

/// Targets are between one and a thousand books.
pub fn validate_target(target_books: i32) -> Result<i32, FieldViolation> {
    if !(1..=1_000).contains(&target_books) {
        return Err(FieldViolation::out_of_range("targetBooks", 1, 1_000));
    }
    Ok(target_books)
}

/// A goal with the distinct books finished during its year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingGoalProgress {
    pub goal: ReadingGoal,
    pub finished_books: i64,
    pub percent: f64,
}

impl ReadingGoalProgress {
    /// Percent is rounded to one decimal and may exceed 100.
    pub fn new(goal: ReadingGoal, finished_books: i64) -> Self {
        let target = f64::from(goal.target_books.max(1));
        let raw = finished_books as f64 / target * 100.0;
        Self {
            goal,
            finished_books,
            percent: (raw * 10.0).round() / 10.0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.finished_books >= i64::from(self.goal.target_books)
    }
}

/// Inclusive date bounds of a calendar year, if representable.
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some((start, end))
}
