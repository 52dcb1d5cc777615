//! Port for books, reading lists, list entries and reading goals.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Book, BookDraft, EntryProgress, ReadingGoal, ReadingGoalDraft, ReadingList, ReadingListDraft,
    ReadingListEntry, UserId,
};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Insert a book; a repeated ISBN is `AlreadyExists`.
    async fn create_book(&self, owner: &UserId, draft: &BookDraft)
    -> Result<Book, RepositoryError>;

    /// Books ordered by title; `query` matches title or author, ignoring case.
    async fn list_books<'a>(
        &self,
        owner: &UserId,
        query: Option<&'a str>,
    ) -> Result<Vec<Book>, RepositoryError>;

    async fn find_book(&self, owner: &UserId, id: Uuid) -> Result<Book, RepositoryError>;

    async fn update_book(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &BookDraft,
    ) -> Result<Book, RepositoryError>;

    async fn delete_book(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Insert a list; a repeated name is `AlreadyExists`.
    async fn create_list(
        &self,
        owner: &UserId,
        draft: &ReadingListDraft,
    ) -> Result<ReadingList, RepositoryError>;

    async fn list_lists(&self, owner: &UserId) -> Result<Vec<ReadingList>, RepositoryError>;

    async fn find_list(&self, owner: &UserId, id: Uuid) -> Result<ReadingList, RepositoryError>;

    async fn update_list(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &ReadingListDraft,
    ) -> Result<ReadingList, RepositoryError>;

    async fn delete_list(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Put a book on a list with `progress`; present already is `AlreadyExists`.
    async fn add_entry(
        &self,
        owner: &UserId,
        list_id: Uuid,
        book_id: Uuid,
        progress: EntryProgress,
    ) -> Result<ReadingListEntry, RepositoryError>;

    /// Entries in the order they were added.
    async fn list_entries(
        &self,
        owner: &UserId,
        list_id: Uuid,
    ) -> Result<Vec<ReadingListEntry>, RepositoryError>;

    async fn find_entry(
        &self,
        owner: &UserId,
        list_id: Uuid,
        book_id: Uuid,
    ) -> Result<ReadingListEntry, RepositoryError>;

    async fn update_entry(
        &self,
        owner: &UserId,
        list_id: Uuid,
        book_id: Uuid,
        progress: EntryProgress,
    ) -> Result<ReadingListEntry, RepositoryError>;

    async fn remove_entry(
        &self,
        owner: &UserId,
        list_id: Uuid,
        book_id: Uuid,
    ) -> Result<(), RepositoryError>;

    /// Move an entry to `target_list_id` keeping its progress, in one
    /// transaction.
    async fn move_entry(
        &self,
        owner: &UserId,
        source_list_id: Uuid,
        book_id: Uuid,
        target_list_id: Uuid,
    ) -> Result<ReadingListEntry, RepositoryError>;

    /// Insert a goal; a second goal for the same year is `AlreadyExists`.
    async fn create_goal(
        &self,
        owner: &UserId,
        draft: ReadingGoalDraft,
    ) -> Result<ReadingGoal, RepositoryError>;

    /// Goals ordered by year, newest first.
    async fn list_goals(&self, owner: &UserId) -> Result<Vec<ReadingGoal>, RepositoryError>;

    async fn update_goal_target(
        &self,
        owner: &UserId,
        id: Uuid,
        target_books: i32,
    ) -> Result<ReadingGoal, RepositoryError>;

    async fn delete_goal(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Distinct books finished during `year` across every list.
    async fn count_finished_books(&self, owner: &UserId, year: i32)
    -> Result<i64, RepositoryError>;
}
