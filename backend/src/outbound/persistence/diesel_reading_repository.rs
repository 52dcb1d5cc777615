//! PostgreSQL-backed `ReadingRepository` implementation using Diesel ORM.
//!
//! List entries live in `reading_list_books`, keyed by `(list_id, book_id)`,
//! and are always read joined to their book.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ReadingRepository, RepositoryError};
use crate::domain::{
    Book, BookDraft, EntryProgress, ReadingGoal, ReadingGoalDraft, ReadingList, ReadingListDraft,
    ReadingListEntry, ReadingStatus, UserId, year_bounds,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{contains_pattern, delete_owned, owner_id, require_owned};
use super::models::{
    BookFields, BookRow, EntryProgressFields, EntryRow, GoalRow, ListFields, ListRow,
    convert_rows,
};
use super::pool::DbPool;
use super::schema::{books, reading_goals, reading_list_books, reading_lists};

const BOOK: &str = "book";
const LIST: &str = "reading list";
const ENTRY: &str = "reading list entry";
const GOAL: &str = "reading goal";

/// Diesel-backed implementation of the `ReadingRepository` port.
#[derive(Clone)]
pub struct DieselReadingRepository {
    pool: DbPool,
}

impl DieselReadingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_entry<C>(
    conn: &mut C,
    owner: Uuid,
    list_id: Uuid,
    book_id: Uuid,
) -> Result<ReadingListEntry, RepositoryError>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    reading_list_books::table
        .inner_join(books::table)
        .filter(reading_list_books::list_id.eq(list_id))
        .filter(reading_list_books::book_id.eq(book_id))
        .filter(reading_list_books::user_id.eq(owner))
        .select((EntryRow::as_select(), BookRow::as_select()))
        .first::<(EntryRow, BookRow)>(conn)
        .await
        .map_err(|err| map_diesel_error(err, ENTRY))?
        .try_into()
}

async fn insert_entry<C>(
    conn: &mut C,
    owner: Uuid,
    list_id: Uuid,
    book_id: Uuid,
    progress: EntryProgress,
) -> Result<(), RepositoryError>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    diesel::insert_into(reading_list_books::table)
        .values((
            reading_list_books::list_id.eq(list_id),
            reading_list_books::book_id.eq(book_id),
            reading_list_books::user_id.eq(owner),
            EntryProgressFields::from(progress),
        ))
        .execute(conn)
        .await
        .map_err(|err| map_diesel_error(err, ENTRY))?;
    Ok(())
}

#[async_trait]
impl ReadingRepository for DieselReadingRepository {
    async fn create_book(
        &self,
        owner: &UserId,
        draft: &BookDraft,
    ) -> Result<Book, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(books::table)
            .values((
                books::id.eq(Uuid::new_v4()),
                books::user_id.eq(owner_id(owner)),
                BookFields::from(draft),
            ))
            .returning(BookRow::as_returning())
            .get_result::<BookRow>(&mut conn)
            .await
            .map(Book::from)
            .map_err(|err| map_diesel_error(err, BOOK))
    }

    async fn list_books<'a>(
        &self,
        owner: &UserId,
        query: Option<&'a str>,
    ) -> Result<Vec<Book>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut statement = books::table
            .filter(books::user_id.eq(owner_id(owner)))
            .select(BookRow::as_select())
            .order((books::title.asc(), books::created_at.asc()))
            .into_boxed();
        if let Some(needle) = query.map(str::trim).filter(|needle| !needle.is_empty()) {
            let pattern = contains_pattern(needle);
            statement = statement.filter(
                books::title
                    .ilike(pattern.clone())
                    .or(books::author.ilike(pattern)),
            );
        }
        let rows = statement
            .load::<BookRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, BOOK))?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_book(&self, owner: &UserId, id: Uuid) -> Result<Book, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        books::table
            .find(id)
            .filter(books::user_id.eq(owner_id(owner)))
            .select(BookRow::as_select())
            .first::<BookRow>(&mut conn)
            .await
            .map(Book::from)
            .map_err(|err| map_diesel_error(err, BOOK))
    }

    async fn update_book(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &BookDraft,
    ) -> Result<Book, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(books::table.find(id).filter(books::user_id.eq(owner_id(owner))))
            .set(BookFields::from(draft))
            .returning(BookRow::as_returning())
            .get_result::<BookRow>(&mut conn)
            .await
            .map(Book::from)
            .map_err(|err| map_diesel_error(err, BOOK))
    }

    async fn delete_book(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, books, id, owner_id(owner), BOOK)
    }

    async fn create_list(
        &self,
        owner: &UserId,
        draft: &ReadingListDraft,
    ) -> Result<ReadingList, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reading_lists::table)
            .values((
                reading_lists::id.eq(Uuid::new_v4()),
                reading_lists::user_id.eq(owner_id(owner)),
                ListFields::from(draft),
            ))
            .returning(ListRow::as_returning())
            .get_result::<ListRow>(&mut conn)
            .await
            .map(ReadingList::from)
            .map_err(|err| map_diesel_error(err, LIST))
    }

    async fn list_lists(&self, owner: &UserId) -> Result<Vec<ReadingList>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = reading_lists::table
            .filter(reading_lists::user_id.eq(owner_id(owner)))
            .order(reading_lists::name.asc())
            .select(ListRow::as_select())
            .load::<ListRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, LIST))?;
        Ok(rows.into_iter().map(ReadingList::from).collect())
    }

    async fn find_list(&self, owner: &UserId, id: Uuid) -> Result<ReadingList, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        reading_lists::table
            .find(id)
            .filter(reading_lists::user_id.eq(owner_id(owner)))
            .select(ListRow::as_select())
            .first::<ListRow>(&mut conn)
            .await
            .map(ReadingList::from)
            .map_err(|err| map_diesel_error(err, LIST))
    }

    async fn update_list(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &ReadingListDraft,
    ) -> Result<ReadingList, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            reading_lists::table
                .find(id)
                .filter(reading_lists::user_id.eq(owner_id(owner))),
        )
        .set(ListFields::from(draft))
        .returning(ListRow::as_returning())
        .get_result::<ListRow>(&mut conn)
        .await
        .map(ReadingList::from)
        .map_err(|err| map_diesel_error(err, LIST))
    }

    async fn delete_list(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, reading_lists, id, owner_id(owner), LIST)
    }

    async fn add_entry(
        &self,
        owner: &UserId,
        list_id: Uuid,
        book_id: Uuid,
        progress: EntryProgress,
    ) -> Result<ReadingListEntry, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, reading_lists, list_id, owner, LIST);
        require_owned!(&mut conn, books, book_id, owner, BOOK);
        insert_entry(&mut conn, owner, list_id, book_id, progress).await?;
        load_entry(&mut conn, owner, list_id, book_id).await
    }

    async fn list_entries(
        &self,
        owner: &UserId,
        list_id: Uuid,
    ) -> Result<Vec<ReadingListEntry>, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, reading_lists, list_id, owner, LIST);
        let rows = reading_list_books::table
            .inner_join(books::table)
            .filter(reading_list_books::list_id.eq(list_id))
            .filter(reading_list_books::user_id.eq(owner))
            .order((reading_list_books::added_at.asc(), books::title.asc()))
            .select((EntryRow::as_select(), BookRow::as_select()))
            .load::<(EntryRow, BookRow)>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ENTRY))?;
        convert_rows(rows)
    }

    async fn find_entry(
        &self,
        owner: &UserId,
        list_id: Uuid,
        book_id: Uuid,
    ) -> Result<ReadingListEntry, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_entry(&mut conn, owner_id(owner), list_id, book_id).await
    }

    async fn update_entry(
        &self,
        owner: &UserId,
        list_id: Uuid,
        book_id: Uuid,
        progress: EntryProgress,
    ) -> Result<ReadingListEntry, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            reading_list_books::table
                .find((list_id, book_id))
                .filter(reading_list_books::user_id.eq(owner)),
        )
        .set(EntryProgressFields::from(progress))
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, ENTRY))?;
        if updated == 0 {
            return Err(RepositoryError::not_found(ENTRY));
        }
        load_entry(&mut conn, owner, list_id, book_id).await
    }

    async fn remove_entry(
        &self,
        owner: &UserId,
        list_id: Uuid,
        book_id: Uuid,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            reading_list_books::table
                .find((list_id, book_id))
                .filter(reading_list_books::user_id.eq(owner_id(owner))),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, ENTRY))?;
        if deleted == 0 {
            return Err(RepositoryError::not_found(ENTRY));
        }
        Ok(())
    }

    async fn move_entry(
        &self,
        owner: &UserId,
        source_list_id: Uuid,
        book_id: Uuid,
        target_list_id: Uuid,
    ) -> Result<ReadingListEntry, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            async move {
                let entry = load_entry(conn, owner, source_list_id, book_id).await?;
                require_owned!(conn, reading_lists, target_list_id, owner, "target list");
                diesel::delete(reading_list_books::table.find((source_list_id, book_id)))
                    .execute(conn)
                    .await
                    .map_err(|err| map_diesel_error(err, ENTRY))?;
                insert_entry(conn, owner, target_list_id, book_id, entry.progress).await?;
                load_entry(conn, owner, target_list_id, book_id).await
            }
            .scope_boxed()
        })
        .await
    }

    async fn create_goal(
        &self,
        owner: &UserId,
        draft: ReadingGoalDraft,
    ) -> Result<ReadingGoal, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reading_goals::table)
            .values((
                reading_goals::id.eq(Uuid::new_v4()),
                reading_goals::user_id.eq(owner_id(owner)),
                reading_goals::year.eq(draft.year),
                reading_goals::target_books.eq(draft.target_books),
            ))
            .returning(GoalRow::as_returning())
            .get_result::<GoalRow>(&mut conn)
            .await
            .map(ReadingGoal::from)
            .map_err(|err| map_diesel_error(err, GOAL))
    }

    async fn list_goals(&self, owner: &UserId) -> Result<Vec<ReadingGoal>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = reading_goals::table
            .filter(reading_goals::user_id.eq(owner_id(owner)))
            .order(reading_goals::year.desc())
            .select(GoalRow::as_select())
            .load::<GoalRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, GOAL))?;
        Ok(rows.into_iter().map(ReadingGoal::from).collect())
    }

    async fn update_goal_target(
        &self,
        owner: &UserId,
        id: Uuid,
        target_books: i32,
    ) -> Result<ReadingGoal, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            reading_goals::table
                .find(id)
                .filter(reading_goals::user_id.eq(owner_id(owner))),
        )
        .set(reading_goals::target_books.eq(target_books))
        .returning(GoalRow::as_returning())
        .get_result::<GoalRow>(&mut conn)
        .await
        .map(ReadingGoal::from)
        .map_err(|err| map_diesel_error(err, GOAL))
    }

    async fn delete_goal(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, reading_goals, id, owner_id(owner), GOAL)
    }

    async fn count_finished_books(
        &self,
        owner: &UserId,
        year: i32,
    ) -> Result<i64, RepositoryError> {
        let Some((start, end)) = year_bounds(year) else {
            return Ok(0);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        reading_list_books::table
            .filter(reading_list_books::user_id.eq(owner_id(owner)))
            .filter(reading_list_books::status.eq(ReadingStatus::Finished.as_str()))
            .filter(reading_list_books::finished_on.between(start, end))
            .select(diesel::dsl::count_distinct(reading_list_books::book_id))
            .first::<i64>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ENTRY))
    }
}
