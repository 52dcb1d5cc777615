//! PostgreSQL-backed `MealRepository` implementation using Diesel ORM.
//!
//! Recipes keep their ingredient list as JSONB. Collections own their
//! membership rows in `collection_recipes`, which carry no owner column and
//! are reached only through an owned collection.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{MealRepository, RepositoryError};
use crate::domain::{
    DateRange, MealPlanDraft, MealPlanEntry, MealType, Recipe, RecipeCollection,
    RecipeCollectionDraft, RecipeDraft, RecipeFilter, ShoppingItemDraft, ShoppingListItem, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{contains_pattern, delete_owned, owner_id, require_owned};
use super::models::{
    CollectionFields, CollectionRow, MealPlanFields, MealPlanRow, RecipeFields, RecipeRow,
    ShoppingItemFields, ShoppingItemRow, convert_rows,
};
use super::pool::DbPool;
use super::schema::{
    collection_recipes, meal_plan_entries, recipe_collections, recipes, shopping_list_items,
};

const RECIPE: &str = "recipe";
const PLAN_ENTRY: &str = "meal plan entry";
const SHOPPING_ITEM: &str = "shopping list item";
const COLLECTION: &str = "recipe collection";
const MEMBERSHIP: &str = "collection recipe";

/// Diesel-backed implementation of the `MealRepository` port.
#[derive(Clone)]
pub struct DieselMealRepository {
    pool: DbPool,
}

impl DieselMealRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn meal_rank(meal_type: MealType) -> usize {
    MealType::ALL
        .iter()
        .position(|candidate| *candidate == meal_type)
        .unwrap_or(MealType::ALL.len())
}

async fn load_collection<C>(
    conn: &mut C,
    owner: Uuid,
    id: Uuid,
) -> Result<RecipeCollection, RepositoryError>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    let row = recipe_collections::table
        .find(id)
        .filter(recipe_collections::user_id.eq(owner))
        .select(CollectionRow::as_select())
        .first::<CollectionRow>(conn)
        .await
        .map_err(|err| map_diesel_error(err, COLLECTION))?;
    let recipe_ids = collection_recipes::table
        .filter(collection_recipes::collection_id.eq(id))
        .order(collection_recipes::added_at.asc())
        .select(collection_recipes::recipe_id)
        .load::<Uuid>(conn)
        .await
        .map_err(|err| map_diesel_error(err, MEMBERSHIP))?;
    Ok(row.with_recipes(recipe_ids))
}

#[async_trait]
impl MealRepository for DieselMealRepository {
    async fn create_recipe(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RepositoryError> {
        let fields = RecipeFields::try_from(draft)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(recipes::table)
            .values((
                recipes::id.eq(Uuid::new_v4()),
                recipes::user_id.eq(owner_id(owner)),
                fields,
            ))
            .returning(RecipeRow::as_returning())
            .get_result::<RecipeRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, RECIPE))?
            .try_into()
    }

    async fn list_recipes(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = recipes::table
            .filter(recipes::user_id.eq(owner_id(owner)))
            .select(RecipeRow::as_select())
            .order((recipes::title.asc(), recipes::created_at.asc()))
            .into_boxed();
        if let Some(tag) = filter.tag.as_deref() {
            query = query.filter(recipes::tags.contains(vec![tag.to_owned()]));
        }
        if let Some(needle) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = contains_pattern(needle);
            query = query.filter(
                recipes::title
                    .ilike(pattern.clone())
                    .or(recipes::description.ilike(pattern)),
            );
        }
        let rows = query
            .load::<RecipeRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, RECIPE))?;
        convert_rows(rows)
    }

    async fn find_recipes(
        &self,
        owner: &UserId,
        ids: &[Uuid],
    ) -> Result<Vec<Recipe>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = recipes::table
            .filter(recipes::user_id.eq(owner_id(owner)))
            .filter(recipes::id.eq_any(ids))
            .order(recipes::title.asc())
            .select(RecipeRow::as_select())
            .load::<RecipeRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, RECIPE))?;
        convert_rows(rows)
    }

    async fn find_recipe(&self, owner: &UserId, id: Uuid) -> Result<Recipe, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        recipes::table
            .find(id)
            .filter(recipes::user_id.eq(owner_id(owner)))
            .select(RecipeRow::as_select())
            .first::<RecipeRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, RECIPE))?
            .try_into()
    }

    async fn update_recipe(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RepositoryError> {
        let fields = RecipeFields::try_from(draft)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(recipes::table.find(id).filter(recipes::user_id.eq(owner_id(owner))))
            .set(fields)
            .returning(RecipeRow::as_returning())
            .get_result::<RecipeRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, RECIPE))?
            .try_into()
    }

    async fn delete_recipe(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, recipes, id, owner_id(owner), RECIPE)
    }

    async fn create_meal_plan_entry(
        &self,
        owner: &UserId,
        draft: &MealPlanDraft,
    ) -> Result<MealPlanEntry, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(recipe_id) = draft.recipe_id {
            require_owned!(&mut conn, recipes, recipe_id, owner, RECIPE);
        }
        diesel::insert_into(meal_plan_entries::table)
            .values((
                meal_plan_entries::id.eq(Uuid::new_v4()),
                meal_plan_entries::user_id.eq(owner),
                MealPlanFields::from(draft),
            ))
            .returning(MealPlanRow::as_returning())
            .get_result::<MealPlanRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, PLAN_ENTRY))?
            .try_into()
    }

    async fn list_meal_plan(
        &self,
        owner: &UserId,
        range: DateRange,
    ) -> Result<Vec<MealPlanEntry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = meal_plan_entries::table
            .filter(meal_plan_entries::user_id.eq(owner_id(owner)))
            .filter(meal_plan_entries::planned_on.between(range.from, range.to))
            .order((
                meal_plan_entries::planned_on.asc(),
                meal_plan_entries::created_at.asc(),
            ))
            .select(MealPlanRow::as_select())
            .load::<MealPlanRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, PLAN_ENTRY))?;
        let mut entries: Vec<MealPlanEntry> = convert_rows(rows)?;
        entries.sort_by_key(|entry| (entry.planned_on, meal_rank(entry.meal_type)));
        Ok(entries)
    }

    async fn update_meal_plan_entry(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &MealPlanDraft,
    ) -> Result<MealPlanEntry, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(recipe_id) = draft.recipe_id {
            require_owned!(&mut conn, recipes, recipe_id, owner, RECIPE);
        }
        diesel::update(
            meal_plan_entries::table
                .find(id)
                .filter(meal_plan_entries::user_id.eq(owner)),
        )
        .set(MealPlanFields::from(draft))
        .returning(MealPlanRow::as_returning())
        .get_result::<MealPlanRow>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, PLAN_ENTRY))?
        .try_into()
    }

    async fn delete_meal_plan_entry(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, meal_plan_entries, id, owner_id(owner), PLAN_ENTRY)
    }

    async fn add_shopping_items(
        &self,
        owner: &UserId,
        items: &[ShoppingItemDraft],
    ) -> Result<Vec<ShoppingListItem>, RepositoryError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let owner = owner_id(owner);
        let rows: Vec<ShoppingItemFields<'_>> = items
            .iter()
            .map(|item| ShoppingItemFields::new(owner, item))
            .collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(shopping_list_items::table)
            .values(&rows)
            .returning(ShoppingItemRow::as_returning())
            .get_results::<ShoppingItemRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, SHOPPING_ITEM))?;
        Ok(inserted.into_iter().map(ShoppingListItem::from).collect())
    }

    async fn list_shopping_items(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ShoppingListItem>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = shopping_list_items::table
            .filter(shopping_list_items::user_id.eq(owner_id(owner)))
            .order((
                shopping_list_items::is_checked.asc(),
                shopping_list_items::name.asc(),
            ))
            .select(ShoppingItemRow::as_select())
            .load::<ShoppingItemRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, SHOPPING_ITEM))?;
        Ok(rows.into_iter().map(ShoppingListItem::from).collect())
    }

    async fn toggle_shopping_item(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<ShoppingListItem, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            shopping_list_items::table
                .find(id)
                .filter(shopping_list_items::user_id.eq(owner_id(owner))),
        )
        .set(shopping_list_items::is_checked.eq(diesel::dsl::not(shopping_list_items::is_checked)))
        .returning(ShoppingItemRow::as_returning())
        .get_result::<ShoppingItemRow>(&mut conn)
        .await
        .map(ShoppingListItem::from)
        .map_err(|err| map_diesel_error(err, SHOPPING_ITEM))
    }

    async fn delete_shopping_item(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, shopping_list_items, id, owner_id(owner), SHOPPING_ITEM)
    }

    async fn clear_checked_items(&self, owner: &UserId) -> Result<usize, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(
            shopping_list_items::table
                .filter(shopping_list_items::user_id.eq(owner_id(owner)))
                .filter(shopping_list_items::is_checked.eq(true)),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, SHOPPING_ITEM))
    }

    async fn create_collection(
        &self,
        owner: &UserId,
        draft: &RecipeCollectionDraft,
    ) -> Result<RecipeCollection, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(recipe_collections::table)
            .values((
                recipe_collections::id.eq(Uuid::new_v4()),
                recipe_collections::user_id.eq(owner_id(owner)),
                CollectionFields::from(draft),
            ))
            .returning(CollectionRow::as_returning())
            .get_result::<CollectionRow>(&mut conn)
            .await
            .map(|row| row.with_recipes(Vec::new()))
            .map_err(|err| map_diesel_error(err, COLLECTION))
    }

    async fn list_collections(
        &self,
        owner: &UserId,
    ) -> Result<Vec<RecipeCollection>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = recipe_collections::table
            .filter(recipe_collections::user_id.eq(owner_id(owner)))
            .order(recipe_collections::name.asc())
            .select(CollectionRow::as_select())
            .load::<CollectionRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, COLLECTION))?;
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let members = collection_recipes::table
            .filter(collection_recipes::collection_id.eq_any(&ids))
            .order(collection_recipes::added_at.asc())
            .select((collection_recipes::collection_id, collection_recipes::recipe_id))
            .load::<(Uuid, Uuid)>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, MEMBERSHIP))?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let recipe_ids = members
                    .iter()
                    .filter(|(collection_id, _)| *collection_id == row.id)
                    .map(|(_, recipe_id)| *recipe_id)
                    .collect();
                row.with_recipes(recipe_ids)
            })
            .collect())
    }

    async fn find_collection(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<RecipeCollection, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_collection(&mut conn, owner_id(owner), id).await
    }

    async fn delete_collection(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, recipe_collections, id, owner_id(owner), COLLECTION)
    }

    async fn add_recipe_to_collection(
        &self,
        owner: &UserId,
        collection_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<RecipeCollection, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            async move {
                require_owned!(conn, recipe_collections, collection_id, owner, COLLECTION);
                require_owned!(conn, recipes, recipe_id, owner, RECIPE);
                diesel::insert_into(collection_recipes::table)
                    .values((
                        collection_recipes::collection_id.eq(collection_id),
                        collection_recipes::recipe_id.eq(recipe_id),
                    ))
                    .execute(conn)
                    .await
                    .map_err(|err| map_diesel_error(err, MEMBERSHIP))?;
                load_collection(conn, owner, collection_id).await
            }
            .scope_boxed()
        })
        .await
    }

    async fn remove_recipe_from_collection(
        &self,
        owner: &UserId,
        collection_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<RecipeCollection, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, recipe_collections, collection_id, owner, COLLECTION);
        let deleted = diesel::delete(collection_recipes::table.find((collection_id, recipe_id)))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, MEMBERSHIP))?;
        if deleted == 0 {
            return Err(RepositoryError::not_found(MEMBERSHIP));
        }
        load_collection(&mut conn, owner, collection_id).await
    }
}
