//! Port for recipes, meal plans, the shopping list and collections.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    DateRange, MealPlanDraft, MealPlanEntry, Recipe, RecipeCollection, RecipeCollectionDraft,
    RecipeDraft, RecipeFilter, ShoppingItemDraft, ShoppingListItem, UserId,
};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepository: Send + Sync {
    async fn create_recipe(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RepositoryError>;

    /// Recipes ordered by title.
    async fn list_recipes(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RepositoryError>;

    /// Recipes among `ids` owned by `owner`; unknown ids are skipped.
    async fn find_recipes(
        &self,
        owner: &UserId,
        ids: &[Uuid],
    ) -> Result<Vec<Recipe>, RepositoryError>;

    async fn find_recipe(&self, owner: &UserId, id: Uuid) -> Result<Recipe, RepositoryError>;

    async fn update_recipe(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RepositoryError>;

    async fn delete_recipe(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Plan an entry; a named recipe must belong to `owner`.
    async fn create_meal_plan_entry(
        &self,
        owner: &UserId,
        draft: &MealPlanDraft,
    ) -> Result<MealPlanEntry, RepositoryError>;

    /// Entries within `range` ordered by date then meal type.
    async fn list_meal_plan(
        &self,
        owner: &UserId,
        range: DateRange,
    ) -> Result<Vec<MealPlanEntry>, RepositoryError>;

    async fn update_meal_plan_entry(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &MealPlanDraft,
    ) -> Result<MealPlanEntry, RepositoryError>;

    async fn delete_meal_plan_entry(&self, owner: &UserId, id: Uuid)
    -> Result<(), RepositoryError>;

    /// Insert shopping items in one statement.
    async fn add_shopping_items(
        &self,
        owner: &UserId,
        items: &[ShoppingItemDraft],
    ) -> Result<Vec<ShoppingListItem>, RepositoryError>;

    /// Unchecked items first, then by name.
    async fn list_shopping_items(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ShoppingListItem>, RepositoryError>;

    /// Flip the checked flag of one item.
    async fn toggle_shopping_item(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<ShoppingListItem, RepositoryError>;

    async fn delete_shopping_item(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Delete every checked item, returning how many were removed.
    async fn clear_checked_items(&self, owner: &UserId) -> Result<usize, RepositoryError>;

    async fn create_collection(
        &self,
        owner: &UserId,
        draft: &RecipeCollectionDraft,
    ) -> Result<RecipeCollection, RepositoryError>;

    async fn list_collections(
        &self,
        owner: &UserId,
    ) -> Result<Vec<RecipeCollection>, RepositoryError>;

    async fn find_collection(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<RecipeCollection, RepositoryError>;

    async fn delete_collection(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Add a recipe to a collection; already present is `AlreadyExists`.
    async fn add_recipe_to_collection(
        &self,
        owner: &UserId,
        collection_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<RecipeCollection, RepositoryError>;

    async fn remove_recipe_from_collection(
        &self,
        owner: &UserId,
        collection_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<RecipeCollection, RepositoryError>;
}
