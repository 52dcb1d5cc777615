//! Recipe, meal plan, shopping list and collection rows.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Ingredient, MealPlanDraft, MealPlanEntry, Recipe, RecipeCollection, RecipeCollectionDraft,
    RecipeDraft, ShoppingItemDraft, ShoppingListItem,
};

use super::super::schema::{meal_plan_entries, recipe_collections, recipes, shopping_list_items};
use super::parse_label;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub servings: i32,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub ingredients: serde_json::Value,
    pub instructions: Option<String>,
    pub tags: Vec<String>,
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = RepositoryError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let ingredients: Vec<Ingredient> = serde_json::from_value(row.ingredients)
            .map_err(|err| RepositoryError::query(format!("stored ingredients invalid: {err}")))?;
        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            servings: row.servings,
            prep_minutes: row.prep_minutes,
            cook_minutes: row.cook_minutes,
            ingredients,
            instructions: row.instructions,
            tags: row.tags,
            source_url: row.source_url,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = recipes, treat_none_as_null = true)]
pub(crate) struct RecipeFields<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub servings: i32,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub ingredients: serde_json::Value,
    pub instructions: Option<&'a str>,
    pub tags: &'a [String],
    pub source_url: Option<&'a str>,
}

impl<'a> TryFrom<&'a RecipeDraft> for RecipeFields<'a> {
    type Error = RepositoryError;

    fn try_from(draft: &'a RecipeDraft) -> Result<Self, Self::Error> {
        let ingredients = serde_json::to_value(&draft.ingredients)
            .map_err(|err| RepositoryError::query(format!("ingredients not encodable: {err}")))?;
        Ok(Self {
            title: &draft.title,
            description: draft.description.as_deref(),
            servings: draft.servings,
            prep_minutes: draft.prep_minutes,
            cook_minutes: draft.cook_minutes,
            ingredients,
            instructions: draft.instructions.as_deref(),
            tags: &draft.tags,
            source_url: draft.source_url.as_deref(),
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = meal_plan_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MealPlanRow {
    pub id: Uuid,
    pub planned_on: NaiveDate,
    pub meal_type: String,
    pub recipe_id: Option<Uuid>,
    pub title: Option<String>,
    pub servings: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<MealPlanRow> for MealPlanEntry {
    type Error = RepositoryError;

    fn try_from(row: MealPlanRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            planned_on: row.planned_on,
            meal_type: parse_label(&row.meal_type)?,
            recipe_id: row.recipe_id,
            title: row.title,
            servings: row.servings,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = meal_plan_entries, treat_none_as_null = true)]
pub(crate) struct MealPlanFields<'a> {
    pub planned_on: NaiveDate,
    pub meal_type: &'static str,
    pub recipe_id: Option<Uuid>,
    pub title: Option<&'a str>,
    pub servings: Option<i32>,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a MealPlanDraft> for MealPlanFields<'a> {
    fn from(draft: &'a MealPlanDraft) -> Self {
        Self {
            planned_on: draft.planned_on,
            meal_type: draft.meal_type.as_str(),
            recipe_id: draft.recipe_id,
            title: draft.title.as_deref(),
            servings: draft.servings,
            notes: draft.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shopping_list_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShoppingItemRow {
    pub id: Uuid,
    pub name: String,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub is_checked: bool,
    pub recipe_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<ShoppingItemRow> for ShoppingListItem {
    fn from(row: ShoppingItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            category: row.category,
            is_checked: row.is_checked,
            recipe_id: row.recipe_id,
            created_at: row.created_at,
        }
    }
}

/// A full shopping row ready for a multi-row insert.
#[derive(Debug, Insertable)]
#[diesel(table_name = shopping_list_items)]
pub(crate) struct ShoppingItemFields<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub quantity: Option<&'a str>,
    pub category: Option<&'a str>,
    pub recipe_id: Option<Uuid>,
}

impl<'a> ShoppingItemFields<'a> {
    pub(crate) fn new(owner: Uuid, draft: &'a ShoppingItemDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: owner,
            name: &draft.name,
            quantity: draft.quantity.as_deref(),
            category: draft.category.as_deref(),
            recipe_id: draft.recipe_id,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipe_collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CollectionRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CollectionRow {
    /// Attach the member recipe ids loaded from `collection_recipes`.
    pub(crate) fn with_recipes(self, recipe_ids: Vec<Uuid>) -> RecipeCollection {
        RecipeCollection {
            id: self.id,
            name: self.name,
            description: self.description,
            recipe_ids,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = recipe_collections)]
pub(crate) struct CollectionFields<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a RecipeCollectionDraft> for CollectionFields<'a> {
    fn from(draft: &'a RecipeCollectionDraft) -> Self {
        Self {
            name: &draft.name,
            description: draft.description.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ingredients: serde_json::Value) -> RecipeRow {
        RecipeRow {
            id: Uuid::nil(),
            title: "Soup".into(),
            description: None,
            servings: 4,
            prep_minutes: None,
            cook_minutes: Some(30),
            ingredients,
            instructions: None,
            tags: vec!["winter".into()],
            source_url: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn stored_ingredients_decode() {
        let recipe = Recipe::try_from(row(serde_json::json!([
            {"name": "leek", "amount": "2"},
            {"name": "salt"}
        ])))
        .expect("decodes");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1].amount, None);
    }

    #[test]
    fn malformed_ingredients_are_query_errors() {
        let err = Recipe::try_from(row(serde_json::json!({"name": "leek"})))
            .expect_err("object is not a list");
        assert!(matches!(err, RepositoryError::Query { .. }));
    }
}
