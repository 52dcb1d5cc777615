//! Recipes, meal planning, the shopping list and recipe collections.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ingredients::{scale_amount, servings_multiplier};
use super::labels::labelled_enum;
use super::validation::{FieldViolation, optional_text, required_text};

/// One line of a recipe's ingredient list.
///
/// Stored as JSON inside the recipe row, hence the serde derives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub servings: i32,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Option<String>,
    pub tags: Vec<String>,
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn total_minutes(&self) -> Option<i32> {
        match (self.prep_minutes, self.cook_minutes) {
            (None, None) => None,
            (prep, cook) => Some(prep.unwrap_or(0) + cook.unwrap_or(0)),
        }
    }

    /// Ingredients with amounts scaled from the recipe's servings to
    /// `servings`.
    pub fn scaled_ingredients(&self, servings: i32) -> Result<Vec<Ingredient>, FieldViolation> {
        let multiplier = servings_multiplier(self.servings, servings)?;
        Ok(self
            .ingredients
            .iter()
            .map(|ingredient| Ingredient {
                name: ingredient.name.clone(),
                amount: ingredient
                    .amount
                    .as_deref()
                    .map(|amount| scale_amount(amount, multiplier)),
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: Option<String>,
    pub servings: i32,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Option<String>,
    pub tags: Vec<String>,
    pub source_url: Option<String>,
}

impl RecipeDraft {
    /// Tags are trimmed, lower-cased and de-duplicated in first-seen order;
    /// ingredients with blank names are rejected.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        if !(1..=100).contains(&self.servings) {
            return Err(FieldViolation::out_of_range("servings", 1, 100));
        }
        let durations = [
            ("prepMinutes", self.prep_minutes),
            ("cookMinutes", self.cook_minutes),
        ];
        for (field, minutes) in durations {
            if minutes.is_some_and(|m| m < 0) {
                return Err(FieldViolation::negative(field));
            }
        }
        let ingredients = self
            .ingredients
            .iter()
            .map(|ingredient| {
                Ok(Ingredient {
                    name: required_text("ingredients.name", &ingredient.name, 200)?,
                    amount: optional_text("ingredients.amount", ingredient.amount.as_deref(), 100)?,
                })
            })
            .collect::<Result<Vec<_>, FieldViolation>>()?;
        Ok(Self {
            title: required_text("title", &self.title, 200)?,
            description: optional_text("description", self.description.as_deref(), 2_000)?,
            ingredients,
            instructions: optional_text("instructions", self.instructions.as_deref(), 20_000)?,
            tags: normalise_tags(&self.tags),
            source_url: optional_text("sourceUrl", self.source_url.as_deref(), 2_000)?,
            ..self
        })
    }
}

/// Trim, lower-case and de-duplicate tags, dropping blanks.
pub fn normalise_tags(tags: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

/// Recipe listing filters; `q` matches title or description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub tag: Option<String>,
    pub q: Option<String>,
}

labelled_enum! {
    pub enum MealType as "meal type" {
        Breakfast => "breakfast",
        Lunch => "lunch",
        Dinner => "dinner",
        Snack => "snack",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPlanEntry {
    pub id: Uuid,
    pub planned_on: NaiveDate,
    pub meal_type: MealType,
    pub recipe_id: Option<Uuid>,
    pub title: Option<String>,
    pub servings: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPlanDraft {
    pub planned_on: NaiveDate,
    pub meal_type: MealType,
    pub recipe_id: Option<Uuid>,
    pub title: Option<String>,
    pub servings: Option<i32>,
    pub notes: Option<String>,
}

impl MealPlanDraft {
    /// An entry names a recipe, a free-text title, or both.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        let title = optional_text("title", self.title.as_deref(), 200)?;
        if title.is_none() && self.recipe_id.is_none() {
            return Err(FieldViolation::new(
                "title",
                "required",
                "a meal plan entry needs a recipeId or a title",
            ));
        }
        if self.servings.is_some_and(|s| !(1..=100).contains(&s)) {
            return Err(FieldViolation::out_of_range("servings", 1, 100));
        }
        Ok(Self {
            title,
            notes: optional_text("notes", self.notes.as_deref(), 2_000)?,
            ..self
        })
    }
}

/// Inclusive date window for meal plan queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, FieldViolation> {
        if from > to {
            return Err(FieldViolation::new(
                "to",
                "before_from",
                "to must not be before from",
            ));
        }
        Ok(Self { from, to })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub is_checked: bool,
    pub recipe_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItemDraft {
    pub name: String,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub recipe_id: Option<Uuid>,
}

impl ShoppingItemDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", &self.name, 200)?,
            quantity: optional_text("quantity", self.quantity.as_deref(), 100)?,
            category: optional_text("category", self.category.as_deref(), 60)?,
            ..self
        })
    }
}

/// Shopping items for every recipe planned in `entries`.
///
/// Each ingredient becomes one item, its amount scaled to the entry's
/// servings (or left as written when the entry has none). Entries without a
/// recipe, or whose recipe is missing from `recipes`, contribute nothing.
pub fn shopping_items_from_plan(
    entries: &[MealPlanEntry],
    recipes: &[Recipe],
) -> Vec<ShoppingItemDraft> {
    let by_id: HashMap<Uuid, &Recipe> = recipes.iter().map(|r| (r.id, r)).collect();
    entries
        .iter()
        .filter_map(|entry| {
            let recipe = by_id.get(&entry.recipe_id?).copied()?;
            let servings = entry.servings.unwrap_or(recipe.servings);
            let ingredients = recipe
                .scaled_ingredients(servings)
                .unwrap_or_else(|_| recipe.ingredients.clone());
            Some(ingredients.into_iter().map(move |ingredient| ShoppingItemDraft {
                name: ingredient.name,
                quantity: ingredient.amount,
                category: None,
                recipe_id: Some(recipe.id),
            }))
        })
        .flatten()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCollection {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub recipe_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCollectionDraft {
    pub name: String,
    pub description: Option<String>,
}

impl RecipeCollectionDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", &self.name, 120)?,
            description: optional_text("description", self.description.as_deref(), 2_000)?,
        })
    }
}
