//! Meal handlers: recipes, the meal plan, the shopping list and recipe
//! collections.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    ApiResult, DateRange, Error, Ingredient, MealPlanDraft, MealPlanEntry, MealType, Recipe,
    RecipeCollection, RecipeCollectionDraft, RecipeDraft, RecipeFilter, ShoppingItemDraft,
    ShoppingListItem, shopping_items_from_plan,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ID_FIELD, parse_label, parse_uuid};

/// Days shown by the meal plan when no `to` bound is given.
const PLAN_DEFAULT_DAYS: i64 = 6;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDto {
    #[schema(example = "plain flour")]
    pub name: String,
    #[schema(example = "250 g")]
    pub amount: Option<String>,
}

impl From<IngredientDto> for Ingredient {
    fn from(value: IngredientDto) -> Self {
        Self {
            name: value.name,
            amount: value.amount,
        }
    }
}

impl From<Ingredient> for IngredientDto {
    fn from(value: Ingredient) -> Self {
        Self {
            name: value.name,
            amount: value.amount,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[schema(example = "Pancakes")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = 4)]
    pub servings: i32,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    #[serde(default)]
    pub ingredients: Vec<IngredientDto>,
    pub instructions: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub source_url: Option<String>,
}

impl From<RecipeRequest> for RecipeDraft {
    fn from(value: RecipeRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            servings: value.servings,
            prep_minutes: value.prep_minutes,
            cook_minutes: value.cook_minutes,
            ingredients: value.ingredients.into_iter().map(Into::into).collect(),
            instructions: value.instructions,
            tags: value.tags,
            source_url: value.source_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub servings: i32,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub total_minutes: Option<i32>,
    pub ingredients: Vec<IngredientDto>,
    pub instructions: Option<String>,
    pub tags: Vec<String>,
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(value: Recipe) -> Self {
        Self {
            total_minutes: value.total_minutes(),
            id: value.id,
            title: value.title,
            description: value.description,
            servings: value.servings,
            prep_minutes: value.prep_minutes,
            cook_minutes: value.cook_minutes,
            ingredients: value.ingredients.into_iter().map(Into::into).collect(),
            instructions: value.instructions,
            tags: value.tags,
            source_url: value.source_url,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeQuery {
    /// Exact tag, case-insensitive.
    pub tag: Option<String>,
    /// Matches title or description.
    pub q: Option<String>,
}

impl RecipeQuery {
    fn to_filter(&self) -> RecipeFilter {
        let clean = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_owned)
        };
        RecipeFilter {
            tag: clean(&self.tag).map(|tag| tag.to_lowercase()),
            q: clean(&self.q),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScaleQuery {
    #[param(example = 8)]
    pub servings: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScaledRecipeResponse {
    pub recipe_id: Uuid,
    pub original_servings: i32,
    pub servings: i32,
    pub ingredients: Vec<IngredientDto>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    pub planned_on: NaiveDate,
    #[schema(example = "dinner")]
    pub meal_type: String,
    pub recipe_id: Option<Uuid>,
    pub title: Option<String>,
    pub servings: Option<i32>,
    pub notes: Option<String>,
}

impl MealPlanRequest {
    fn into_draft(self) -> ApiResult<MealPlanDraft> {
        let meal_type: MealType = parse_label(&self.meal_type, FieldName::new("mealType"))?;
        let draft = MealPlanDraft {
            planned_on: self.planned_on,
            meal_type,
            recipe_id: self.recipe_id,
            title: self.title,
            servings: self.servings,
            notes: self.notes,
        };
        Ok(draft.validated()?)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub id: Uuid,
    pub planned_on: NaiveDate,
    pub meal_type: String,
    pub recipe_id: Option<Uuid>,
    pub title: Option<String>,
    pub servings: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MealPlanEntry> for MealPlanResponse {
    fn from(value: MealPlanEntry) -> Self {
        Self {
            id: value.id,
            planned_on: value.planned_on,
            meal_type: value.meal_type.as_str().to_owned(),
            recipe_id: value.recipe_id,
            title: value.title,
            servings: value.servings,
            notes: value.notes,
            created_at: value.created_at,
        }
    }
}

/// Inclusive plan window; defaults to the week starting today.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlanRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl PlanRangeQuery {
    fn to_range(&self, today: NaiveDate) -> ApiResult<DateRange> {
        let from = self.from.unwrap_or(today);
        let to = self.to.unwrap_or(from + Duration::days(PLAN_DEFAULT_DAYS));
        Ok(DateRange::new(from, to)?)
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanWindowRequest {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemRequest {
    #[schema(example = "Eggs")]
    pub name: String,
    #[schema(example = "12")]
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub recipe_id: Option<Uuid>,
}

impl From<ShoppingItemRequest> for ShoppingItemDraft {
    fn from(value: ShoppingItemRequest) -> Self {
        Self {
            name: value.name,
            quantity: value.quantity,
            category: value.category,
            recipe_id: value.recipe_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemResponse {
    pub id: Uuid,
    pub name: String,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub is_checked: bool,
    pub recipe_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<ShoppingListItem> for ShoppingItemResponse {
    fn from(value: ShoppingListItem) -> Self {
        Self {
            id: value.id,
            name: value.name,
            quantity: value.quantity,
            category: value.category,
            is_checked: value.is_checked,
            recipe_id: value.recipe_id,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearCheckedResponse {
    pub removed: usize,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRequest {
    #[schema(example = "Weeknight dinners")]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecipeRequest {
    pub recipe_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub recipe_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<RecipeCollection> for CollectionResponse {
    fn from(value: RecipeCollection) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            recipe_ids: value.recipe_ids,
            created_at: value.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = RecipeDraft::from(payload.into_inner()).validated()?;
    let recipe = state.meals.create_recipe(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(RecipeResponse::from(recipe)))
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(RecipeQuery),
    responses((status = 200, description = "Recipes by title", body = [RecipeResponse])),
    tags = ["meals"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RecipeQuery>,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let owner = session.require_user_id()?;
    let recipes = state.meals.list_recipes(&owner, &query.to_filter()).await?;
    Ok(web::Json(recipes.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = Uuid, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let recipe = state.meals.find_recipe(&owner, id).await?;
    Ok(web::Json(recipe.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = Uuid, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = RecipeDraft::from(payload.into_inner()).validated()?;
    let recipe = state.meals.update_recipe(&owner, id, &draft).await?;
    Ok(web::Json(recipe.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = Uuid, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.meals.delete_recipe(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Ingredient amounts rescaled to `servings`.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}/scaled",
    params(("id" = Uuid, Path, description = "Recipe id"), ScaleQuery),
    responses(
        (status = 200, description = "Scaled ingredients", body = ScaledRecipeResponse),
        (status = 400, description = "Servings out of range", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "scaleRecipe"
)]
#[get("/recipes/{id}/scaled")]
pub async fn scaled_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<ScaleQuery>,
) -> ApiResult<web::Json<ScaledRecipeResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let recipe = state.meals.find_recipe(&owner, id).await?;
    let ingredients = recipe.scaled_ingredients(query.servings)?;
    Ok(web::Json(ScaledRecipeResponse {
        recipe_id: recipe.id,
        original_servings: recipe.servings,
        servings: query.servings,
        ingredients: ingredients.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/meal-plan",
    request_body = MealPlanRequest,
    responses(
        (status = 201, description = "Meal planned", body = MealPlanResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "createMealPlanEntry"
)]
#[post("/meal-plan")]
pub async fn create_meal_plan_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MealPlanRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let entry = state.meals.create_meal_plan_entry(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(MealPlanResponse::from(entry)))
}

#[utoipa::path(
    get,
    path = "/api/v1/meal-plan",
    params(PlanRangeQuery),
    responses(
        (status = 200, description = "Entries by date and meal", body = [MealPlanResponse]),
        (status = 400, description = "Invalid range", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "listMealPlan"
)]
#[get("/meal-plan")]
pub async fn list_meal_plan(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PlanRangeQuery>,
) -> ApiResult<web::Json<Vec<MealPlanResponse>>> {
    let owner = session.require_user_id()?;
    let range = query.to_range(state.today())?;
    let entries = state.meals.list_meal_plan(&owner, range).await?;
    Ok(web::Json(entries.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/api/v1/meal-plan/{id}",
    params(("id" = Uuid, Path, description = "Entry id")),
    request_body = MealPlanRequest,
    responses(
        (status = 200, description = "Entry updated", body = MealPlanResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "updateMealPlanEntry"
)]
#[put("/meal-plan/{id}")]
pub async fn update_meal_plan_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<MealPlanRequest>,
) -> ApiResult<web::Json<MealPlanResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let draft = payload.into_inner().into_draft()?;
    let entry = state.meals.update_meal_plan_entry(&owner, id, &draft).await?;
    Ok(web::Json(entry.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/meal-plan/{id}",
    params(("id" = Uuid, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "deleteMealPlanEntry"
)]
#[delete("/meal-plan/{id}")]
pub async fn delete_meal_plan_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.meals.delete_meal_plan_entry(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/shopping-list",
    request_body = ShoppingItemRequest,
    responses(
        (status = 201, description = "Item added", body = ShoppingItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "addShoppingItem"
)]
#[post("/shopping-list")]
pub async fn add_shopping_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ShoppingItemRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = ShoppingItemDraft::from(payload.into_inner()).validated()?;
    let items = state
        .meals
        .add_shopping_items(&owner, std::slice::from_ref(&draft))
        .await?;
    let item = items
        .into_iter()
        .next()
        .map(ShoppingItemResponse::from)
        .ok_or_else(|| Error::internal("shopping item was not stored"))?;
    Ok(HttpResponse::Created().json(item))
}

#[utoipa::path(
    get,
    path = "/api/v1/shopping-list",
    responses((status = 200, description = "Unchecked items first", body = [ShoppingItemResponse])),
    tags = ["meals"],
    operation_id = "listShoppingItems"
)]
#[get("/shopping-list")]
pub async fn list_shopping_items(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ShoppingItemResponse>>> {
    let owner = session.require_user_id()?;
    let items = state.meals.list_shopping_items(&owner).await?;
    Ok(web::Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/shopping-list/clear-checked",
    responses((status = 200, description = "Checked items removed", body = ClearCheckedResponse)),
    tags = ["meals"],
    operation_id = "clearCheckedShoppingItems"
)]
#[post("/shopping-list/clear-checked")]
pub async fn clear_checked(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ClearCheckedResponse>> {
    let owner = session.require_user_id()?;
    let removed = state.meals.clear_checked_items(&owner).await?;
    Ok(web::Json(ClearCheckedResponse { removed }))
}

/// One item per ingredient of every recipe planned in the window, scaled to
/// the entry's servings.
#[utoipa::path(
    post,
    path = "/api/v1/shopping-list/from-meal-plan",
    request_body = PlanWindowRequest,
    responses(
        (status = 201, description = "Items added", body = [ShoppingItemResponse]),
        (status = 400, description = "Invalid range", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "shoppingListFromMealPlan"
)]
#[post("/shopping-list/from-meal-plan")]
pub async fn from_meal_plan(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PlanWindowRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let range = DateRange::new(payload.from, payload.to)?;
    let entries = state.meals.list_meal_plan(&owner, range).await?;
    let mut recipe_ids: Vec<Uuid> = entries.iter().filter_map(|e| e.recipe_id).collect();
    recipe_ids.sort_unstable();
    recipe_ids.dedup();
    if recipe_ids.is_empty() {
        return Ok(HttpResponse::Created().json(Vec::<ShoppingItemResponse>::new()));
    }
    let recipes = state.meals.find_recipes(&owner, &recipe_ids).await?;
    let drafts = shopping_items_from_plan(&entries, &recipes);
    if drafts.is_empty() {
        return Ok(HttpResponse::Created().json(Vec::<ShoppingItemResponse>::new()));
    }
    let items = state.meals.add_shopping_items(&owner, &drafts).await?;
    let body: Vec<ShoppingItemResponse> = items.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Created().json(body))
}

#[utoipa::path(
    post,
    path = "/api/v1/shopping-list/{id}/toggle",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, description = "Checked flag flipped", body = ShoppingItemResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "toggleShoppingItem"
)]
#[post("/shopping-list/{id}/toggle")]
pub async fn toggle_shopping_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ShoppingItemResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let item = state.meals.toggle_shopping_item(&owner, id).await?;
    Ok(web::Json(item.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/shopping-list/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "deleteShoppingItem"
)]
#[delete("/shopping-list/{id}")]
pub async fn delete_shopping_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.meals.delete_shopping_item(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/collections",
    request_body = CollectionRequest,
    responses(
        (status = 201, description = "Collection created", body = CollectionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "createCollection"
)]
#[post("/collections")]
pub async fn create_collection(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CollectionRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let CollectionRequest { name, description } = payload.into_inner();
    let draft = RecipeCollectionDraft { name, description }.validated()?;
    let collection = state.meals.create_collection(&owner, &draft).await?;
    Ok(HttpResponse::Created().json(CollectionResponse::from(collection)))
}

#[utoipa::path(
    get,
    path = "/api/v1/collections",
    responses((status = 200, description = "Collections", body = [CollectionResponse])),
    tags = ["meals"],
    operation_id = "listCollections"
)]
#[get("/collections")]
pub async fn list_collections(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CollectionResponse>>> {
    let owner = session.require_user_id()?;
    let collections = state.meals.list_collections(&owner).await?;
    Ok(web::Json(collections.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/collections/{id}",
    params(("id" = Uuid, Path, description = "Collection id")),
    responses(
        (status = 200, description = "Collection", body = CollectionResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "getCollection"
)]
#[get("/collections/{id}")]
pub async fn get_collection(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CollectionResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let collection = state.meals.find_collection(&owner, id).await?;
    Ok(web::Json(collection.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/collections/{id}",
    params(("id" = Uuid, Path, description = "Collection id")),
    responses(
        (status = 204, description = "Collection deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "deleteCollection"
)]
#[delete("/collections/{id}")]
pub async fn delete_collection(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    state.meals.delete_collection(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/collections/{id}/recipes",
    params(("id" = Uuid, Path, description = "Collection id")),
    request_body = CollectionRecipeRequest,
    responses(
        (status = 200, description = "Recipe added", body = CollectionResponse),
        (status = 404, description = "Collection or recipe not found", body = ErrorSchema),
        (status = 409, description = "Recipe already in the collection", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "addRecipeToCollection"
)]
#[post("/collections/{id}/recipes")]
pub async fn add_collection_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CollectionRecipeRequest>,
) -> ApiResult<web::Json<CollectionResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path, ID_FIELD)?;
    let collection = state
        .meals
        .add_recipe_to_collection(&owner, id, payload.recipe_id)
        .await?;
    Ok(web::Json(collection.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/collections/{id}/recipes/{recipeId}",
    params(
        ("id" = Uuid, Path, description = "Collection id"),
        ("recipeId" = Uuid, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "Recipe removed", body = CollectionResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "removeRecipeFromCollection"
)]
#[delete("/collections/{id}/recipes/{recipe_id}")]
pub async fn remove_collection_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<CollectionResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_uuid(&path.0, ID_FIELD)?;
    let recipe_id = parse_uuid(&path.1, FieldName::new("recipeId"))?;
    let collection = state
        .meals
        .remove_recipe_from_collection(&owner, id, recipe_id)
        .await?;
    Ok(web::Json(collection.into()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_recipe)
        .service(list_recipes)
        .service(get_recipe)
        .service(update_recipe)
        .service(delete_recipe)
        .service(scaled_recipe)
        .service(create_meal_plan_entry)
        .service(list_meal_plan)
        .service(update_meal_plan_entry)
        .service(delete_meal_plan_entry)
        .service(add_shopping_item)
        .service(list_shopping_items)
        .service(clear_checked)
        .service(from_meal_plan)
        .service(toggle_shopping_item)
        .service(delete_shopping_item)
        .service(create_collection)
        .service(list_collections)
        .service(get_collection)
        .service(delete_collection)
        .service(add_collection_recipe)
        .service(remove_collection_recipe);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RepositoryError;
    use crate::inbound::http::test_utils::{MockPorts, login_cookie, test_app, today};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    fn pancakes(id: Uuid) -> Recipe {
        Recipe {
            id,
            title: "Pancakes".into(),
            description: None,
            servings: 4,
            prep_minutes: Some(10),
            cook_minutes: Some(15),
            ingredients: vec![
                Ingredient {
                    name: "flour".into(),
                    amount: Some("200 g".into()),
                },
                Ingredient {
                    name: "salt".into(),
                    amount: None,
                },
            ],
            instructions: None,
            tags: vec!["breakfast".into()],
            source_url: None,
            created_at: Utc::now(),
        }
    }

    fn planned(recipe_id: Option<Uuid>, servings: Option<i32>) -> MealPlanEntry {
        MealPlanEntry {
            id: Uuid::new_v4(),
            planned_on: today(),
            meal_type: MealType::Breakfast,
            recipe_id,
            title: None,
            servings,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn scaling_doubles_amounts() {
        let mut ports = MockPorts::default();
        ports
            .meals
            .expect_find_recipe()
            .returning(|_, id| Ok(pancakes(id)));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/recipes/{}/scaled?servings=8", Uuid::new_v4()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["originalServings"], 4);
        assert_eq!(body["ingredients"][0]["amount"], "400 g");
        assert!(body["ingredients"][1]["amount"].is_null());
    }

    #[actix_web::test]
    async fn scaling_to_zero_servings_is_rejected() {
        let mut ports = MockPorts::default();
        ports
            .meals
            .expect_find_recipe()
            .returning(|_, id| Ok(pancakes(id)));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/recipes/{}/scaled?servings=0", Uuid::new_v4()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn meal_plan_defaults_to_the_coming_week() {
        let mut ports = MockPorts::default();
        ports
            .meals
            .expect_list_meal_plan()
            .withf(|_, range| {
                range.from == today() && range.to == today() + Duration::days(PLAN_DEFAULT_DAYS)
            })
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/meal-plan")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn shopping_list_is_built_from_planned_recipes() {
        let recipe_id = Uuid::new_v4();
        let mut ports = MockPorts::default();
        ports.meals.expect_list_meal_plan().returning(move |_, _| {
            Ok(vec![planned(Some(recipe_id), Some(2)), planned(None, None)])
        });
        ports
            .meals
            .expect_find_recipes()
            .withf(move |_, ids| ids.len() == 1 && ids[0] == recipe_id)
            .returning(move |_, _| Ok(vec![pancakes(recipe_id)]));
        ports
            .meals
            .expect_add_shopping_items()
            .withf(move |_, items| {
                items.len() == 2
                    && items[0].quantity.as_deref() == Some("100 g")
                    && items.iter().all(|item| item.recipe_id == Some(recipe_id))
            })
            .times(1)
            .returning(|_, items| {
                Ok(items
                    .iter()
                    .map(|draft| ShoppingListItem {
                        id: Uuid::new_v4(),
                        name: draft.name.clone(),
                        quantity: draft.quantity.clone(),
                        category: None,
                        is_checked: false,
                        recipe_id: draft.recipe_id,
                        created_at: Utc::now(),
                    })
                    .collect())
            });
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/shopping-list/from-meal-plan")
                .cookie(cookie)
                .set_json(json!({"from": "2026-03-15", "to": "2026-03-21"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn reversed_windows_are_rejected() {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/shopping-list/from-meal-plan")
                .cookie(cookie)
                .set_json(json!({"from": "2026-03-21", "to": "2026-03-15"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "to");
    }

    #[actix_web::test]
    async fn duplicate_collection_recipes_conflict() {
        let mut ports = MockPorts::default();
        ports
            .meals
            .expect_add_recipe_to_collection()
            .returning(|_, _, _| Err(RepositoryError::already_exists("collection recipe")));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/collections/{}/recipes", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({"recipeId": Uuid::new_v4()}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn recipe_filters_drop_blanks_and_lowercase_tags() {
        let query = RecipeQuery {
            tag: Some(" Vegan ".into()),
            q: Some("  ".into()),
        };
        assert_eq!(
            query.to_filter(),
            RecipeFilter {
                tag: Some("vegan".into()),
                q: None,
            }
        );
    }
}
