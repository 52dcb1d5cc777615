//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every `#[utoipa::path]` handler of the inbound HTTP
//! layer. Request and response DTOs are collected from those paths; the
//! error envelope is registered explicitly through [`ErrorSchema`] so the
//! domain error type stays free of utoipa derives.
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported with `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /api/v1/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "wellf API",
        description = "Household management: people, bills, insurance, maintenance, vehicles, \
                       finances, reading, meals, plants, reminders, documents and snippets."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::households::create_household,
        crate::inbound::http::households::list_households,
        crate::inbound::http::households::get_household,
        crate::inbound::http::households::rename_household,
        crate::inbound::http::households::delete_household,
        crate::inbound::http::households::create_person,
        crate::inbound::http::households::list_people,
        crate::inbound::http::households::get_person,
        crate::inbound::http::households::update_person,
        crate::inbound::http::households::delete_person,
        crate::inbound::http::households::create_relationship,
        crate::inbound::http::households::list_relationships,
        crate::inbound::http::households::delete_relationship,
        crate::inbound::http::bills::create_bill,
        crate::inbound::http::bills::list_bills,
        crate::inbound::http::bills::upcoming_bills,
        crate::inbound::http::bills::get_bill,
        crate::inbound::http::bills::update_bill,
        crate::inbound::http::bills::delete_bill,
        crate::inbound::http::bills::record_payment,
        crate::inbound::http::bills::list_payments,
        crate::inbound::http::bills::create_subscription,
        crate::inbound::http::bills::list_subscriptions,
        crate::inbound::http::bills::subscription_summary,
        crate::inbound::http::bills::get_subscription,
        crate::inbound::http::bills::update_subscription,
        crate::inbound::http::bills::delete_subscription,
        crate::inbound::http::insurance::create_policy,
        crate::inbound::http::insurance::list_policies,
        crate::inbound::http::insurance::renewals,
        crate::inbound::http::insurance::get_policy,
        crate::inbound::http::insurance::update_policy,
        crate::inbound::http::insurance::delete_policy,
        crate::inbound::http::maintenance::create_task,
        crate::inbound::http::maintenance::list_tasks,
        crate::inbound::http::maintenance::overdue_tasks,
        crate::inbound::http::maintenance::get_task,
        crate::inbound::http::maintenance::update_task,
        crate::inbound::http::maintenance::delete_task,
        crate::inbound::http::maintenance::complete_task,
        crate::inbound::http::maintenance::list_logs,
        crate::inbound::http::vehicles::create_vehicle,
        crate::inbound::http::vehicles::list_vehicles,
        crate::inbound::http::vehicles::get_vehicle,
        crate::inbound::http::vehicles::update_vehicle,
        crate::inbound::http::vehicles::delete_vehicle,
        crate::inbound::http::vehicles::add_service_record,
        crate::inbound::http::vehicles::list_service_records,
        crate::inbound::http::vehicles::delete_service_record,
        crate::inbound::http::finance::create_portfolio,
        crate::inbound::http::finance::list_portfolios,
        crate::inbound::http::finance::get_portfolio,
        crate::inbound::http::finance::update_portfolio,
        crate::inbound::http::finance::delete_portfolio,
        crate::inbound::http::finance::portfolio_summary,
        crate::inbound::http::finance::create_holding,
        crate::inbound::http::finance::list_holdings,
        crate::inbound::http::finance::update_holding,
        crate::inbound::http::finance::delete_holding,
        crate::inbound::http::finance::create_transaction,
        crate::inbound::http::finance::list_transactions,
        crate::inbound::http::finance::delete_transaction,
        crate::inbound::http::finance::create_cash_account,
        crate::inbound::http::finance::list_cash_accounts,
        crate::inbound::http::finance::get_cash_account,
        crate::inbound::http::finance::update_cash_account,
        crate::inbound::http::finance::delete_cash_account,
        crate::inbound::http::finance::create_fixed_asset,
        crate::inbound::http::finance::list_fixed_assets,
        crate::inbound::http::finance::get_fixed_asset,
        crate::inbound::http::finance::update_fixed_asset,
        crate::inbound::http::finance::delete_fixed_asset,
        crate::inbound::http::finance::net_worth,
        crate::inbound::http::reading::create_book,
        crate::inbound::http::reading::list_books,
        crate::inbound::http::reading::get_book,
        crate::inbound::http::reading::update_book,
        crate::inbound::http::reading::delete_book,
        crate::inbound::http::reading::create_list,
        crate::inbound::http::reading::list_lists,
        crate::inbound::http::reading::get_list,
        crate::inbound::http::reading::update_list,
        crate::inbound::http::reading::delete_list,
        crate::inbound::http::reading::add_entry,
        crate::inbound::http::reading::list_entries,
        crate::inbound::http::reading::update_entry,
        crate::inbound::http::reading::remove_entry,
        crate::inbound::http::reading::move_entry,
        crate::inbound::http::reading::create_goal,
        crate::inbound::http::reading::list_goals,
        crate::inbound::http::reading::update_goal,
        crate::inbound::http::reading::delete_goal,
        crate::inbound::http::meals::create_recipe,
        crate::inbound::http::meals::list_recipes,
        crate::inbound::http::meals::get_recipe,
        crate::inbound::http::meals::update_recipe,
        crate::inbound::http::meals::delete_recipe,
        crate::inbound::http::meals::scaled_recipe,
        crate::inbound::http::meals::create_meal_plan_entry,
        crate::inbound::http::meals::list_meal_plan,
        crate::inbound::http::meals::update_meal_plan_entry,
        crate::inbound::http::meals::delete_meal_plan_entry,
        crate::inbound::http::meals::add_shopping_item,
        crate::inbound::http::meals::list_shopping_items,
        crate::inbound::http::meals::clear_checked,
        crate::inbound::http::meals::from_meal_plan,
        crate::inbound::http::meals::toggle_shopping_item,
        crate::inbound::http::meals::delete_shopping_item,
        crate::inbound::http::meals::create_collection,
        crate::inbound::http::meals::list_collections,
        crate::inbound::http::meals::get_collection,
        crate::inbound::http::meals::delete_collection,
        crate::inbound::http::meals::add_collection_recipe,
        crate::inbound::http::meals::remove_collection_recipe,
        crate::inbound::http::plants::create_plant,
        crate::inbound::http::plants::list_plants,
        crate::inbound::http::plants::plants_due,
        crate::inbound::http::plants::get_plant,
        crate::inbound::http::plants::update_plant,
        crate::inbound::http::plants::delete_plant,
        crate::inbound::http::plants::log_care,
        crate::inbound::http::plants::list_care,
        crate::inbound::http::reminders::create_reminder,
        crate::inbound::http::reminders::list_reminders,
        crate::inbound::http::reminders::get_reminder,
        crate::inbound::http::reminders::update_reminder,
        crate::inbound::http::reminders::delete_reminder,
        crate::inbound::http::reminders::snooze_reminder,
        crate::inbound::http::reminders::complete_reminder,
        crate::inbound::http::documents::create_document,
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::get_document,
        crate::inbound::http::documents::update_document,
        crate::inbound::http::documents::delete_document,
        crate::inbound::http::documents::link_document,
        crate::inbound::http::documents::list_links,
        crate::inbound::http::documents::unlink_document,
        crate::inbound::http::documents::linked_documents,
        crate::inbound::http::snippets::create_snippet,
        crate::inbound::http::snippets::list_snippets,
        crate::inbound::http::snippets::languages,
        crate::inbound::http::snippets::get_snippet,
        crate::inbound::http::snippets::update_snippet,
        crate::inbound::http::snippets::delete_snippet,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Registration, login and the current user"),
        (name = "households", description = "Households, people and relationships"),
        (name = "bills", description = "Recurring bills, payments and subscriptions"),
        (name = "insurance", description = "Insurance policies and renewals"),
        (name = "maintenance", description = "Home maintenance tasks and logs"),
        (name = "vehicles", description = "Vehicles, due dates and service history"),
        (name = "finance", description = "Portfolios, cash, fixed assets and net worth"),
        (name = "reading", description = "Books, reading lists and yearly goals"),
        (name = "meals", description = "Recipes, meal plan, shopping list and collections"),
        (name = "plants", description = "Houseplants and their care"),
        (name = "reminders", description = "One-off and recurring reminders"),
        (name = "documents", description = "Document records and their links"),
        (name = "snippets", description = "Code snippets"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
