//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Every
//! user-owned table carries a `user_id` column so repositories can scope each
//! statement to the authenticated owner.

diesel::table! {
    /// Registered accounts. `email` is unique and stored lower-cased.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        display_name -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    households (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    people (id) {
        id -> Uuid,
        user_id -> Uuid,
        household_id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        date_of_birth -> Nullable<Date>,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed relationships; each pair is stored in both directions.
    person_relationships (id) {
        id -> Uuid,
        user_id -> Uuid,
        person_id -> Uuid,
        related_person_id -> Uuid,
        kind -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    bills (id) {
        id -> Uuid,
        user_id -> Uuid,
        household_id -> Nullable<Uuid>,
        name -> Varchar,
        payee -> Nullable<Varchar>,
        amount_cents -> Int8,
        frequency -> Varchar,
        next_due_date -> Date,
        auto_pay -> Bool,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    bill_payments (id) {
        id -> Uuid,
        user_id -> Uuid,
        bill_id -> Uuid,
        amount_cents -> Int8,
        paid_on -> Date,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    subscriptions (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        provider -> Nullable<Varchar>,
        amount_cents -> Int8,
        frequency -> Varchar,
        next_renewal_date -> Date,
        category -> Nullable<Varchar>,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    insurance_policies (id) {
        id -> Uuid,
        user_id -> Uuid,
        household_id -> Nullable<Uuid>,
        provider -> Varchar,
        policy_number -> Nullable<Varchar>,
        policy_type -> Varchar,
        premium_cents -> Int8,
        premium_frequency -> Varchar,
        start_date -> Nullable<Date>,
        renewal_date -> Date,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    maintenance_tasks (id) {
        id -> Uuid,
        user_id -> Uuid,
        household_id -> Nullable<Uuid>,
        name -> Varchar,
        category -> Nullable<Varchar>,
        frequency -> Varchar,
        last_completed_on -> Nullable<Date>,
        next_due_date -> Date,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    maintenance_logs (id) {
        id -> Uuid,
        user_id -> Uuid,
        task_id -> Uuid,
        completed_on -> Date,
        cost_cents -> Nullable<Int8>,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    vehicles (id) {
        id -> Uuid,
        user_id -> Uuid,
        household_id -> Nullable<Uuid>,
        make -> Varchar,
        model -> Varchar,
        year -> Nullable<Int4>,
        registration -> Nullable<Varchar>,
        vin -> Nullable<Varchar>,
        mileage -> Nullable<Int4>,
        mot_due_date -> Nullable<Date>,
        tax_due_date -> Nullable<Date>,
        service_due_date -> Nullable<Date>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    vehicle_service_records (id) {
        id -> Uuid,
        user_id -> Uuid,
        vehicle_id -> Uuid,
        serviced_on -> Date,
        mileage -> Nullable<Int4>,
        description -> Text,
        cost_cents -> Nullable<Int8>,
        garage -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    portfolios (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        provider -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    holdings (id) {
        id -> Uuid,
        user_id -> Uuid,
        portfolio_id -> Uuid,
        symbol -> Varchar,
        name -> Nullable<Varchar>,
        asset_class -> Varchar,
        quantity -> Float8,
        average_cost_cents -> Int8,
        current_price_cents -> Int8,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    portfolio_transactions (id) {
        id -> Uuid,
        user_id -> Uuid,
        portfolio_id -> Uuid,
        symbol -> Nullable<Varchar>,
        kind -> Varchar,
        quantity -> Nullable<Float8>,
        price_cents -> Nullable<Int8>,
        amount_cents -> Int8,
        occurred_on -> Date,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    cash_accounts (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        institution -> Nullable<Varchar>,
        account_type -> Varchar,
        balance_cents -> Int8,
        interest_rate_bps -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    fixed_assets (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        category -> Nullable<Varchar>,
        purchase_date -> Nullable<Date>,
        purchase_price_cents -> Int8,
        current_value_cents -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    books (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        author -> Nullable<Varchar>,
        isbn -> Nullable<Varchar>,
        page_count -> Nullable<Int4>,
        cover_url -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    reading_lists (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Join table carrying per-book progress within a list.
    reading_list_books (list_id, book_id) {
        list_id -> Uuid,
        book_id -> Uuid,
        user_id -> Uuid,
        status -> Varchar,
        current_page -> Int4,
        rating -> Nullable<Int2>,
        started_on -> Nullable<Date>,
        finished_on -> Nullable<Date>,
        added_at -> Timestamptz,
    }
}

diesel::table! {
    reading_goals (id) {
        id -> Uuid,
        user_id -> Uuid,
        year -> Int4,
        target_books -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipes (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        description -> Nullable<Text>,
        servings -> Int4,
        prep_minutes -> Nullable<Int4>,
        cook_minutes -> Nullable<Int4>,
        ingredients -> Jsonb,
        instructions -> Nullable<Text>,
        tags -> Array<Text>,
        source_url -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    meal_plan_entries (id) {
        id -> Uuid,
        user_id -> Uuid,
        planned_on -> Date,
        meal_type -> Varchar,
        recipe_id -> Nullable<Uuid>,
        title -> Nullable<Varchar>,
        servings -> Nullable<Int4>,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    shopping_list_items (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        quantity -> Nullable<Varchar>,
        category -> Nullable<Varchar>,
        is_checked -> Bool,
        recipe_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipe_collections (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    collection_recipes (collection_id, recipe_id) {
        collection_id -> Uuid,
        recipe_id -> Uuid,
        added_at -> Timestamptz,
    }
}

diesel::table! {
    plants (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        species -> Nullable<Varchar>,
        location -> Nullable<Varchar>,
        acquired_on -> Nullable<Date>,
        watering_frequency -> Int4,
        fertilising_frequency -> Nullable<Int4>,
        last_watered_on -> Nullable<Date>,
        last_fertilised_on -> Nullable<Date>,
        is_active -> Bool,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    plant_care_logs (id) {
        id -> Uuid,
        user_id -> Uuid,
        plant_id -> Uuid,
        kind -> Varchar,
        performed_on -> Date,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    reminders (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        description -> Nullable<Text>,
        due_date -> Date,
        frequency -> Nullable<Varchar>,
        snoozed_until -> Nullable<Date>,
        completed_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    code_snippets (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        language -> Varchar,
        code -> Text,
        description -> Nullable<Text>,
        tags -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    documents (id) {
        id -> Uuid,
        user_id -> Uuid,
        household_id -> Nullable<Uuid>,
        title -> Varchar,
        paperless_document_id -> Nullable<Int8>,
        category -> Nullable<Varchar>,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    document_links (id) {
        id -> Uuid,
        user_id -> Uuid,
        document_id -> Uuid,
        entity_type -> Varchar,
        entity_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(people -> households (household_id));
diesel::joinable!(bill_payments -> bills (bill_id));
diesel::joinable!(maintenance_logs -> maintenance_tasks (task_id));
diesel::joinable!(vehicle_service_records -> vehicles (vehicle_id));
diesel::joinable!(holdings -> portfolios (portfolio_id));
diesel::joinable!(portfolio_transactions -> portfolios (portfolio_id));
diesel::joinable!(reading_list_books -> books (book_id));
diesel::joinable!(reading_list_books -> reading_lists (list_id));
diesel::joinable!(collection_recipes -> recipe_collections (collection_id));
diesel::joinable!(collection_recipes -> recipes (recipe_id));
diesel::joinable!(plant_care_logs -> plants (plant_id));
diesel::joinable!(document_links -> documents (document_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    households,
    people,
    person_relationships,
    bills,
    bill_payments,
    subscriptions,
    insurance_policies,
    maintenance_tasks,
    maintenance_logs,
    vehicles,
    vehicle_service_records,
    portfolios,
    holdings,
    portfolio_transactions,
    cash_accounts,
    fixed_assets,
    books,
    reading_lists,
    reading_list_books,
    reading_goals,
    recipes,
    meal_plan_entries,
    shopping_list_items,
    recipe_collections,
    collection_recipes,
    plants,
    plant_care_logs,
    reminders,
    code_snippets,
    documents,
    document_links,
);
