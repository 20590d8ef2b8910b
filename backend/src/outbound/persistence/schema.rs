//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `username` carries a unique constraint.
    users (id) {
        id -> Uuid,
        #[max_length = 64]
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        #[max_length = 64]
        display_name -> Varchar,
        email -> Varchar,
        #[max_length = 16]
        provider -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named records, optionally owned by a user.
    credentials (id) {
        id -> Uuid,
        name -> Varchar,
        /// Owning user; cleared when the user is deleted.
        user_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(credentials -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(credentials, users);
