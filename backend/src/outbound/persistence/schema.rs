//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` is stored lowercased and carries a unique index.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// PHC-formatted Argon2 digest; never the plaintext password.
        password_digest -> Text,
        role_title -> Nullable<Varchar>,
        bio -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks, each owned by exactly one user.
    tasks (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Varchar,
        description -> Text,
        /// Either `pending` or `completed` (check constraint).
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, users);
