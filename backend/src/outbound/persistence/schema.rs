//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int4,
        /// Lowercased; unique (`users_email_key`).
        email -> Varchar,
        /// Title-cased; unique (`users_display_name_key`).
        display_name -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        avatar_url -> Varchar,
        /// `admin` or `member`; at most one admin (`users_single_admin`).
        role -> Varchar,
    }
}

diesel::table! {
    /// Blog posts.
    posts (id) {
        id -> Int4,
        /// Unique (`posts_title_key`).
        title -> Varchar,
        subtitle -> Varchar,
        author -> Varchar,
        img_url -> Varchar,
        body -> Text,
        /// Pre-formatted creation date.
        date -> Varchar,
        owner_id -> Int4,
    }
}

diesel::table! {
    /// Comments; rows are removed with their post (`ON DELETE CASCADE`).
    comments (id) {
        id -> Int4,
        text -> Text,
        author_id -> Int4,
        post_id -> Int4,
    }
}

diesel::joinable!(posts -> users (owner_id));
diesel::joinable!(comments -> users (author_id));
diesel::joinable!(comments -> posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(users, posts, comments);
