//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the embedded migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.
//!
//! # Maintenance
//!
//! When a migration changes the schema, update this file to match. The
//! `diesel print-schema` command can generate these definitions from a live
//! database.

diesel::table! {
    /// Listing posts. Satellite rows are referenced by id, lookups by code.
    posts (id) {
        id -> Varchar,
        title -> Varchar,
        /// Average rating, 0 until votes arrive.
        #[sql_name = "star"]
        star_rating -> Int4,
        address -> Nullable<Varchar>,
        /// JSON text of the submitted description.
        description -> Nullable<Text>,
        label_code -> Varchar,
        category_code -> Varchar,
        province_code -> Nullable<Varchar>,
        area_code -> Nullable<Varchar>,
        price_code -> Nullable<Varchar>,
        /// Monthly price in millions.
        price_number -> Float8,
        /// Floor area in square metres.
        area_number -> Float8,
        attributes_id -> Varchar,
        images_id -> Varchar,
        overview_id -> Varchar,
        user_id -> Varchar,
        expired -> Nullable<Timestamptz>,
        /// `active` or `archived`.
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Card display strings, one row per post.
    attributes (id) {
        id -> Varchar,
        price -> Varchar,
        acreage -> Varchar,
        published -> Varchar,
        hashtag -> Varchar,
    }
}

diesel::table! {
    /// Media URL lists, one row per post.
    images (id) {
        id -> Varchar,
        /// JSON array of URLs.
        image -> Jsonb,
    }
}

diesel::table! {
    /// Detail panel strings, one row per post.
    overviews (id) {
        id -> Varchar,
        code -> Varchar,
        area -> Varchar,
        #[sql_name = "type"]
        kind -> Nullable<Varchar>,
        target -> Nullable<Varchar>,
        bonus -> Varchar,
        created -> Varchar,
        expired -> Varchar,
    }
}

diesel::table! {
    /// Label lookup rows keyed by generated code.
    labels (code) {
        code -> Varchar,
        value -> Varchar,
    }
}

diesel::table! {
    /// Province lookup rows keyed by generated code.
    provinces (code) {
        code -> Varchar,
        value -> Varchar,
    }
}

diesel::table! {
    /// Category lookup rows.
    categories (code) {
        code -> Varchar,
        value -> Varchar,
    }
}

diesel::table! {
    /// Public user profiles. Accounts are managed by another service.
    users (id) {
        id -> Varchar,
        name -> Varchar,
        phone -> Nullable<Varchar>,
        zalo -> Nullable<Varchar>,
        avatar -> Nullable<Varchar>,
        role_code -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Star ratings, one per user and post.
    votes (post_id, user_id) {
        post_id -> Varchar,
        user_id -> Varchar,
        value -> Int2,
    }
}

diesel::table! {
    /// Comments on posts.
    comments (id) {
        id -> Varchar,
        post_id -> Varchar,
        commentator_id -> Varchar,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Saved posts, one row per user, ids in the order saved.
    wishlists (uid) {
        uid -> Varchar,
        post_ids -> Array<Text>,
    }
}

diesel::table! {
    /// Append-only abuse reports.
    reports (id) {
        id -> Varchar,
        post_id -> Varchar,
        user_id -> Varchar,
        title -> Varchar,
        reason -> Text,
        created_at -> Timestamptz,
    }
}
