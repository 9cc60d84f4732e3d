//! Diesel table definitions for the delivery schema.
//!
//! Kept in step with `backend/migrations`. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Shipping orders with flattened party, location and package columns.
    ///
    /// `record_status` is `A` for active rows and `I` for soft-deleted ones.
    orders (id) {
        id -> Int8,
        sender_id -> Varchar,
        sender_full_name -> Varchar,
        sender_phone -> Varchar,
        sender_email -> Varchar,
        recipient_id -> Varchar,
        recipient_full_name -> Varchar,
        recipient_phone -> Varchar,
        recipient_email -> Varchar,
        origin_latitude -> Varchar,
        origin_longitude -> Varchar,
        origin_address -> Varchar,
        origin_country -> Varchar,
        origin_zip -> Varchar,
        origin_reference -> Varchar,
        destination_latitude -> Varchar,
        destination_longitude -> Varchar,
        destination_address -> Varchar,
        destination_country -> Varchar,
        destination_zip -> Varchar,
        destination_reference -> Varchar,
        package_size -> Varchar,
        package_quantity -> Int4,
        package_weight -> Int4,
        status -> Varchar,
        record_status -> Varchar,
        created_by -> Varchar,
        created_at -> Timestamptz,
        updated_by -> Nullable<Varchar>,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Package-size tiers keyed by their weight ceiling.
    package_sizes (id) {
        id -> Int4,
        nickname -> Varchar,
        limit_value -> Int4,
        record_status -> Varchar,
    }
}

diesel::table! {
    /// Accounts allowed to sign in.
    users (id) {
        id -> Int8,
        username -> Varchar,
        application -> Varchar,
        password_hash -> Varchar,
        record_status -> Varchar,
        created_by -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(orders, package_sizes, users);
