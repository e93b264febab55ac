//! Diesel table definitions mirroring `migrations/`.
//!
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is unique.
    users (id) {
        id -> Int4,
        #[max_length = 100]
        email -> Varchar,
        /// Argon2id PHC string; never plaintext.
        #[max_length = 255]
        password -> Varchar,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 100]
        city -> Varchar,
    }
}

diesel::table! {
    /// Café listings. `name` is unique.
    cafe (id) {
        id -> Int4,
        author_id -> Int4,
        #[max_length = 250]
        name -> Varchar,
        #[max_length = 250]
        map_url -> Varchar,
        #[max_length = 250]
        img_url -> Varchar,
        #[max_length = 250]
        location -> Varchar,
        #[max_length = 250]
        has_sockets -> Varchar,
        #[max_length = 250]
        has_toilets -> Varchar,
        #[max_length = 250]
        has_wifi -> Varchar,
        #[max_length = 250]
        can_take_calls -> Varchar,
        #[max_length = 250]
        seats -> Varchar,
        #[max_length = 250]
        coffee_price -> Varchar,
    }
}

diesel::table! {
    /// Reviews; removed with their café via `ON DELETE CASCADE`.
    reviews (id) {
        id -> Int4,
        author_id -> Int4,
        cafe_id -> Int4,
        text -> Text,
    }
}

diesel::joinable!(cafe -> users (author_id));
diesel::joinable!(reviews -> cafe (cafe_id));
diesel::joinable!(reviews -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(cafe, reviews, users);
