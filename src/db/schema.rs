// Kept in sync by hand with `db::pg::CREATE_MATCHED_STORES_SQL`; the two
// input tables belong to the web application and are read-only here.

diesel::table! {
    excel_import_routes (id) {
        id -> Int8,
        store_name -> Text,
        route_name -> Nullable<Text>,
        total_quantity -> Nullable<Int4>,
        crates_needed -> Nullable<Int4>,
    }
}

diesel::table! {
    stores (id) {
        id -> Int8,
        store_name -> Text,
        dispatch_code -> Nullable<Text>,
        store_code -> Nullable<Text>,
        store_company -> Nullable<Text>,
        address_line -> Nullable<Text>,
        geolocation -> Nullable<Text>,
        eircode -> Nullable<Text>,
        alarm_code -> Nullable<Text>,
        key_code -> Nullable<Text>,
        delivery_window_start -> Nullable<Text>,
        delivery_window_end -> Nullable<Text>,
    }
}

diesel::table! {
    matched_stores (id) {
        id -> Int8,
        import_id -> Int8,
        store_id -> Int8,
        match_confidence -> Float8,
        route_name -> Nullable<Text>,
        imported_name -> Text,
        store_name -> Text,
        dispatch_code -> Nullable<Text>,
        store_code -> Nullable<Text>,
        store_company -> Nullable<Text>,
        address_line -> Nullable<Text>,
        eircode -> Nullable<Text>,
        total_quantity -> Nullable<Int4>,
        crates_needed -> Nullable<Int4>,
        matched_at -> Timestamptz,
    }
}

diesel::joinable!(matched_stores -> excel_import_routes (import_id));
diesel::joinable!(matched_stores -> stores (store_id));

diesel::allow_tables_to_appear_in_same_query!(
    excel_import_routes,
    matched_stores,
    stores,
);
