diesel::table! {
    notes (id) {
        id -> Int4,
        title -> Varchar,
        content -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
