// Mirrors the SQL under `migrations/`.

diesel::table! {
    users (id) {
        id -> Int8,
        #[max_length = 255]
        username -> Varchar,
        password -> Nullable<Text>,
        #[max_length = 255]
        email -> Nullable<Varchar>,
        #[max_length = 255]
        college -> Nullable<Varchar>,
    }
}

diesel::table! {
    messages (id) {
        id -> Int8,
        sender_id -> Int8,
        recipient_id -> Int8,
        sent_at -> Timestamptz,
        content -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    users,
    messages,
);
