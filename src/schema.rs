diesel::table! {
    items (id) {
        id -> Integer,
        title -> Nullable<Text>,
        gtin -> Text,
        category -> Text,
        image -> Nullable<Text>,
    }
}
