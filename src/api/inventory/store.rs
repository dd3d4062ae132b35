use diesel::prelude::*;

use crate::api::inventory::models::Item;
use crate::schema::items;

#[derive(Insertable, Debug)]
#[diesel(table_name = items)]
pub struct NewItem {
    pub title: Option<String>,
    pub gtin: String,
    pub category: String,
    pub image: Option<String>,
}

/// Insert a row and hand back the stored item with its generated id.
pub fn create_item(conn: &mut SqliteConnection, new_item: NewItem) -> QueryResult<Item> {
    use crate::schema::items::dsl::*;

    diesel::insert_into(items).values(&new_item).execute(conn)?;

    items.order(id.desc()).first::<Item>(conn)
}

/// Rows matching the filters, in the table's natural insertion order. An
/// empty `search` or `category_filter` leaves that filter off; a non-empty
/// search matches title OR gtin by substring, and both filters AND together.
pub fn filter_items(
    conn: &mut SqliteConnection,
    search: &str,
    category_filter: &str,
) -> QueryResult<Vec<Item>> {
    use crate::schema::items::dsl::*;

    let mut query = items.into_boxed();

    if !search.is_empty() {
        let pattern = format!("%{}%", search);
        query = query.filter(
            title
                .like(pattern.clone())
                .or(gtin.like(pattern).nullable()),
        );
    }

    if !category_filter.is_empty() {
        query = query.filter(category.eq(category_filter.to_string()));
    }

    query.load::<Item>(conn)
}

/// Exact gtin lookup. `None` when no row matches, which is distinct from an
/// empty filtered list.
pub fn item_by_gtin(conn: &mut SqliteConnection, gtin_code: &str) -> QueryResult<Option<Item>> {
    use crate::schema::items::dsl::*;

    items
        .filter(gtin.eq(gtin_code.to_string()))
        .first::<Item>(conn)
        .optional()
}
