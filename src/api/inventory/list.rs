use crate::api::inventory::get_item::ItemOut;
use crate::api::inventory::store;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::http::Status;
use rocket::serde::json::Json;

#[get("/items?<search>&<category>")]
pub(crate) async fn get_items(
    search: Option<String>,
    category: Option<String>,
    conn: DbConn,
) -> Result<Json<Vec<ItemOut>>, ErrorResponse> {
    // Missing or unreadable query parameters fall back to "no filter".
    let item_list = conn
        .run(move |c| {
            store::filter_items(
                c,
                search.as_deref().unwrap_or(""),
                category.as_deref().unwrap_or(""),
            )
        })
        .await
        .map_err(|_| {
            ErrorResponse::new(Status { code: 500 }, "Couldn't load items".to_string())
        })?;

    Ok(Json(item_list.into_iter().map(ItemOut::from).collect()))
}
