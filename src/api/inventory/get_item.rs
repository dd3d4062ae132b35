use crate::api::inventory::models::Item;
use crate::api::inventory::store;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::http::Status;
use rocket::serde::json::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ItemOut {
    pub id: i32,
    pub title: Option<String>,
    pub gtin: String,
    pub category: String,
    pub image: Option<String>,
}

impl From<Item> for ItemOut {
    fn from(item: Item) -> ItemOut {
        ItemOut {
            id: item.id,
            title: item.title,
            gtin: item.gtin,
            category: item.category,
            image: item.image,
        }
    }
}

#[get("/items/<gtin>")]
pub(crate) async fn get_item(gtin: String, conn: DbConn) -> Result<Json<ItemOut>, ErrorResponse> {
    let item = conn
        .run(move |c| store::item_by_gtin(c, &gtin))
        .await
        .map_err(|_| ErrorResponse::new(Status { code: 500 }, "Couldn't load item".to_string()))?
        .ok_or_else(|| ErrorResponse::new(Status { code: 404 }, "Not found".to_string()))?;

    Ok(Json(ItemOut::from(item)))
}
