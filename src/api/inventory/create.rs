use crate::api::inventory::store::{self, NewItem};
use crate::blob::ImageStore;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;

#[derive(FromForm)]
pub struct FormItem<'a> {
    title: Option<String>,
    gtin: Option<String>,
    category: Option<String>,
    image: Option<TempFile<'a>>,
}

#[derive(Serialize)]
pub struct CreatedOut {
    pub id: i32,
}

#[post("/items", data = "<form_item>")]
pub(crate) async fn create_item(
    mut form_item: Form<FormItem<'_>>,
    conn: DbConn,
    images: &State<ImageStore>,
) -> Result<Json<CreatedOut>, ErrorResponse> {
    let image = match form_item.image.as_mut() {
        Some(file) if file.len() > 0 => {
            let name = images.save(file).await.map_err(|err| {
                ErrorResponse::new(
                    Status { code: 500 },
                    format!("Couldn't save image: {}", err),
                )
            })?;
            Some(name)
        }
        _ => None,
    };

    let new_item = NewItem {
        title: form_item.title.clone(),
        gtin: form_item.gtin.clone().unwrap_or_default(),
        category: form_item.category.clone().unwrap_or_default(),
        image,
    };

    // A blob written just above is left behind if the insert fails.
    let item = conn
        .run(move |c| store::create_item(c, new_item))
        .await
        .map_err(|err| {
            ErrorResponse::new(
                Status { code: 500 },
                format!("Couldn't create item: {}", err),
            )
        })?;

    Ok(Json(CreatedOut { id: item.id }))
}
