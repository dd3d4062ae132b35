#[macro_use]
extern crate rocket;

pub mod api;
pub mod blob;
pub mod client;
pub mod cors;
pub mod db;
pub mod error;
pub mod schema;
pub mod settings;

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};

use crate::blob::ImageStore;
use crate::cors::CORS;
use crate::settings::Settings;

#[get("/")]
fn index() -> &'static str {
    "Bike parts inventory API"
}

/// Assemble the server from an explicit figment and settings so tests can
/// point it at scratch storage.
pub fn rocket_from(figment: Figment, settings: Settings) -> Rocket<Build> {
    let images = ImageStore::new(&settings.image_folder);
    images.ensure_root().expect("image folder");

    // The SQLite file is created on connect, its parent directory is not.
    if let Ok(database_url) = figment.extract_inner::<String>("databases.inventory.url") {
        if let Some(parent) = std::path::Path::new(&database_url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).expect("database folder");
            }
        }
    }

    let image_root = images.root().to_path_buf();

    rocket::custom(figment)
        .attach(CORS)
        .attach(db::DbConn::fairing())
        .attach(AdHoc::on_ignite("Database Migrations", db::run_db_migrations))
        .manage(images)
        .mount(
            "/",
            routes![
                index,
                cors::all_options,
                api::inventory::list::get_items,
                api::inventory::create::create_item,
                api::inventory::get_item::get_item,
            ],
        )
        .mount("/images", FileServer::from(image_root))
}
