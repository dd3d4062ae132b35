use bike_inventory::settings::Settings;

#[rocket::launch]
async fn rocket() -> _ {
    dotenv::dotenv().ok();

    let settings = Settings::new();

    bike_inventory::rocket_from(rocket::Config::figment(), settings)
}
