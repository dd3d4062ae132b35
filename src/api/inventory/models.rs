use diesel::prelude::*;

#[derive(Queryable, Debug, PartialEq)]
pub struct Item {
    pub id: i32,
    pub title: Option<String>,
    pub gtin: String,
    pub category: String,
    pub image: Option<String>,
}
