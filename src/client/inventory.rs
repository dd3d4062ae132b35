use crate::client::api::{ApiClient, ItemRecord};
use crate::client::error::ClientError;

/// Client-side list view state. Every issued query gets a sequence number
/// and a response is applied only when it belongs to the newest issued
/// query, so a slow response can never overwrite a fresher one.
#[derive(Default)]
pub struct InventoryView {
    items: Vec<ItemRecord>,
    issued: u64,
}

impl InventoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    /// Register a new query and get its sequence number.
    pub fn begin_query(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Apply a response. Returns false when the response was stale and got
    /// discarded.
    pub fn apply_response(&mut self, query: u64, items: Vec<ItemRecord>) -> bool {
        if query < self.issued {
            return false;
        }

        self.items = items;
        true
    }

    /// Issue a filtered query against the API and apply its response.
    pub async fn refresh(
        &mut self,
        api: &ApiClient,
        search: &str,
        category: &str,
    ) -> Result<(), ClientError> {
        let query = self.begin_query();
        let items = api.list_items(search, category).await?;
        self.apply_response(query, items);

        Ok(())
    }

    /// One card per item: title, gtin, category, and the resolved image URL
    /// when the item has a photo.
    pub fn render(&self, api: &ApiClient) -> String {
        let mut out = String::new();

        for item in &self.items {
            out.push_str(&format!(
                "#{} {}\n",
                item.id,
                item.title.as_deref().unwrap_or("(untitled)")
            ));
            out.push_str(&format!("   GTIN: {}\n", item.gtin));
            out.push_str(&format!("   Category: {}\n", item.category));
            if let Some(image) = &item.image {
                out.push_str(&format!("   Image: {}\n", api.image_url(image)));
            }
        }

        if self.items.is_empty() {
            out.push_str("No items.\n");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, title: &str) -> ItemRecord {
        ItemRecord {
            id,
            title: Some(title.to_string()),
            gtin: "012345678905".to_string(),
            category: "brakes".to_string(),
            image: Some("abc123".to_string()),
        }
    }

    #[test]
    fn latest_response_is_applied() {
        let mut view = InventoryView::new();

        let query = view.begin_query();
        assert!(view.apply_response(query, vec![record(1, "Brake Pad")]));

        assert_eq!(view.items().len(), 1);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut view = InventoryView::new();

        let old_query = view.begin_query();
        let new_query = view.begin_query();

        assert!(view.apply_response(new_query, vec![record(2, "Chain")]));
        // The older request finishes late; its payload must not win.
        assert!(!view.apply_response(old_query, vec![record(1, "Brake Pad")]));

        assert_eq!(view.items().len(), 1);
        assert_eq!(view.items()[0].id, 2);
    }

    #[test]
    fn cards_show_the_resolved_image_url() {
        let api = ApiClient::new("http://localhost:8000");
        let mut view = InventoryView::new();
        let query = view.begin_query();
        view.apply_response(query, vec![record(1, "Brake Pad")]);

        let rendered = view.render(&api);

        assert!(rendered.contains("Brake Pad"));
        assert!(rendered.contains("GTIN: 012345678905"));
        assert!(rendered.contains("Category: brakes"));
        assert!(rendered.contains("http://localhost:8000/images/abc123"));
    }
}
