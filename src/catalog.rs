use log::warn;

use crate::api::{ApiError, TriviaClient};
use crate::opentdb::Category;

pub const ANY_CATEGORY: &str = "Any Category";

/// Fixed opentdb category ids for the well-known display names, used to
/// resolve a selection even when the live list lookup misses.
const KNOWN_CATEGORY_IDS: [(&str, u32); 24] = [
    ("General Knowledge", 9),
    ("Entertainment: Books", 10),
    ("Entertainment: Film", 11),
    ("Entertainment: Music", 12),
    ("Entertainment: Musicals & Theatres", 13),
    ("Entertainment: Television", 14),
    ("Entertainment: Video Games", 15),
    ("Entertainment: Board Games", 16),
    ("Science & Nature", 17),
    ("Science: Computers", 18),
    ("Science: Mathematics", 19),
    ("Mythology", 20),
    ("Sports", 21),
    ("Geography", 22),
    ("History", 23),
    ("Politics", 24),
    ("Art", 25),
    ("Celebrities", 26),
    ("Animals", 27),
    ("Vehicles", 28),
    ("Entertainment: Comics", 29),
    ("Science: Gadgets", 30),
    ("Entertainment: Japanese Anime & Manga", 31),
    ("Entertainment: Cartoon & Animations", 32),
];

/// The list of selectable categories, fetched once per launch and re-loadable
/// on demand. The synthetic "Any Category" entry is always first.
pub struct CategoryCatalog {
    categories: Vec<Category>,
    loading: bool,
    error: Option<String>,
}

impl CategoryCatalog {
    pub fn new() -> CategoryCatalog {
        CategoryCatalog {
            categories: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// One-shot load. Re-invocable: a retry clears the previous error and
    /// replaces the list wholesale. Exactly one of {categories, error} is set
    /// when this returns.
    pub async fn load(&mut self, client: &TriviaClient) {
        self.loading = true;
        self.error = None;

        match client.fetch_categories().await {
            Ok(fetched) => self.categories = with_any_first(fetched),
            Err(error) => {
                warn!("Category fetch failed: {error}");
                self.error = Some(categories_error_message(&error));
            }
        }
        self.loading = false;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// "Any Category" (and the synthetic id 0) never becomes a query
    /// parameter; everything else resolves via the loaded list, then the
    /// fixed table.
    pub fn id_for_name(&self, name: &str) -> Option<u32> {
        if name == ANY_CATEGORY {
            return None;
        }
        if let Some(category) = self.categories.iter().find(|c| c.name == name) {
            return match category.id {
                0 => None,
                id => Some(id),
            };
        }
        KNOWN_CATEGORY_IDS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|&(_, id)| id)
    }
}

/// The synthetic wildcard entry goes ahead of whatever the API returned,
/// on the first load and on every reload.
fn with_any_first(fetched: Vec<Category>) -> Vec<Category> {
    let mut categories = vec![Category {
        id: 0,
        name: ANY_CATEGORY.to_string(),
    }];
    categories.extend(fetched);
    categories
}

fn categories_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Network(_) => format!("Failed to fetch categories: {error}"),
        ApiError::Decode(_) => format!("Failed to decode categories: {error}"),
        ApiError::Api(_) => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_catalog() -> CategoryCatalog {
        let mut catalog = CategoryCatalog::new();
        catalog.categories = vec![
            Category {
                id: 0,
                name: ANY_CATEGORY.to_string(),
            },
            Category {
                id: 9,
                name: "General Knowledge".to_string(),
            },
            Category {
                id: 33,
                name: "Brand New Category".to_string(),
            },
        ];
        catalog
    }

    #[test]
    fn any_category_never_maps_to_an_id() {
        let catalog = loaded_catalog();
        assert_eq!(catalog.id_for_name(ANY_CATEGORY), None);
    }

    #[test]
    fn resolves_from_loaded_list_before_fixed_table() {
        let catalog = loaded_catalog();
        assert_eq!(catalog.id_for_name("Brand New Category"), Some(33));
        assert_eq!(catalog.id_for_name("General Knowledge"), Some(9));
    }

    #[test]
    fn falls_back_to_fixed_table_when_list_is_empty() {
        let catalog = CategoryCatalog::new();
        assert_eq!(catalog.id_for_name("Science: Computers"), Some(18));
        assert_eq!(catalog.id_for_name("No Such Category"), None);
    }

    #[test]
    fn synthetic_entry_is_always_first() {
        let fetched = vec![Category {
            id: 9,
            name: "General Knowledge".to_string(),
        }];
        let categories = with_any_first(fetched);
        assert_eq!(categories[0].id, 0);
        assert_eq!(categories[0].name, ANY_CATEGORY);
        assert_eq!(categories.len(), 2);

        // a reload replaces the list wholesale, wildcard still first
        let categories = with_any_first(Vec::new());
        assert_eq!(categories[0].name, ANY_CATEGORY);
    }

    #[tokio::test]
    async fn failed_load_sets_error_and_clears_loading() {
        use crate::api::TriviaClient;

        // nothing listens here, the fetch fails fast with a network error
        let client = TriviaClient::new(reqwest::Client::new(), "http://127.0.0.1:1".to_string());
        let mut catalog = CategoryCatalog::new();
        catalog.load(&client).await;

        assert!(!catalog.is_loading());
        assert!(catalog.error().is_some());
        assert!(catalog.categories().is_empty());

        // a retry clears the previous error before re-fetching
        catalog.load(&client).await;
        assert!(catalog.error().is_some());
        assert!(!catalog.is_loading());
    }

    #[test]
    fn fixed_table_is_bijective() {
        for (i, (name_a, id_a)) in KNOWN_CATEGORY_IDS.iter().enumerate() {
            for (name_b, id_b) in &KNOWN_CATEGORY_IDS[i + 1..] {
                assert_ne!(name_a, name_b);
                assert_ne!(id_a, id_b);
            }
        }
    }
}
