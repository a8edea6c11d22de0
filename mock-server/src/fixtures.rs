//! In-memory content served by the mock CMS.

use std::collections::HashMap;

use serde_json::{json, Value};

/// Everything the mock serves, keyed the way the routes address it.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub collections: HashMap<String, Vec<Value>>,
    pub navs: HashMap<String, Vec<Value>>,
    pub taxonomies: HashMap<String, Vec<Value>>,
    pub globals: Vec<Value>,
    pub assets: HashMap<String, Vec<Value>>,
}

impl Fixtures {
    pub fn entry(&self, collection: &str, id: &str) -> Option<&Value> {
        self.collections
            .get(collection)?
            .iter()
            .find(|e| e["id"] == id || e["slug"] == id)
    }

    pub fn term(&self, taxonomy: &str, slug: &str) -> Option<&Value> {
        self.taxonomies.get(taxonomy)?.iter().find(|t| t["slug"] == slug)
    }

    pub fn global(&self, handle: &str) -> Option<&Value> {
        self.globals.iter().find(|g| g["handle"] == handle)
    }

    pub fn asset(&self, container: &str, path: &str) -> Option<&Value> {
        self.assets.get(container)?.iter().find(|a| a["path"] == path)
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        let mut collections = HashMap::new();
        collections.insert(
            "posts".to_string(),
            vec![
                json!({
                    "id": "post-1",
                    "slug": "hello-world",
                    "title": "Hello World",
                    "date": "2024-01-10",
                    "views": 120,
                    "featured": true,
                    "locale": "default",
                }),
                json!({
                    "id": "post-2",
                    "slug": "rust-and-statamic",
                    "title": "Rust and Statamic",
                    "date": "2024-03-02",
                    "views": 480,
                    "featured": false,
                    "locale": "default",
                }),
                json!({
                    "id": "post-3",
                    "slug": "bonjour",
                    "title": "Bonjour le monde",
                    "date": "2024-02-14",
                    "views": 35,
                    "featured": true,
                    "locale": "fr",
                }),
            ],
        );
        collections.insert(
            "pages".to_string(),
            vec![
                json!({
                    "id": "home",
                    "slug": "home",
                    "title": "Home",
                    "locale": "default",
                }),
                json!({
                    "id": "über uns?",
                    "slug": "ueber-uns",
                    "title": "Über uns",
                    "locale": "de",
                }),
            ],
        );

        let mut navs = HashMap::new();
        navs.insert(
            "main".to_string(),
            vec![
                json!({
                    "page": {"title": "Home", "url": "/"},
                    "depth": 1,
                    "children": [],
                }),
                json!({
                    "page": {"title": "Blog", "url": "/blog"},
                    "depth": 1,
                    "children": [
                        {"page": {"title": "Hello World", "url": "/blog/hello-world"}, "depth": 2, "children": []}
                    ],
                }),
            ],
        );

        let mut taxonomies = HashMap::new();
        taxonomies.insert(
            "tags".to_string(),
            vec![
                json!({"id": "tags::rust", "slug": "rust", "title": "Rust", "locale": "default"}),
                json!({"id": "tags::cms", "slug": "cms", "title": "CMS", "locale": "default"}),
            ],
        );

        let globals = vec![
            json!({"handle": "footer", "api_url": "/api/globals/footer", "copyright": "ACME Inc."}),
            json!({"handle": "social", "api_url": "/api/globals/social", "twitter": "@acme"}),
        ];

        let mut assets = HashMap::new();
        assets.insert(
            "media".to_string(),
            vec![
                json!({
                    "id": "media::logo.png",
                    "path": "logo.png",
                    "url": "/assets/logo.png",
                    "extension": "png",
                    "size": 2048,
                }),
                json!({
                    "id": "media::images/hero.jpg",
                    "path": "images/hero.jpg",
                    "url": "/assets/images/hero.jpg",
                    "extension": "jpg",
                    "size": 204800,
                }),
            ],
        );

        assets.insert(
            "uploads".to_string(),
            vec![
                json!({
                    "id": "uploads::my photo #1.jpg",
                    "path": "my photo #1.jpg",
                    "url": "/uploads/my%20photo%20%231.jpg",
                    "extension": "jpg",
                    "size": 51200,
                }),
                json!({
                    "id": "uploads::über/café 100%.png",
                    "path": "über/café 100%.png",
                    "url": "/uploads/%C3%BCber/caf%C3%A9%20100%25.png",
                    "extension": "png",
                    "size": 4096,
                }),
            ],
        );

        Self {
            collections,
            navs,
            taxonomies,
            globals,
            assets,
        }
    }
}
