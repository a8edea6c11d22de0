//! A fake Statamic CMS serving the REST API and glide endpoints from
//! in-memory fixtures.

pub mod fixtures;
pub mod listing;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

pub use fixtures::Fixtures;

pub type Db = Arc<Fixtures>;

type Params = Query<HashMap<String, String>>;

pub fn app() -> Router {
    app_with(Fixtures::default())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/api/collections/{collection}/entries", get(list_entries))
        .route("/api/collections/{collection}/entries/{id}", get(get_entry))
        .route("/api/navs/{nav}/tree", get(nav_tree))
        .route("/api/taxonomies/{taxonomy}/terms", get(list_terms))
        .route("/api/taxonomies/{taxonomy}/terms/{slug}", get(get_term))
        .route("/api/globals", get(list_globals))
        .route("/api/globals/{handle}", get(get_global))
        .route("/api/assets/{container}", get(list_assets))
        .route("/api/assets/{container}/{*path}", get(get_asset))
        .route("/assets/glide", get(glide_by_id))
        .route("/assets/glide/{container}/{*path}", get(glide_by_path))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Fixtures::default()).await
}

pub async fn run_with(listener: TcpListener, fixtures: Fixtures) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(fixtures)).await
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{what} not found.") })),
    )
        .into_response()
}

fn list_response(items: &[Value], params: &HashMap<String, String>) -> Response {
    match listing::apply(items, params) {
        Ok(body) => Json(body).into_response(),
        Err(message) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": message })),
        )
            .into_response(),
    }
}

fn single(item: &Value, params: &HashMap<String, String>) -> Response {
    let item = match params.get("fields") {
        Some(fields) => listing::select_fields(item, fields),
        None => item.clone(),
    };
    Json(json!({ "data": item })).into_response()
}

async fn list_entries(
    State(db): State<Db>,
    Path(collection): Path<String>,
    Query(params): Params,
) -> Response {
    debug!(%collection, ?params, "list entries");
    match db.collections.get(&collection) {
        Some(entries) => list_response(entries, &params),
        None => not_found(&format!("Collection [{collection}]")),
    }
}

async fn get_entry(
    State(db): State<Db>,
    Path((collection, id)): Path<(String, String)>,
    Query(params): Params,
) -> Response {
    match db.entry(&collection, &id) {
        Some(entry) => single(entry, &params),
        None => not_found(&format!("Entry [{id}]")),
    }
}

async fn nav_tree(State(db): State<Db>, Path(nav): Path<String>, Query(params): Params) -> Response {
    match db.navs.get(&nav) {
        Some(tree) => {
            let tree = match params.get("fields") {
                Some(fields) => tree
                    .iter()
                    .map(|branch| {
                        let mut branch = branch.clone();
                        branch["page"] = listing::select_fields(&branch["page"], fields);
                        branch
                    })
                    .collect(),
                None => tree.clone(),
            };
            Json(json!({ "data": tree })).into_response()
        }
        None => not_found(&format!("Navigation [{nav}]")),
    }
}

async fn list_terms(
    State(db): State<Db>,
    Path(taxonomy): Path<String>,
    Query(params): Params,
) -> Response {
    match db.taxonomies.get(&taxonomy) {
        Some(terms) => list_response(terms, &params),
        None => not_found(&format!("Taxonomy [{taxonomy}]")),
    }
}

async fn get_term(
    State(db): State<Db>,
    Path((taxonomy, slug)): Path<(String, String)>,
    Query(params): Params,
) -> Response {
    match db.term(&taxonomy, &slug) {
        Some(term) => single(term, &params),
        None => not_found(&format!("Term [{slug}]")),
    }
}

async fn list_globals(State(db): State<Db>, Query(params): Params) -> Response {
    list_response(&db.globals, &params)
}

async fn get_global(
    State(db): State<Db>,
    Path(handle): Path<String>,
    Query(params): Params,
) -> Response {
    match db.global(&handle) {
        Some(global) => single(global, &params),
        None => not_found(&format!("Global [{handle}]")),
    }
}

async fn list_assets(
    State(db): State<Db>,
    Path(container): Path<String>,
    Query(params): Params,
) -> Response {
    match db.assets.get(&container) {
        Some(assets) => list_response(assets, &params),
        None => not_found(&format!("Container [{container}]")),
    }
}

async fn get_asset(
    State(db): State<Db>,
    Path((container, path)): Path<(String, String)>,
    Query(params): Params,
) -> Response {
    match db.asset(&container, &path) {
        Some(asset) => single(asset, &params),
        None => not_found(&format!("Asset [{container}::{path}]")),
    }
}

/// Describe the transformed image; presets are echoed back with one URL each.
fn glide(asset: &Value, params: &HashMap<String, String>) -> Response {
    let url = asset["url"].as_str().unwrap_or_default();
    let presets: serde_json::Map<String, Value> = params
        .get("presets")
        .map(|p| {
            p.split(',')
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), json!(format!("/img{url}?p={name}"))))
                .collect()
        })
        .unwrap_or_default();
    Json(json!({
        "data": {
            "id": asset["id"],
            "url": format!("/img{url}"),
            "presets": presets,
        }
    }))
    .into_response()
}

async fn glide_by_id(State(db): State<Db>, Query(params): Params) -> Response {
    let Some(id) = params.get("id") else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "The id field is required." })),
        )
            .into_response();
    };
    let asset = id
        .split_once("::")
        .and_then(|(container, path)| db.asset(container, path));
    match asset {
        Some(asset) => glide(asset, &params),
        None => not_found(&format!("Asset [{id}]")),
    }
}

async fn glide_by_path(
    State(db): State<Db>,
    Path((container, path)): Path<(String, String)>,
    Query(params): Params,
) -> Response {
    match db.asset(&container, &path) {
        Some(asset) => glide(asset, &params),
        None => not_found(&format!("Asset [{container}::{path}]")),
    }
}
