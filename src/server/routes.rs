//! HTTP routes over a shared recipe book.
//!
//! # Endpoints
//!
//! - `GET /health`: Health check
//! - `GET /recipes`: Recipes without the avoided allergens (`?all=true` for the full catalog)
//! - `GET /recipes/{id}`: A single recipe
//! - `GET /favorites`: Favorite recipes in the order they were added
//! - `PUT /favorites/{id}` / `DELETE /favorites/{id}`: Add or remove a favorite
//! - `GET /allergens`: Every allergen and whether it is avoided
//! - `PUT /allergens/{allergen}`: Body `{"enabled": bool}`

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use recipe_core::{Allergen, Recipe, RecipeBook, RecipeId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    book: Arc<RwLock<RecipeBook>>,
}

impl AppState {
    pub fn new(book: RecipeBook) -> Self {
        Self {
            book: Arc::new(RwLock::new(book)),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Errors returned by the API
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl From<recipe_core::Error> for ApiError {
    fn from(err: recipe_core::Error) -> Self {
        use recipe_core::Error;

        let (status, code) = match &err {
            Error::RecipeNotFound(_) | Error::NoRecipeMatching(_) => {
                (StatusCode::NOT_FOUND, "recipe_not_found")
            }
            Error::InvalidRecipeId(_) => (StatusCode::BAD_REQUEST, "invalid_recipe_id"),
            Error::UnknownAllergen(_) => (StatusCode::BAD_REQUEST, "unknown_allergen"),
            Error::CatalogRead(..) | Error::CatalogParse(..) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "catalog_error")
            }
        };
        Self {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.code,
                message: self.message,
            }),
        )
            .into_response()
    }
}

/// A recipe as returned by the API, with its derived favorite flag
#[derive(Serialize)]
struct RecipeView {
    #[serde(flatten)]
    recipe: Recipe,
    favorite: bool,
}

impl RecipeView {
    fn new(book: &RecipeBook, recipe: &Recipe) -> Self {
        Self {
            recipe: recipe.clone(),
            favorite: book.is_favorite(recipe.id),
        }
    }

    fn list<'a>(book: &RecipeBook, recipes: impl IntoIterator<Item = &'a Recipe>) -> Vec<Self> {
        recipes
            .into_iter()
            .map(|recipe| Self::new(book, recipe))
            .collect()
    }
}

#[derive(Serialize)]
struct AllergenView {
    allergen: Allergen,
    label: &'static str,
    enabled: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ListQuery {
    all: bool,
}

#[derive(Deserialize)]
struct ToggleRequest {
    enabled: bool,
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<RecipeView>> {
    let book = state.book.read().await;
    let views = if query.all {
        RecipeView::list(&book, book.list_recipes())
    } else {
        RecipeView::list(&book, book.filter_recipes())
    };
    Json(views)
}

async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeView>, ApiError> {
    let id: RecipeId = id.parse()?;
    let book = state.book.read().await;
    let recipe = book.get_recipe(id)?;
    Ok(Json(RecipeView::new(&book, recipe)))
}

async fn list_favorites(State(state): State<AppState>) -> Json<Vec<RecipeView>> {
    let book = state.book.read().await;
    Json(RecipeView::list(&book, book.list_favorites()))
}

async fn add_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RecipeView>>, ApiError> {
    let id: RecipeId = id.parse()?;
    let mut book = state.book.write().await;
    if book.add_to_favorites(id)? {
        tracing::debug!("Added favorite {}", id);
    }
    Ok(Json(RecipeView::list(&book, book.list_favorites())))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RecipeView>>, ApiError> {
    let id: RecipeId = id.parse()?;
    let mut book = state.book.write().await;
    if book.remove_from_favorites(id)? {
        tracing::debug!("Removed favorite {}", id);
    }
    Ok(Json(RecipeView::list(&book, book.list_favorites())))
}

async fn list_allergens(State(state): State<AppState>) -> Json<Vec<AllergenView>> {
    let book = state.book.read().await;
    Json(
        Allergen::ALL
            .iter()
            .map(|allergen| AllergenView {
                allergen: *allergen,
                label: allergen.label(),
                enabled: book.is_avoided(*allergen),
            })
            .collect(),
    )
}

async fn set_allergen(
    State(state): State<AppState>,
    Path(allergen): Path<String>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<Vec<Allergen>>, ApiError> {
    let allergen: Allergen = allergen.parse()?;
    let mut book = state.book.write().await;
    if book.toggle_allergen(allergen, request.enabled) {
        tracing::debug!("Allergen {} enabled={}", allergen, request.enabled);
    }
    Ok(Json(book.user_allergens().to_vec()))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/recipes", get(list_recipes))
        .route("/recipes/{id}", get(get_recipe))
        .route("/favorites", get(list_favorites))
        .route("/favorites/{id}", put(add_favorite).delete(remove_favorite))
        .route("/allergens", get(list_allergens))
        .route("/allergens/{allergen}", put(set_allergen))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use recipe_core::Catalog;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_app() -> (Router, Vec<RecipeId>) {
        let book = RecipeBook::new(Catalog::sample());
        let ids = book.list_recipes().iter().map(|r| r.id).collect();
        (router(AppState::new(book)), ids)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn names(json: &Value) -> Vec<String> {
        json.as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app();
        let (status, json) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_recipes_follows_allergens() {
        let (app, _) = test_app();

        let (_, json) = send(&app, Method::GET, "/recipes", None).await;
        assert_eq!(names(&json).len(), 5);

        let (status, json) = send(
            &app,
            Method::PUT,
            "/allergens/eggs",
            Some(serde_json::json!({ "enabled": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!(["eggs"]));

        let (_, json) = send(&app, Method::GET, "/recipes", None).await;
        assert!(!names(&json).contains(&"Spaghetti Carbonara".to_string()));
        assert_eq!(names(&json).len(), 4);

        let (_, json) = send(&app, Method::GET, "/recipes?all=true", None).await;
        assert_eq!(names(&json).len(), 5);
    }

    #[tokio::test]
    async fn test_favorites_roundtrip() {
        let (app, ids) = test_app();
        let uri = format!("/favorites/{}", ids[2]);

        let (status, _) = send(&app, Method::PUT, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, json) = send(&app, Method::PUT, &uri, None).await;
        assert_eq!(names(&json), vec!["Caesar Salad"]);
        assert_eq!(json[0]["favorite"], true);

        let (_, json) = send(&app, Method::GET, &format!("/recipes/{}", ids[2]), None).await;
        assert_eq!(json["favorite"], true);
        assert_eq!(json["ingredients"][0], "Romaine Lettuce");

        let (status, json) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unknown_recipe_is_not_found() {
        let (app, _) = test_app();
        let uri = format!("/favorites/{}", RecipeId::new());

        let (status, json) = send(&app, Method::PUT, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "recipe_not_found");
    }

    #[tokio::test]
    async fn test_malformed_recipe_id() {
        let (app, _) = test_app();
        let (status, json) = send(&app, Method::GET, "/recipes/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_recipe_id");
    }

    #[tokio::test]
    async fn test_unknown_allergen() {
        let (app, _) = test_app();
        let (status, json) = send(
            &app,
            Method::PUT,
            "/allergens/gluten",
            Some(serde_json::json!({ "enabled": true })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "unknown_allergen");
    }

    #[tokio::test]
    async fn test_list_allergens() {
        let (app, _) = test_app();
        send(
            &app,
            Method::PUT,
            "/allergens/treeNuts",
            Some(serde_json::json!({ "enabled": true })),
        )
        .await;

        let (_, json) = send(&app, Method::GET, "/allergens", None).await;
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 8);
        let tree_nuts = entries
            .iter()
            .find(|e| e["allergen"] == "treeNuts")
            .unwrap();
        assert_eq!(tree_nuts["enabled"], true);
        assert_eq!(tree_nuts["label"], "Tree Nuts");
    }
}
