//! Book endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::BookPayload;
use crate::http::server::AppState;
use crate::models::Book;

/// GET /api/books - list all books
async fn list_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.catalog.get_books().await?;
    Ok(Json(books))
}

/// POST /api/books - add a book
async fn create_book(
    State(state): State<Arc<AppState>>,
    BookPayload(req): BookPayload,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = state.catalog.add_book(req.title, req.author).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/books", get(list_books).post(create_book))
}
