use axum::{
    extract::{Path, State},
    extract::rejection::JsonRejection,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use crate::catalog::command::add_manual_book_cmd::{AddManualBookCommand, AddManualBookCommandRequest, AddManualBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::lookup_book_cmd::{LookupBookCommand, LookupBookCommandRequest, LookupBookCommandResponse};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, rejection_to_server_error, ServerError};

fn build_service(state: AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.db, state.resolver)
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/libro", post(lookup_book))
        .route("/api/libro/manual", post(add_manual_book))
        .route("/api/libro/:isbn", get(find_book_by_isbn))
        .route("/api/libros", get(list_books))
        .with_state(state)
}

pub(crate) async fn lookup_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<LookupBookCommandResponse>, ServerError> {
    let json = json.map_err(rejection_to_server_error)?;
    let req: LookupBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state);
    let res = LookupBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn add_manual_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<AddManualBookCommandResponse>, ServerError> {
    let json = json.map_err(rejection_to_server_error)?;
    let req: AddManualBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state);
    let res = AddManualBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest::new(isbn);
    let svc = build_service(state);
    let res = GetBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn list_books(
    State(state): State<AppState>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let svc = build_service(state);
    let res = ListBooksCommand::new(svc).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res))
}
