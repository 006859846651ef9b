use crate::document::DocumentId;
use crate::errors::AppError;
use crate::export::{Rasterizer, SubmittedImage, export_receipt_as_image};
use crate::ledger::ItemId;
use crate::models::{AddItemRequest, DocumentUpdate, ExportRequest, FieldInputRequest};
use crate::state::AppState;
use crate::ui::render_page;
use crate::variant::{EXPORT_PREFIX, RECEIPT_SELECTOR, Variant};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, info, warn};

pub const LIVENESS_MESSAGE: &str = "Routes is working";
pub const DOCUMENT_GONE_MESSAGE: &str = "This receipt has expired. Please refresh the page.";

pub async fn expense_page(State(state): State<AppState>) -> Html<String> {
    load_page(&state, Variant::Expense).await
}

pub async fn activity_page(State(state): State<AppState>) -> Html<String> {
    load_page(&state, Variant::Activity).await
}

async fn load_page(state: &AppState, variant: Variant) -> Html<String> {
    let mut documents = state.documents.lock().await;
    let doc = documents.open(variant);
    info!(
        variant = variant.as_str(),
        document = %doc.id(),
        "loaded receipt page"
    );
    Html(render_page(doc))
}

fn document_gone() -> AppError {
    AppError::not_found(DOCUMENT_GONE_MESSAGE)
}

pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

pub async fn get_receipt(
    State(state): State<AppState>,
    Path((variant, id)): Path<(Variant, DocumentId)>,
) -> Result<Json<DocumentUpdate>, AppError> {
    let documents = state.documents.lock().await;
    let doc = documents.get(variant, id).ok_or_else(document_gone)?;
    Ok(Json(doc.snapshot()))
}

pub async fn close_document(
    State(state): State<AppState>,
    Path((variant, id)): Path<(Variant, DocumentId)>,
) -> Result<StatusCode, AppError> {
    let mut documents = state.documents.lock().await;
    if !documents.close(variant, id) {
        return Err(document_gone());
    }
    debug!(variant = variant.as_str(), document = %id, "closed receipt page");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_item(
    State(state): State<AppState>,
    Path((variant, id)): Path<(Variant, DocumentId)>,
    Json(payload): Json<AddItemRequest>,
) -> Result<Json<DocumentUpdate>, AppError> {
    let mut documents = state.documents.lock().await;
    let update = documents
        .get_mut(variant, id)
        .ok_or_else(document_gone)?
        .add_item(&payload.name, &payload.amount)
        .inspect_err(|err| warn!(variant = variant.as_str(), "rejected line item: {err}"))?;
    Ok(Json(update))
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path((variant, id, item)): Path<(Variant, DocumentId, ItemId)>,
) -> Result<Json<DocumentUpdate>, AppError> {
    let mut documents = state.documents.lock().await;
    let update = documents
        .get_mut(variant, id)
        .ok_or_else(document_gone)?
        .remove_item(item)?;
    Ok(Json(update))
}

pub async fn field_input(
    State(state): State<AppState>,
    Path((variant, id)): Path<(Variant, DocumentId)>,
    Json(payload): Json<FieldInputRequest>,
) -> Result<Json<DocumentUpdate>, AppError> {
    if payload.target.trim().is_empty() {
        return Err(AppError::bad_request("target must name a label"));
    }

    let mut documents = state.documents.lock().await;
    let doc = documents.get_mut(variant, id).ok_or_else(document_gone)?;
    let update = doc.field_input(
        &payload.value,
        payload.target.trim(),
        payload.target2.as_deref().map(str::trim),
    );
    Ok(Json(update))
}

pub async fn export_receipt(
    State(state): State<AppState>,
    Path((variant, id)): Path<(Variant, DocumentId)>,
    Json(payload): Json<ExportRequest>,
) -> Result<Response, AppError> {
    // Render under the lock, rasterize without it.
    let page = {
        let documents = state.documents.lock().await;
        render_page(documents.get(variant, id).ok_or_else(document_gone)?)
    };

    let submitted = SubmittedImage::from_request(payload.image);
    let rasterizer = submitted.as_ref().map(|image| image as &dyn Rasterizer);
    let image = export_receipt_as_image(&page, RECEIPT_SELECTOR, rasterizer, EXPORT_PREFIX).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, image.content_disposition()),
        ],
        image.bytes,
    )
        .into_response())
}
