//! Announcements, shop listings and staff notes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::error::{AppError, AppResult};
use crate::extractors::ApiJson;
use crate::routes::{excerpt, require};
use crate::state::AppState;
use crate::store::models::{
    Announcement, NewAnnouncement, NewNote, NewNotification, NewShopProduct, Note, NotificationKind,
    ShopCategory, ShopProduct, ShopProductPatch,
};

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/announcements",
            get(list_announcements).post(create_announcement),
        )
        .route("/announcements/{id}", delete(delete_announcement))
        .route(
            "/shop-products",
            get(list_shop_products).post(create_shop_product),
        )
        .route(
            "/shop-products/{id}",
            get(get_shop_product)
                .patch(update_shop_product)
                .delete(delete_shop_product),
        )
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", delete(delete_note))
}

fn category_label(category: ShopCategory) -> &'static str {
    match category {
        ShopCategory::Turfs => "Turfs",
        ShopCategory::Spawners => "Spawners",
        ShopCategory::Cosmetics => "Cosmetics",
    }
}

// --- Announcements ---

async fn list_announcements(State(state): State<AppState>) -> Json<Vec<Announcement>> {
    let announcements = state.store.lock().await.list_announcements();
    Json(announcements)
}

async fn create_announcement(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewAnnouncement>,
) -> AppResult<Response> {
    require(&[
        ("title", new.title.as_str()),
        ("user", new.user.as_str()),
        ("description", new.description.as_str()),
    ])?;

    let announcement = {
        let mut store = state.store.lock().await;
        let announcement = store.create_announcement(new);
        store.create_notification(NewNotification {
            kind: NotificationKind::AnnouncementNew,
            title: format!("New Announcement: {}", announcement.title),
            description: format!("{}...", excerpt(&announcement.description, 100)),
        });
        announcement
    };

    Ok((StatusCode::CREATED, Json(announcement)).into_response())
}

async fn delete_announcement(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_announcement(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Announcement"))
    }
}

// --- Shop ---

async fn list_shop_products(State(state): State<AppState>) -> Json<Vec<ShopProduct>> {
    let products = state.store.lock().await.list_shop_products();
    Json(products)
}

async fn get_shop_product(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<ShopProduct>> {
    let product = state
        .store
        .lock()
        .await
        .get_shop_product(&id)
        .ok_or(AppError::NotFound("Product"))?;
    Ok(Json(product))
}

async fn create_shop_product(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewShopProduct>,
) -> AppResult<Response> {
    require(&[("name", new.name.as_str()), ("link", new.link.as_str())])?;

    let product = {
        let mut store = state.store.lock().await;
        let product = store.create_shop_product(new);
        store.create_notification(NewNotification {
            kind: NotificationKind::ShopProductNew,
            title: format!("New Shop Product: {}", product.name),
            description: format!("{} - {}", category_label(product.category), product.price),
        });
        product
    };

    Ok((StatusCode::CREATED, Json(product)).into_response())
}

async fn update_shop_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ShopProductPatch>,
) -> AppResult<Json<ShopProduct>> {
    let product = state
        .store
        .lock()
        .await
        .update_shop_product(&id, patch)
        .ok_or(AppError::NotFound("Product"))?;
    Ok(Json(product))
}

async fn delete_shop_product(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_shop_product(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Product"))
    }
}

// --- Notes ---

async fn list_notes(State(state): State<AppState>) -> Json<Vec<Note>> {
    let notes = state.store.lock().await.list_notes();
    Json(notes)
}

async fn create_note(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewNote>,
) -> AppResult<Response> {
    require(&[
        ("title", new.title.as_str()),
        ("description", new.description.as_str()),
    ])?;

    let note = state.store.lock().await.create_note(new);
    Ok((StatusCode::CREATED, Json(note)).into_response())
}

async fn delete_note(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    if state.store.lock().await.delete_note(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Note"))
    }
}
