//! Live collection watch endpoint.
//!
//! Clients open a WebSocket per collection and receive the full collection
//! snapshot immediately, then again after every mutation of that
//! collection. Pushing whole snapshots keeps clients trivially consistent
//! at the cost of bandwidth, which is fine at this data size.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::{debug, warn};

use tienda_db::{
    AffiliateRepository, ProductRepository, SaleRepository, SupplierRepository,
    changes::Collection,
};

use crate::AppState;
use crate::routes::{affiliates, products, sales, suppliers};

/// Creates the watch routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/watch/{collection}", get(watch_collection))
}

/// GET `/watch/{collection}` - Subscribe to snapshot pushes for a collection.
async fn watch_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let Ok(collection) = collection.parse::<Collection>() else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "NOT_FOUND",
                "message": format!("Unknown collection '{collection}'"),
            })),
        )
            .into_response();
    };
    ws.on_upgrade(move |socket| watch_loop(socket, state, collection))
        .into_response()
}

async fn watch_loop(mut socket: WebSocket, state: AppState, collection: Collection) {
    let mut events = state.changes.subscribe();
    debug!(collection = collection.as_str(), "Watch session opened");

    if !push_snapshot(&mut socket, &state, collection).await {
        return;
    }

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) if event.collection == collection => {
                        if !push_snapshot(&mut socket, &state, collection).await {
                            break;
                        }
                    }
                    Ok(_) => {}
                    // A lagged receiver missed events; the next snapshot
                    // covers them all.
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {
                        if !push_snapshot(&mut socket, &state, collection).await {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
            message = socket.recv() => {
                match message {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(error = %e, "Watch socket error");
                        break;
                    }
                }
            }
        }
    }

    debug!(collection = collection.as_str(), "Watch session closed");
}

/// Sends the current snapshot; returns false when the socket is gone.
async fn push_snapshot(socket: &mut WebSocket, state: &AppState, collection: Collection) -> bool {
    let payload = match snapshot_json(state, collection).await {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, collection = collection.as_str(), "Snapshot query failed");
            return true;
        }
    };
    socket.send(Message::Text(payload.into())).await.is_ok()
}

async fn snapshot_json(state: &AppState, collection: Collection) -> Result<String, DbErr> {
    let db = (*state.db).clone();
    let items = match collection {
        Collection::Affiliates => {
            let rows = AffiliateRepository::new(db).list().await?;
            serde_json::to_value(
                rows.into_iter()
                    .map(affiliates::AffiliateResponse::from)
                    .collect::<Vec<_>>(),
            )
        }
        Collection::Suppliers => {
            let rows = SupplierRepository::new(db).list().await?;
            serde_json::to_value(
                rows.into_iter()
                    .map(suppliers::SupplierResponse::from)
                    .collect::<Vec<_>>(),
            )
        }
        Collection::Products => {
            let rows = ProductRepository::new(db).list().await?;
            serde_json::to_value(
                rows.into_iter()
                    .map(products::ProductResponse::from)
                    .collect::<Vec<_>>(),
            )
        }
        Collection::Sales => {
            let rows = SaleRepository::new(db).list().await?;
            serde_json::to_value(
                rows.into_iter()
                    .map(sales::SaleResponse::from)
                    .collect::<Vec<_>>(),
            )
        }
    };
    let items = items.map_err(|e| DbErr::Custom(e.to_string()))?;
    let envelope = json!({
        "collection": collection.as_str(),
        "items": items,
    });
    Ok(envelope.to_string())
}
