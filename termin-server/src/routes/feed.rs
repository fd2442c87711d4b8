//! The public RSS feed endpoint.

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
    routing::get,
};

use termin_core::event::sort_by_start;
use termin_core::feed::{FeedChannel, serialize_feed};
use termin_core::store::EventStore;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/feed.rss", get(serve_feed))
}

/// GET /api/feed.rss - the full event list as RSS. Public, no parameters.
async fn serve_feed(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let channel = FeedChannel {
        title: state.feed.title.clone(),
        link: base_url(&headers),
        description: state.feed.description.clone(),
    };

    let body = feed_document(state.store.as_ref(), &channel).await;

    (
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        body,
    )
}

/// Build the feed document from the store.
///
/// A store failure yields a valid empty-channel document instead of an HTTP
/// error, so feed readers do not treat a transient failure as feed removal.
async fn feed_document(store: &dyn EventStore, channel: &FeedChannel) -> String {
    let mut events = match store.list_events().await {
        Ok(events) => events,
        Err(err) => {
            tracing::error!("feed: failed to load events: {err}");
            Vec::new()
        }
    };

    sort_by_start(&mut events);
    serialize_feed(&events, channel)
}

/// The deployment's own base address, taken from the request at serve time.
fn base_url(headers: &HeaderMap) -> String {
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{proto}://{host}")
}
