use crate::document::{Document, DocumentSnapshot};
use crate::fetcher::load_dashboard;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};

/// Each page load gets its own document and charts.
async fn render_pass(state: &AppState) -> Document {
    let mut doc = Document::default();
    load_dashboard(&state.client, &mut doc).await;
    doc
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let doc = render_pass(&state).await;
    Html(render_index(&doc))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DocumentSnapshot> {
    let doc = render_pass(&state).await;
    Json(doc.snapshot())
}

pub async fn health() -> &'static str {
    "ok"
}
