//! Business report generation.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use voicenotes_store::NoteUpdate;

use crate::error::{Result, ServerError};
use crate::extract::require_id;
use crate::state::AppState;

/// Generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report: String,
}

/// POST /api/generate-report/{noteId}
///
/// The report is stored in the note's `aiReport`. If the note disappears
/// while the provider is working, the report is still returned.
pub async fn generate_report_handler(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<ReportResponse>> {
    let note_id = require_id(&note_id)?;
    let note = state
        .storage
        .get_note(note_id)
        .ok_or_else(|| ServerError::NotFound(format!("Note {} not found", note_id)))?;

    let report = state
        .gateway
        .generate_business_report(&note.transcription)
        .await?;

    if state
        .storage
        .update_note(note_id, &NoteUpdate::ai_report(report.clone()))
        .is_none()
    {
        warn!(note_id = %note_id, "Note removed before report could be stored");
    } else {
        info!(note_id = %note_id, gateway = state.gateway.name(), "Report generated");
    }

    Ok(Json(ReportResponse { report }))
}

/// POST /api/generate-report
pub async fn missing_note_id_handler() -> ServerError {
    ServerError::BadRequest("Missing noteId".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{TestApp, json_body};
    use axum::http::{Method, StatusCode};
    use std::sync::Arc;
    use voicenotes_ai::{AiError, MockGateway};
    use voicenotes_store::Note;

    #[tokio::test]
    async fn test_report_is_stored_on_note() {
        let gateway = Arc::new(MockGateway::new("t", "Summary: sell lemonade"));
        let app = TestApp::with_gateway(gateway.clone());
        let note = app.state.storage.add_note(Note::new("Idea"));
        app.state
            .storage
            .update_note(&note.id, &NoteUpdate::transcription("lemonade stand"));

        let response = app
            .send(Method::POST, &format!("/api/generate-report/{}", note.id))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: ReportResponse = json_body(response).await;
        assert_eq!(body.report, "Summary: sell lemonade");

        let stored = app.state.storage.get_note(&note.id).unwrap();
        assert_eq!(stored.ai_report.as_deref(), Some("Summary: sell lemonade"));
        assert_eq!(gateway.report_calls(), vec!["lemonade stand".to_string()]);
    }

    #[tokio::test]
    async fn test_report_failure_leaves_note_unchanged() {
        let app = TestApp::with_gateway(Arc::new(MockGateway::failing("quota")));
        let note = app.state.storage.add_note(Note::new("Idea"));

        let response = app
            .send(Method::POST, &format!("/api/generate-report/{}", note.id))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let stored = app.state.storage.get_note(&note.id).unwrap();
        assert!(stored.ai_report.is_none());
        assert_eq!(stored, note);
    }

    #[tokio::test]
    async fn test_missing_provider_config_is_500() {
        let app = TestApp::with_gateway(Arc::new(MockGateway::failing_with(
            "no api key",
            AiError::Config,
        )));
        let note = app.state.storage.add_note(Note::new("Idea"));

        let response = app
            .send(Method::POST, &format!("/api/generate-report/{}", note.id))
            .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let stored = app.state.storage.get_note(&note.id).unwrap();
        assert!(stored.ai_report.is_none());
    }

    #[tokio::test]
    async fn test_unknown_note_is_404() {
        let gateway = Arc::new(MockGateway::new("t", "r"));
        let app = TestApp::with_gateway(gateway.clone());

        let response = app.send(Method::POST, "/api/generate-report/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(gateway.report_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_note_id_is_400() {
        let app = TestApp::new();

        let response = app.send(Method::POST, "/api/generate-report").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.send(Method::POST, "/api/generate-report/").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.send(Method::POST, "/api/generate-report/%20").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
