//! Transcription and report generation over real HTTP.

mod common;

use anyhow::Result;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use voicenotes_ai::MockGateway;

fn audio_form(note_id: &str, file_name: &str, bytes: &[u8]) -> Form {
    Form::new()
        .part(
            "audio",
            Part::bytes(bytes.to_vec())
                .file_name(file_name.to_string())
                .mime_str("audio/webm")
                .unwrap(),
        )
        .text("noteId", note_id.to_string())
}

#[tokio::test]
async fn test_transcribe_updates_note() -> Result<()> {
    let server = common::TestServer::start().await?;
    let note = server.create_note("Voice").await?;
    let id = note["id"].as_str().unwrap();

    let resp = server
        .post("/api/transcribe")
        .multipart(audio_form(id, "recording.webm", b"\x1aE\xdf\xa3audio"))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = resp.json().await?;
    assert_eq!(body["text"], "hello from audio");
    assert_eq!(body["noteId"], id);

    let stored: Value = server
        .get(&format!("/api/notes/{}", id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(stored["transcription"], "hello from audio");
    assert_eq!(stored["title"], "Voice");

    let calls = server.gateway.transcribe_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].bytes, b"\x1aE\xdf\xa3audio".to_vec());
    assert!(!calls[0].path.exists(), "temp file should be removed");

    Ok(())
}

#[tokio::test]
async fn test_transcribe_without_file_part() -> Result<()> {
    let server = common::TestServer::start().await?;
    let note = server.create_note("Voice").await?;

    let form = Form::new().text("noteId", note["id"].as_str().unwrap().to_string());
    let resp = server.post("/api/transcribe").multipart(form).send().await?;
    assert_eq!(resp.status().as_u16(), 400);
    assert!(server.gateway.transcribe_calls().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_transcribe_unknown_note() -> Result<()> {
    let server = common::TestServer::start().await?;

    let resp = server
        .post("/api/transcribe")
        .multipart(audio_form("missing", "a.webm", b"x"))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 404);
    assert!(server.gateway.transcribe_calls().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_transcribe_gateway_failure() -> Result<()> {
    let server =
        common::TestServer::start_with_gateway(MockGateway::failing("provider unavailable"))
            .await?;
    let note = server.create_note("Voice").await?;
    let id = note["id"].as_str().unwrap();

    let resp = server
        .post("/api/transcribe")
        .multipart(audio_form(id, "clip.mp3", b"ID3"))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 502);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "upstream_error");

    let stored: Value = server
        .get(&format!("/api/notes/{}", id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(stored["transcription"], "");
    assert_eq!(stored["updatedAt"], note["updatedAt"]);

    let calls = server.gateway.transcribe_calls();
    assert_eq!(calls.len(), 1);
    assert!(!calls[0].path.exists(), "temp file should be removed");

    Ok(())
}

#[tokio::test]
async fn test_generate_report() -> Result<()> {
    let server = common::TestServer::start().await?;
    let note = server.create_note("Idea").await?;
    let id = note["id"].as_str().unwrap();

    server
        .patch(&format!("/api/notes/{}", id))
        .json(&serde_json::json!({"transcription": "open a coffee truck"}))
        .send()
        .await?;

    let resp = server
        .post(&format!("/api/generate-report/{}", id))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await?;
    assert_eq!(body["report"], "Business report");

    let stored: Value = server
        .get(&format!("/api/notes/{}", id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(stored["aiReport"], "Business report");
    assert_eq!(
        server.gateway.report_calls(),
        vec!["open a coffee truck".to_string()]
    );

    Ok(())
}

#[tokio::test]
async fn test_generate_report_failure() -> Result<()> {
    let server =
        common::TestServer::start_with_gateway(MockGateway::failing("rate limited")).await?;
    let note = server.create_note("Idea").await?;
    let id = note["id"].as_str().unwrap();

    let resp = server
        .post(&format!("/api/generate-report/{}", id))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 502);

    let stored: Value = server
        .get(&format!("/api/notes/{}", id))
        .send()
        .await?
        .json()
        .await?;
    assert!(stored["aiReport"].is_null());

    Ok(())
}

#[tokio::test]
async fn test_generate_report_bad_ids() -> Result<()> {
    let server = common::TestServer::start().await?;

    let resp = server.post("/api/generate-report").send().await?;
    assert_eq!(resp.status().as_u16(), 400);

    let resp = server.post("/api/generate-report/unknown").send().await?;
    assert_eq!(resp.status().as_u16(), 404);
    assert!(server.gateway.report_calls().is_empty());

    Ok(())
}
