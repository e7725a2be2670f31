//! Web UI and JSON API: upload a corpus, rank its terms, manage stored files.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::storage::{sanitize_filename, UploadStore};
use crate::tfidf;

/// Shared app state: the upload store. The analyzer itself is stateless.
pub type AppState = Arc<UploadStore>;

/// Request bodies above this size are rejected before the handler runs.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Only plain-text corpora are accepted.
const ALLOWED_EXTENSION: &str = "txt";

/// User-visible failures of the upload layer. The analyzer is total over any
/// string and never contributes an error here.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no file selected")]
    MissingFile,
    #[error("invalid filename")]
    BadFilename,
    #[error("only .txt files are allowed")]
    BadExtension,
    #[error("file is not valid UTF-8 text")]
    NotUtf8,
    #[error("malformed upload: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        warn!(error = %self, "request rejected");
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

fn has_allowed_extension(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ALLOWED_EXTENSION))
}

/// JSON body for POST /analyze.
#[derive(serde::Serialize)]
pub struct AnalyzeResponse {
    pub filename: String,
    pub total_docs: usize,
    pub terms: Vec<tfidf::TermScore>,
}

/// POST /analyze: accept one multipart `.txt` file, store it, and respond
/// with the ranked terms of its content.
pub async fn analyze_handler(
    State(store): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let raw_name = field
            .file_name()
            .filter(|n| !n.is_empty())
            .ok_or(UploadError::MissingFile)?
            .to_string();
        let filename = sanitize_filename(&raw_name).ok_or(UploadError::BadFilename)?;
        if !has_allowed_extension(&filename) {
            return Err(UploadError::BadExtension);
        }

        let bytes = field.bytes().await?;
        let text = String::from_utf8(bytes.to_vec()).map_err(|_| UploadError::NotUtf8)?;
        store.save(&filename, text.as_bytes())?;

        let analysis = tfidf::analyze(&text);
        info!(
            filename,
            total_docs = analysis.total_docs,
            terms = analysis.terms.len(),
            "corpus analyzed"
        );
        return Ok(Json(AnalyzeResponse {
            filename,
            total_docs: analysis.total_docs,
            terms: analysis.terms,
        }));
    }
    Err(UploadError::MissingFile)
}

/// GET /documents: stored corpus filenames, sorted.
pub async fn list_documents(
    State(store): State<AppState>,
) -> Result<Json<Vec<String>>, UploadError> {
    Ok(Json(store.list()?))
}

/// GET /uploads/:filename: download a stored corpus as plain text.
pub async fn download_file(
    State(store): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, UploadError> {
    let filename = sanitize_filename(&filename).ok_or(UploadError::BadFilename)?;
    match store.read(&filename)? {
        Some(bytes) => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            bytes,
        )
            .into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// DELETE /documents/:filename: remove a stored corpus.
pub async fn delete_file(
    State(store): State<AppState>,
    Path(filename): Path<String>,
) -> Result<StatusCode, UploadError> {
    let filename = sanitize_filename(&filename).ok_or(UploadError::BadFilename)?;
    if store.delete(&filename)? {
        info!(filename, "corpus deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

/// GET / -> single-page frontend: upload form, ranked-terms table, stored
/// document list with download/delete.
pub async fn index_page() -> Html<&'static str> {
    const HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>TF-IDF Analyzer</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
    h1 { font-size: 1.5rem; }
    h2 { font-size: 1.125rem; margin-top: 2rem; }
    button { padding: 0.375rem 0.75rem; font-size: 0.9375rem; cursor: pointer; }
    table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
    th, td { text-align: left; padding: 0.375rem 0.5rem; border-bottom: 1px solid #eee; }
    th { font-size: 0.875rem; color: #666; }
    td.num { font-variant-numeric: tabular-nums; }
    #files li { padding: 0.25rem 0; }
    #files a { color: #06c; margin-right: 0.5rem; }
    .msg { color: #666; }
    .error { color: #c00; }
  </style>
</head>
<body>
  <h1>TF-IDF Analyzer</h1>
  <p class="msg">Upload a UTF-8 <code>.txt</code> corpus. Blank lines separate documents;
  the 50 most distinctive terms are ranked by inverse document frequency.</p>
  <form id="form">
    <input type="file" name="file" id="file" accept=".txt">
    <button type="submit">Upload and analyze</button>
  </form>
  <div id="status"></div>
  <div id="results"></div>

  <h2>Stored documents</h2>
  <ul id="files"></ul>

  <script>
    const form = document.getElementById('form');
    const fileInput = document.getElementById('file');
    const status = document.getElementById('status');
    const results = document.getElementById('results');
    const files = document.getElementById('files');

    async function refreshFiles() {
      const r = await fetch('/documents');
      const names = await r.json();
      if (names.length === 0) {
        files.innerHTML = '<li class="msg">none yet</li>';
        return;
      }
      files.innerHTML = names.map(n =>
        '<li><a href="/uploads/' + encodeURIComponent(n) + '" target="_blank" rel="noopener">' + n + '</a>' +
        '<button data-name="' + n + '">delete</button></li>'
      ).join('');
      files.querySelectorAll('button').forEach(b => b.addEventListener('click', async () => {
        await fetch('/documents/' + encodeURIComponent(b.dataset.name), { method: 'DELETE' });
        refreshFiles();
      }));
    }

    form.addEventListener('submit', async (e) => {
      e.preventDefault();
      if (!fileInput.files.length) {
        status.innerHTML = '<p class="error">No file selected</p>';
        return;
      }
      const data = new FormData();
      data.append('file', fileInput.files[0]);
      status.innerHTML = '<p class="msg">Analyzing...</p>';
      results.innerHTML = '';
      try {
        const r = await fetch('/analyze', { method: 'POST', body: data });
        const body = await r.json();
        if (!r.ok) {
          status.innerHTML = '<p class="error">' + body.error + '</p>';
          return;
        }
        status.innerHTML = '<p class="msg">"' + body.filename + '" processed: ' +
          body.total_docs + ' document(s), top ' + body.terms.length + ' terms</p>';
        results.innerHTML = '<table><tr><th>term</th><th>tf</th><th>idf</th></tr>' +
          body.terms.map(t =>
            '<tr><td>' + t.term + '</td><td class="num">' + t.tf +
            '</td><td class="num">' + t.idf.toFixed(4) + '</td></tr>'
          ).join('') + '</table>';
        refreshFiles();
      } catch (err) {
        status.innerHTML = '<p class="error">Error: ' + err + '</p>';
      }
    });

    refreshFiles();
  </script>
</body>
</html>
"#;
    Html(HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_allowed_extension("corpus.txt"));
        assert!(has_allowed_extension("corpus.TXT"));
        assert!(!has_allowed_extension("corpus.md"));
        assert!(!has_allowed_extension("corpus"));
        assert!(!has_allowed_extension("txt"));
    }

    #[test]
    fn error_status_codes() {
        assert_eq!(UploadError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(UploadError::BadExtension.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(UploadError::NotUtf8.status_code(), StatusCode::BAD_REQUEST);
        let io = UploadError::Io(std::io::Error::other("disk"));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
