//! Server-rendered chat page
//!
//! Every handler renders the full page. Backend failures become an inline
//! banner, never an error status.

use axum::{
    extract::{Form, Multipart, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatTurn, Role};
use crate::error::Error;
use crate::server::state::{ChatUiState, CHAT_PAGE};
use crate::types::{SearchResult, StatusKind, StatusResponse, DEFAULT_SEARCH_LIMIT};

use super::documents::is_pdf_filename;

/// Cookie carrying the chat session id
pub const SESSION_COOKIE: &str = "pdf_rag_session";

const MAX_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
struct Banner {
    kind: &'static str,
    message: String,
}

impl Banner {
    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }

    fn from_status(response: StatusResponse) -> Self {
        let kind = match response.status {
            StatusKind::Success => "success",
            StatusKind::Info => "info",
            StatusKind::Error => "error",
        };
        Self {
            kind,
            message: response.message,
        }
    }
}

#[derive(Debug, Serialize)]
struct ResultView {
    rank: usize,
    score: String,
    text: String,
    source: Option<String>,
    page: Option<u64>,
}

impl ResultView {
    fn new(rank: usize, result: SearchResult) -> Self {
        let meta = result.metadata.as_ref();
        Self {
            rank,
            score: format!("{:.4}", result.score),
            source: meta
                .and_then(|m| m.get("source"))
                .and_then(|v| v.as_str())
                .map(str::to_string),
            page: meta.and_then(|m| m.get("page")).and_then(|v| v.as_u64()),
            text: result.text,
        }
    }
}

#[derive(Debug, Serialize)]
struct TurnView {
    is_user: bool,
    content: String,
    at: String,
}

impl From<ChatTurn> for TurnView {
    fn from(turn: ChatTurn) -> Self {
        Self {
            is_user: turn.role == Role::User,
            at: turn.at.format("%H:%M:%S").to_string(),
            content: turn.content,
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct PageView {
    collection: String,
    banner: Option<Banner>,
    query: String,
    limit: usize,
    searched: bool,
    results: Vec<ResultView>,
    transcript: Vec<TurnView>,
}

/// Clamp a submitted limit into 1..=10, defaulting to 5
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT)
}

/// Session id from the request cookie header, if present
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

/// Caller's chat session, if one is open
struct Session {
    id: Option<String>,
    is_new: bool,
}

impl Session {
    /// Look up the cookie's session without opening one
    fn find(state: &ChatUiState, headers: &HeaderMap) -> Self {
        let id = session_cookie(headers).and_then(|c| state.sessions().find(&c));
        Self { id, is_new: false }
    }

    /// Id of the caller's session, opening one if needed
    fn open(&mut self, state: &ChatUiState) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => {
                let id = state.sessions().open();
                self.id = Some(id.clone());
                self.is_new = true;
                id
            }
        }
    }
}

/// Render the page for a session, setting the cookie if it is new
fn render(state: &ChatUiState, session: &Session, mut view: PageView) -> Response {
    view.collection = state.config().qdrant.collection.clone();
    if view.limit == 0 {
        view.limit = DEFAULT_SEARCH_LIMIT;
    }
    if let Some(id) = &session.id {
        view.transcript = state
            .sessions()
            .transcript(id)
            .into_iter()
            .map(TurnView::from)
            .collect();
    }

    let html = match state.templates().render(CHAT_PAGE, &view) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Failed to render chat page: {}", e);
            return Error::internal(format!("Failed to render page: {}", e)).into_response();
        }
    };

    let mut response = (StatusCode::OK, Html(html)).into_response();
    if let (true, Some(id)) = (session.is_new, &session.id) {
        let value = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
        if let Ok(value) = HeaderValue::from_str(&value) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

/// GET /
pub async fn index(State(state): State<ChatUiState>, headers: HeaderMap) -> Response {
    let session = Session::find(&state, &headers);
    render(&state, &session, PageView::default())
}

/// POST /upload - multipart field `file`
pub async fn upload(
    State(state): State<ChatUiState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let banner = match read_upload(&mut multipart).await {
        Ok((filename, data)) => match state.documents().upload_pdf(&filename, data).await {
            Ok(response) => Banner::from_status(response),
            Err(e) => {
                tracing::error!("Upload of {} failed: {}", filename, e);
                Banner::error(format!("Error uploading PDF: {}", e))
            }
        },
        Err(message) => Banner::error(message),
    };

    let session = Session::find(&state, &headers);
    render(
        &state,
        &session,
        PageView {
            banner: Some(banner),
            ..Default::default()
        },
    )
}

/// Pull the PDF out of the form, rejecting other files before any call
async fn read_upload(multipart: &mut Multipart) -> Result<(String, Vec<u8>), String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read upload: {}", e))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err("Choose a PDF file to upload.".to_string());
        }
        if !is_pdf_filename(&filename) {
            return Err(format!("Only PDF files are supported: {}", filename));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| format!("Failed to read upload: {}", e))?;
        return Ok((filename, data.to_vec()));
    }
    Err("Choose a PDF file to upload.".to_string())
}

/// POST /create-collection
pub async fn create_collection(State(state): State<ChatUiState>, headers: HeaderMap) -> Response {
    let banner = match state.documents().create_collection().await {
        Ok(response) => Banner::from_status(response),
        Err(e) => Banner::error(format!("Error creating collection: {}", e)),
    };
    let session = Session::find(&state, &headers);
    render(
        &state,
        &session,
        PageView {
            banner: Some(banner),
            ..Default::default()
        },
    )
}

/// POST /search
pub async fn search(
    State(state): State<ChatUiState>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Response {
    let limit = parse_limit(form.limit.as_deref());
    let query = form.query.trim().to_string();
    let mut view = PageView {
        limit,
        ..Default::default()
    };

    if query.is_empty() {
        view.banner = Some(Banner {
            kind: "info",
            message: "Enter a search query.".to_string(),
        });
        return render(&state, &Session::find(&state, &headers), view);
    }

    match state.documents().search(&query, limit).await {
        Ok(results) => {
            view.searched = true;
            view.results = results
                .into_iter()
                .enumerate()
                .map(|(i, r)| ResultView::new(i + 1, r))
                .collect();
        }
        Err(e) => view.banner = Some(Banner::error(format!("Error searching documents: {}", e))),
    }
    view.query = query;
    render(&state, &Session::find(&state, &headers), view)
}

/// POST /chat
pub async fn chat(
    State(state): State<ChatUiState>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Response {
    let mut session = Session::find(&state, &headers);
    let message = form.message.trim();
    if message.is_empty() {
        return render(&state, &session, PageView::default());
    }

    let outcome = state.chat().respond(message).await;
    let id = session.open(&state);
    state.sessions().append(
        &id,
        [ChatTurn::user(message), ChatTurn::assistant(outcome.reply())],
    );

    let view = PageView {
        banner: outcome.error().map(Banner::error),
        ..Default::default()
    };
    render(&state, &session, view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None), 5);
        assert_eq!(parse_limit(Some("")), 5);
        assert_eq!(parse_limit(Some("3")), 3);
        assert_eq!(parse_limit(Some("0")), 1);
        assert_eq!(parse_limit(Some("42")), 10);
    }

    #[test]
    fn test_session_cookie_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; pdf_rag_session=abc-123"),
        );
        assert_eq!(session_cookie(&headers).as_deref(), Some("abc-123"));
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }
}
