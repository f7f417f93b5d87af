//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::irail::ParseError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route(
            "/liveboard",
            get(show_liveboard)
                .put(update_liveboard)
                .post(update_liveboard),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Full page with the current board.
async fn index_page(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Html<String>, AppError> {
    let lang = state.language(query.lang.as_deref());
    let current = state.snapshot.current().await;

    let (title, board) = match &current {
        Some(board) => (
            board.station.clone(),
            render(&LiveboardTemplate::from_liveboard(board, lang))?,
        ),
        None => ("Liveboard".to_string(), String::new()),
    };

    let page = IndexTemplate {
        lang,
        title,
        font_url: state.config.font_url.clone(),
        board,
    };

    Ok(Html(render(&page)?))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// The current board: HTML fragment or normalized JSON, by `Accept`.
async fn show_liveboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BoardQuery>,
) -> Result<Response, AppError> {
    let board = state
        .snapshot
        .current()
        .await
        .ok_or_else(|| AppError::NotFound {
            message: "no liveboard received yet".into(),
        })?;

    if accepts_html(&headers) {
        let lang = state.language(query.lang.as_deref());
        let html = render(&LiveboardTemplate::from_liveboard(&board, lang))?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(board.as_ref().clone()).into_response())
    }
}

/// Replace the board with a new upstream payload.
async fn update_liveboard(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<UpdateResponse>, AppError> {
    let board = state.snapshot.update(&state.parser, &body).await?;

    Ok(Json(UpdateResponse {
        station: board.station.clone(),
        departures: board.departures().len(),
    }))
}

fn render(template: &impl Template) -> Result<String, AppError> {
    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
        details: Vec<String>,
    },
    NotFound {
        message: String,
    },
    Internal {
        message: String,
    },
}

impl From<ParseError> for AppError {
    fn from(e: ParseError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
            details: e.details(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::BadRequest { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, vec![]),
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, vec![])
            }
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse {
            error: message,
            details,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::HeaderValue;
    use serde_json::Value;

    use super::*;
    use crate::config::ServerConfig;
    use crate::domain::Language;

    const FIXTURE: &str = include_str!("../../fixtures/liveboard.json");

    fn test_state() -> AppState {
        AppState::new(ServerConfig {
            font_url: None,
            ..ServerConfig::default()
        })
    }

    fn html_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        headers
    }

    fn lang(code: &str) -> Query<BoardQuery> {
        Query(BoardQuery {
            lang: Some(code.into()),
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn no_board_yet() {
        let state = test_state();

        let err = show_liveboard(State(state.clone()), html_headers(), Query(BoardQuery::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        // The page still renders, with an empty body.
        let Html(page) = index_page(State(state), Query(BoardQuery::default()))
            .await
            .unwrap();
        assert!(page.contains("<title>Liveboard</title>"));
        assert!(!page.contains("items-container"));
    }

    #[tokio::test]
    async fn update_then_show_html() {
        let state = test_state();

        let Json(summary) = update_liveboard(State(state.clone()), FIXTURE.to_string())
            .await
            .unwrap();
        assert_eq!(summary.station, "Brussels-Central");
        assert_eq!(summary.departures, 3);

        let response = show_liveboard(State(state), html_headers(), lang("de"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert_eq!(html.matches("class=\"item__destination\"").count(), 3);
        assert!(html.contains("item item--left"));
        assert!(html.contains("item item--canceled"));
        assert!(html.contains("item item--extra"));
        assert!(html.contains("Heute nicht fahren"));
    }

    #[tokio::test]
    async fn show_json_by_default() {
        let state = test_state();
        let Json(_) = update_liveboard(State(state.clone()), FIXTURE.to_string())
            .await
            .unwrap();

        let response = show_liveboard(State(state), HeaderMap::new(), Query(BoardQuery::default()))
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();

        assert_eq!(json["station"], "Brussels-Central");
        assert_eq!(json["timestamp"], 1_700_000_000);
        assert_eq!(json["departures"]["number"], 3);
        assert_eq!(json["departures"]["departure"][1]["canceled"], true);
        assert_eq!(
            json["departures"]["departure"][1]["platforminfo"]["isNormalTrack"],
            false
        );
    }

    #[tokio::test]
    async fn malformed_update_is_rejected() {
        let state = test_state();
        let Json(_) = update_liveboard(State(state.clone()), FIXTURE.to_string())
            .await
            .unwrap();

        let err = update_liveboard(State(state.clone()), r#"{"version": "1.3"}"#.to_string())
            .await
            .unwrap_err();
        let AppError::BadRequest { message, details } = &err else {
            panic!("expected bad request, got {err:?}");
        };
        assert_eq!(message, "Liveboard api data is in an unexpected format.");
        assert!(details.contains(&"departures: missing field".to_string()));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"], "Liveboard api data is in an unexpected format.");
        assert_eq!(
            json["details"],
            serde_json::json!(["stationinfo: missing field", "departures: missing field"])
        );

        // The previous board is still served.
        assert_eq!(
            state.snapshot.current().await.unwrap().station,
            "Brussels-Central"
        );
    }

    #[tokio::test]
    async fn index_page_embeds_board() {
        let state = test_state();
        let Json(_) = update_liveboard(State(state.clone()), FIXTURE.to_string())
            .await
            .unwrap();

        let Html(page) = index_page(State(state), lang("fr")).await.unwrap();
        assert!(page.contains(&format!("<html lang=\"{}\">", Language::Fr)));
        assert!(page.contains("<title>Brussels-Central</title>"));
        assert!(page.contains("<div class=\"items-container\">"));
        assert!(page.contains("Ne roule pas aujourd"));
    }

    #[test]
    fn accepts_html_header() {
        assert!(accepts_html(&html_headers()));
        assert!(!accepts_html(&HeaderMap::new()));

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_html(&headers));
    }

    #[test]
    fn error_status_codes() {
        let not_found = AppError::NotFound {
            message: "x".into(),
        };
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let internal = AppError::Internal {
            message: "x".into(),
        };
        assert_eq!(
            internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
