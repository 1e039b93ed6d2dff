use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Request, State, multipart::MultipartError},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;

use crate::attributes::{MappingPolicy, ProfileAttributes};
use crate::config::AppConfig;
use crate::downloader::frequencies_to_csv;
use crate::error::{ParseErrorKind, ProfileError};
use crate::loader::{is_csv_file, profile_from_bytes};
use crate::profile::{CloudKind, ProfileView, cloud_frequencies, render_cloud};
use crate::session::{Session, UploadFailure, UploadOutcome, UploadTicket};

/// Multipart field carrying the uploaded export
pub const UPLOAD_FIELD: &str = "profile";

pub struct AppState {
    session: Mutex<Session>,
    config: AppConfig,
    templates: Handlebars<'static>,
}

impl AppState {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Serialize)]
struct LandingPage<'a> {
    error: Option<&'a UploadFailure>,
    loading: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: Option<String>,
}

/// Upload in progress; abandons its ticket if dropped before completing
struct UploadGuard {
    state: Arc<AppState>,
    ticket: Option<UploadTicket>,
}

impl UploadGuard {
    fn begin(state: Arc<AppState>) -> Self {
        let ticket = state.session().begin_upload();
        UploadGuard {
            state,
            ticket: Some(ticket),
        }
    }

    fn complete(mut self, result: Result<ProfileAttributes, ProfileError>) -> UploadOutcome {
        match self.ticket.take() {
            Some(ticket) => self.state.session().complete(ticket, result),
            None => UploadOutcome::Stale,
        }
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.state.session().abandon(ticket);
        }
    }
}

fn upload_error(e: MultipartError, limit: usize) -> ProfileError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ProfileError::TooLarge { limit }
    } else {
        ProfileError::Upload(e.body_text())
    }
}

/// Status code the landing page is returned with for a failed upload
fn failure_status(failure: &UploadFailure) -> StatusCode {
    match failure.code.as_str() {
        "too_large" => StatusCode::PAYLOAD_TOO_LARGE,
        "upload_failed" => StatusCode::BAD_REQUEST,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: Some(message.into()),
        }),
    )
        .into_response()
}

/// Builds the application router with a fresh session.
pub fn router(config: AppConfig) -> Result<Router, ProfileError> {
    let mut templates = Handlebars::new();
    templates
        .register_template_string("landing", include_str!("./templates/landing.hbs"))
        .map_err(|e| ProfileError::Config(e.to_string()))?;
    templates
        .register_template_string("profile", include_str!("./templates/profile.hbs"))
        .map_err(|e| ProfileError::Config(e.to_string()))?;

    let upload_limit = config.upload_limit;
    let app_state = Arc::new(AppState {
        session: Mutex::new(Session::new()),
        config,
        templates,
    });

    Ok(Router::new()
        .route("/", get(serve_landing))
        .route("/profile", get(serve_profile))
        .route(
            "/api/upload",
            post(upload_profile).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/back", post(go_back))
        .route("/api/profile", get(get_profile))
        .route("/api/cloud/:name", get(get_cloud))
        .layer(middleware::from_fn(log_requests))
        .with_state(app_state))
}

pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.addr;
    let app = router(config)?;

    let listener = TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    log::info!("{} {} -> {}", method, uri, response.status().as_u16());
    response
}

fn render_page<T: Serialize>(state: &AppState, name: &str, data: &T) -> Response {
    match state.templates.render(name, data) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            log::error!("failed to render {} page: {}", name, e);
            error_json(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn serve_landing(State(state): State<Arc<AppState>>) -> Response {
    let (failure, loading) = {
        let session = state.session();
        (session.failure().cloned(), session.is_loading())
    };

    render_page(
        &state,
        "landing",
        &LandingPage {
            error: failure.as_ref(),
            loading,
        },
    )
}

async fn serve_profile(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.session().snapshot();
    let Some(snapshot) = snapshot else {
        return Redirect::to("/").into_response();
    };

    let size = state.config.cloud_size();
    let options = state.config.cloud.clone();
    let view = tokio::task::spawn_blocking(move || ProfileView::build(&snapshot, size, &options))
        .await
        .unwrap_or_else(|e| Err(ProfileError::Io(std::io::Error::other(e))));

    match view {
        Ok(view) => render_page(&state, "profile", &view),
        Err(e) => {
            log::error!("failed to build profile page: {}", e);
            error_json(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn upload_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let upload = UploadGuard::begin(state.clone());
    let limit = state.config.upload_limit;

    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    let result = match declared {
        Some(length) if length > limit => Err(ProfileError::TooLarge { limit }),
        _ => read_upload(multipart, limit, state.config.mapping).await,
    };

    match upload.complete(result) {
        UploadOutcome::Installed(_) | UploadOutcome::Stale => {
            Redirect::to("/profile").into_response()
        }
        UploadOutcome::Failed(failure) => {
            let mut response = render_page(
                &state,
                "landing",
                &LandingPage {
                    error: Some(&failure),
                    loading: false,
                },
            );
            *response.status_mut() = failure_status(&failure);
            response
        }
    }
}

async fn read_upload(
    mut multipart: Multipart,
    limit: usize,
    policy: MappingPolicy,
) -> Result<ProfileAttributes, ProfileError> {
    let mut file_name = None;
    let mut file_data = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            file_name = field.file_name().map(str::to_string);
            file_data = field
                .bytes()
                .await
                .map_err(|e| upload_error(e, limit))?
                .to_vec();
        }
    }

    match file_name {
        Some(name) if !is_csv_file(&name) => Err(ParseErrorKind::UnsupportedFile.into()),
        _ if file_data.is_empty() => Err(ParseErrorKind::EmptyFile.into()),
        _ => tokio::task::spawn_blocking(move || profile_from_bytes(&file_data, policy))
            .await
            .unwrap_or_else(|e| Err(ProfileError::Io(std::io::Error::other(e)))),
    }
}

async fn go_back(State(state): State<Arc<AppState>>) -> Redirect {
    state.session().back();
    Redirect::to("/")
}

async fn get_profile(State(state): State<Arc<AppState>>) -> Response {
    match state.session().snapshot() {
        Some(snapshot) => Json(&*snapshot).into_response(),
        None => error_json(StatusCode::NOT_FOUND, "No profile uploaded"),
    }
}

async fn get_cloud(Path(name): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    let (kind_name, as_csv) = match name.strip_suffix(".csv") {
        Some(stem) => (stem, true),
        None => (name.strip_suffix(".svg").unwrap_or(&name), false),
    };

    let Some(kind) = CloudKind::from_name(kind_name) else {
        return error_json(StatusCode::NOT_FOUND, format!("Unknown cloud {}", name));
    };
    let snapshot = state.session().snapshot();
    let Some(snapshot) = snapshot else {
        return error_json(StatusCode::NOT_FOUND, "No profile uploaded");
    };

    if as_csv {
        return match frequencies_to_csv(&cloud_frequencies(&snapshot, kind)) {
            Ok(csv) => ([(header::CONTENT_TYPE, "text/csv")], csv).into_response(),
            Err(e) => error_json(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };
    }

    let size = state.config.cloud_size();
    let options = state.config.cloud.clone();
    let svg = tokio::task::spawn_blocking(move || render_cloud(&snapshot, kind, size, &options))
        .await
        .unwrap_or_else(|e| Err(ProfileError::Io(std::io::Error::other(e))));

    match svg {
        Ok(Some(svg)) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Ok(None) => error_json(
            StatusCode::NOT_FOUND,
            format!("Profile has no {} attribute", kind.attribute()),
        ),
        Err(e) => error_json(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
