use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use axum::{
    Router,
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::limit::RequestBodyLimitLayer;

use crate::pages;
use makan_core::bmr::estimate_bmr;
use makan_core::catalog::NutritionCatalog;
use makan_core::classifier::{FoodClassifier, RandomClassifier, label_for_index};
use makan_core::db::Database;
use makan_core::models::NewFoodHistoryEntry;
use makan_core::recommend::recommend;

const BODY_LIMIT: usize = 10 * 1024 * 1024; // 10 MB

const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

const MSG_INVALID_NUMBERS: &str = "Enter valid numbers!";
const MSG_NO_FILE: &str = "No file was uploaded";
const MSG_NO_SELECTION: &str = "No file selected";
const MSG_BAD_TYPE: &str = "File type not allowed (use png, jpg, jpeg, or gif)";

#[derive(Clone)]
struct AppState {
    db: Arc<Mutex<Database>>,
    catalog: Arc<NutritionCatalog>,
    classifier: Arc<dyn FoodClassifier>,
    upload_dir: PathBuf,
}

// --- Request types ---

#[derive(Deserialize)]
struct FlashQuery {
    error: Option<String>,
}

// Fields are raw strings: parse failures (and absent fields) become a
// flash message rather than a framework-level rejection.
#[derive(Deserialize)]
struct BmrForm {
    weight: Option<String>,
    height: Option<String>,
    age: Option<String>,
}

// --- Error handling ---

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        eprintln!("Internal server error: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::error_page())).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

// --- Flash redirect helpers ---

/// Minimal percent-encoding for a URL query parameter value.
///
/// Encodes characters that are not unreserved per RFC 3986 and would
/// break query-parameter parsing (`:`, `/`, `?`, `#`, `&`, `=`, `+`,
/// `%`, space).
fn percent_encode_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push(char::from(HEX_CHARS[(byte >> 4) as usize]));
                encoded.push(char::from(HEX_CHARS[(byte & 0x0F) as usize]));
            }
        }
    }
    encoded
}

const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";

/// Redirect back to `path` carrying a one-shot flash message in the
/// query string (no session state).
fn flash_redirect(path: &str, message: &str) -> Response {
    let target = format!("{path}?error={}", percent_encode_component(message));
    Redirect::to(&target).into_response()
}

// --- Upload validation ---

fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Reduce an uploaded filename to a safe basename.
///
/// Keeps only the final path component, turns whitespace into `_`,
/// drops anything outside `[A-Za-z0-9_.-]`, and strips leading and
/// trailing dots and underscores. May return an empty string.
fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let cleaned: String = basename
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    cleaned.trim_matches(['.', '_']).to_string()
}

// --- Handlers ---

async fn index_form(Query(query): Query<FlashQuery>) -> Html<String> {
    Html(pages::index_form(query.error.as_deref()))
}

async fn index_submit(axum::Form(form): axum::Form<BmrForm>) -> Response {
    let parse = |field: &Option<String>| -> Option<f64> {
        field.as_deref().and_then(|v| v.trim().parse::<f64>().ok())
    };

    let (Some(weight), Some(height), Some(age)) =
        (parse(&form.weight), parse(&form.height), parse(&form.age))
    else {
        return flash_redirect("/", MSG_INVALID_NUMBERS);
    };

    let bmr = estimate_bmr(weight, height, age);
    Html(pages::bmr_result(bmr as i64)).into_response()
}

async fn upload_form(Query(query): Query<FlashQuery>) -> Html<String> {
    Html(pages::upload_form(query.error.as_deref()))
}

async fn upload_submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    // Find the "file" part; anything else in the form is ignored.
    let mut file: Option<(String, axum::body::Bytes)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("file") {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| anyhow::anyhow!("failed to read upload: {e}"))?;
                    file = Some((filename, data));
                    break;
                }
            }
            Ok(None) => break,
            Err(_) => return Ok(flash_redirect("/upload", MSG_NO_FILE)),
        }
    }

    let Some((filename, data)) = file else {
        return Ok(flash_redirect("/upload", MSG_NO_FILE));
    };
    if filename.is_empty() {
        return Ok(flash_redirect("/upload", MSG_NO_SELECTION));
    }
    if !allowed_file(&filename) {
        return Ok(flash_redirect("/upload", MSG_BAD_TYPE));
    }
    let safe_name = sanitize_filename(&filename);
    if safe_name.is_empty() {
        return Ok(flash_redirect("/upload", MSG_NO_SELECTION));
    }

    // Same-name uploads overwrite the earlier file; not deduplicated.
    let file_path = state.upload_dir.join(&safe_name);
    tokio::fs::write(&file_path, &data)
        .await
        .with_context(|| format!("Failed to save upload: {}", file_path.display()))?;

    let index = state.classifier.classify(&file_path);
    let food_name = label_for_index(index);
    let calories = state.catalog.lookup(food_name);

    let entry = {
        let db = state
            .db
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        db.insert_entry(&NewFoodHistoryEntry {
            food_name: food_name.to_string(),
            calories,
        })
        .context("failed to insert history entry")?
    };

    Ok(Html(pages::upload_result(&entry.food_name, entry.calories)).into_response())
}

async fn history(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let entries = {
        let db = state
            .db
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        db.list_entries_desc().context("database error")?
    };
    Ok(Html(pages::history_page(&entries)))
}

async fn recommendation(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let entries = {
        let db = state
            .db
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        db.list_entries().context("database error")?
    };
    let rec = recommend(&entries);
    Ok(Html(pages::recommendation_page(&rec)))
}

// --- Router builder ---

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_form).post(index_submit))
        .route("/upload", get(upload_form).post(upload_submit))
        .route("/history", get(history))
        .route("/recommendation", get(recommendation))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .with_state(state)
}

// --- Server startup ---

pub async fn start_server(
    db: Database,
    catalog: NutritionCatalog,
    upload_dir: PathBuf,
    port: u16,
    bind: &str,
) -> anyhow::Result<()> {
    if catalog.is_empty() {
        eprintln!("Warning: nutrition catalog is empty; every lookup will use the default value.");
    }

    let state = AppState {
        db: Arc::new(Mutex::new(db)),
        catalog: Arc::new(catalog),
        classifier: Arc::new(RandomClassifier),
        upload_dir,
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}")).await?;
    eprintln!("Listening on http://{bind}:{port}");
    axum::serve(listener, app).await?;

    Ok(())
}
