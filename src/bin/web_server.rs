//! Web server for the steganography API
//!
//! ```text
//! POST /api/encode   multipart: image, message, password -> base64 PNG carrier
//! POST /api/decode   multipart: image, password          -> decode status
//! GET  /api/health
//! ```

use axum::{
    extract::{multipart::Multipart, DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use clap::Parser;
use log::{error, info, warn};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use pixel_cipher::common::config::AppConfig;
use pixel_cipher::common::logging::init_logger;
use pixel_cipher::image_io::PngCodec;
use pixel_cipher::{DecodeOutcome, DecodeRequest, EncodeRequest, Pipeline, StegoError};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Serialize)]
struct EncodeResponse {
    success: bool,
    message: String,
    carrier_image_base64: String,
}

#[derive(Serialize)]
struct DecodeResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

struct AppState {
    pipeline: Pipeline<PngCodec, PngCodec>,
}

/// Multipart fields shared by both endpoints.
#[derive(Default)]
struct Form {
    image: Option<Vec<u8>>,
    message: Option<String>,
    password: Option<String>,
}

fn bad_request(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

fn error_response(e: StegoError) -> ApiError {
    let status = match &e {
        StegoError::Validation(_) => StatusCode::BAD_REQUEST,
        StegoError::CapacityExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        StegoError::AuthFailure | StegoError::NotFound => StatusCode::UNPROCESSABLE_ENTITY,
        StegoError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("❌ Request failed: {}", e);
    } else {
        warn!("⚠️ Request rejected: {}", e);
    }

    (status, Json(ErrorResponse { error: e.to_string() }))
}

async fn read_form(mut multipart: Multipart) -> Result<Form, ApiError> {
    let mut form = Form::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Failed to read multipart data: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read image data: {}", e)))?;
                form.image = Some(data.to_vec());
            }
            "message" | "password" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read field {}: {}", name, e)))?;
                if name == "message" {
                    form.message = Some(text);
                } else {
                    form.password = Some(text);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    init_logger(&config.logging.level);

    info!("🚀 Initializing web server...");

    let state = Arc::new(AppState {
        pipeline: Pipeline::png(config.image.max_input_bytes),
    });

    let body_limit = usize::try_from(config.image.max_input_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(64 * 1024);

    let app = Router::new()
        .route("/api/encode", post(encode_handler))
        .route("/api/decode", post(decode_handler))
        .route("/api/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = config.web.address.as_str();
    info!("🌐 Web server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pixel-cipher",
        "output_format": "png"
    }))
}

async fn encode_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_form(multipart).await?;

    info!(
        "📤 Encode request ({} image bytes)",
        form.image.as_ref().map_or(0, Vec::len)
    );

    let carrier = state
        .pipeline
        .encode(EncodeRequest {
            image: form.image,
            message: form.message,
            password: form.password,
        })
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::OK,
        Json(EncodeResponse {
            success: true,
            message: format!("Message embedded ({} byte PNG)", carrier.len()),
            carrier_image_base64: general_purpose::STANDARD.encode(&carrier),
        }),
    ))
}

async fn decode_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_form(multipart).await?;

    let outcome = state
        .pipeline
        .decode(DecodeRequest {
            image: form.image,
            password: form.password,
        })
        .await
        .map_err(error_response)?;

    let response = match outcome {
        DecodeOutcome::Success(message) => DecodeResponse {
            status: "success",
            message: Some(message),
        },
        DecodeOutcome::AuthFailure => DecodeResponse {
            status: "auth_failure",
            message: None,
        },
        DecodeOutcome::NotFound => DecodeResponse {
            status: "not_found",
            message: None,
        },
    };

    Ok((StatusCode::OK, Json(response)))
}
