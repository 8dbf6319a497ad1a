use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::extract::parse_payload;
use crate::io_struct::{GenerateRequest, GenerationPayload};
use crate::prompt::{SYSTEM_PROMPT, build_user_prompt};
use crate::upstream::UpstreamClient;
use actix_web::{HttpRequest, HttpResponse, HttpServer, error, get, options, post, web};
use std::io::Write;

pub struct AppState {
    pub config: GatewayConfig,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(&config)?;
        Ok(Self { config, upstream })
    }

    /// Run one generation end to end: credential check, prompt
    /// composition, upstream call, payload extraction.
    pub async fn generate(&self, request: &GenerateRequest) -> GatewayResult<GenerationPayload> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(GatewayError::MissingApiKey)?;

        let user_prompt = build_user_prompt(request)?;
        let content = self
            .upstream
            .complete(api_key, SYSTEM_PROMPT, &user_prompt)
            .await?;
        parse_payload(request.r#type, &content)
    }
}

/// Cross-origin headers attached to every response, pre-flight included.
pub fn cors_headers() -> actix_web::middleware::DefaultHeaders {
    actix_web::middleware::DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add((
            "Access-Control-Allow-Headers",
            "authorization, x-client-info, apikey, content-type",
        ))
}

pub fn json_config(max_payload_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler)
}

// Custom error handler keeping JSON payload failures on the standard
// error body shape.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::error!("JSON payload error: {:?}", err);
    let (status, message) = match &err {
        error::JsonPayloadError::OverflowKnownLength { length, limit } => (
            actix_web::http::StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "Payload too large: {} bytes exceeds limit of {} bytes",
                length, limit
            ),
        ),
        error::JsonPayloadError::Overflow { limit } => (
            actix_web::http::StatusCode::PAYLOAD_TOO_LARGE,
            format!("Payload exceeds limit of {} bytes", limit),
        ),
        _ => (
            actix_web::http::StatusCode::BAD_REQUEST,
            format!("Invalid JSON payload: {}", err),
        ),
    };
    let response = HttpResponse::build(status).json(serde_json::json!({ "error": message }));
    error::InternalError::from_response(err, response).into()
}

#[get("/health")]
pub async fn health(_req: HttpRequest, _: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

#[post("/v1/generate")]
pub async fn generate(
    _req: HttpRequest,
    req: web::Json<GenerateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, GatewayError> {
    let req = req.into_inner();
    log::info!(
        "AI Content request - Type: {}, Topic: {}",
        req.r#type.as_str(),
        req.subject()
    );
    let payload = app_state.generate(&req).await?;
    Ok(HttpResponse::Ok().json(payload))
}

/// Browser pre-flight probe. The permissive headers come from the wrapping
/// middleware; nothing else runs.
#[options("/v1/generate")]
pub async fn generate_preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

pub async fn startup(config: GatewayConfig, app_state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(app_state);

    println!("Starting server at {}:{}", config.host, config.port);

    // default level is info
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, log::LevelFilter::Info)
        .init();

    let max_payload_size = config.max_payload_size;
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(cors_headers())
            .app_data(app_state.clone())
            .app_data(json_config(max_payload_size))
            .service(health)
            .service(generate)
            .service(generate_preflight)
    })
    .bind((config.host, config.port))?
    .run()
    .await?;

    std::io::Result::Ok(())
}
