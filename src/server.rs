use crate::io_struct::ChatRelayInput;
use crate::relay_state::{RelayConfig, RelayState};
use actix_web::{HttpRequest, HttpResponse, HttpServer, error, get, web};
use serde_json::json;
use std::io::Write;

#[get("/health")]
pub async fn health(_req: HttpRequest, _: web::Data<RelayState>) -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

#[get("/get_model_info")]
pub async fn get_model_info(_req: HttpRequest, app_state: web::Data<RelayState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "model_id": app_state.model,
    }))
}

pub async fn finance_chat(
    _req: HttpRequest,
    req: web::Json<ChatRelayInput>,
    app_state: web::Data<RelayState>,
) -> HttpResponse {
    let text = match req.user_text() {
        Some(text) => text,
        None => {
            return HttpResponse::BadRequest().json(json!({"error": "No text provided"}));
        }
    };
    match app_state.chat_completion(text).await {
        Ok(reply) => HttpResponse::Ok().json(json!({"reply": reply})),
        Err(e) => {
            log::error!("OpenAI request failed: {:#}", e);
            HttpResponse::InternalServerError().json(json!({"error": "OpenAI request failed"}))
        }
    }
}

pub async fn method_not_allowed(_req: HttpRequest) -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({"error": "Only POST allowed"}))
}

// Undecodable bodies get the same response as a missing text field
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(json!({"error": "No text provided"})),
    )
    .into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(health)
        .service(get_model_info)
        .service(
            web::resource("/api/finance-chat")
                .route(web::post().to(finance_chat))
                .route(web::route().to(method_not_allowed)),
        );
}

pub async fn startup(relay_config: RelayConfig, relay_state: RelayState) -> std::io::Result<()> {
    let app_state = web::Data::new(relay_state);

    println!("Starting server at {}:{}", relay_config.host, relay_config.port);

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

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .configure(configure)
    })
    .bind((relay_config.host, relay_config.port))?
    .run()
    .await?;

    std::io::Result::Ok(())
}
