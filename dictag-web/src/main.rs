//! Servidor web Axum com WebSocket para etiquetagem por dicionário em tempo real

mod config;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use dictag_core::{
    pipeline::{DictionaryTagger, PipelineEvent},
    tagger::{EntitySpan, TaggedToken},
    tokenizer::{Token, Tokenizer, TokenizerMode},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};

/// Estado compartilhado da aplicação
struct AppState {
    tagger: DictionaryTagger,
}

#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Deserialize)]
struct TokenizeRequest {
    text: String,
    #[serde(default)]
    tokenizer_mode: Option<TokenizerMode>,
}

#[derive(Serialize)]
struct TokenView {
    #[serde(flatten)]
    token: Token,
    text: String,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    entities: Vec<EntitySpan>,
    tagged_tokens: Vec<TaggedToken>,
    processing_ms: u64,
    total_tokens: usize,
}

#[derive(Serialize)]
struct DictionaryInfo {
    nodes: usize,
    terms: usize,
    tokenizer: Tokenizer,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let tagger = config.load_tagger()?;
    let state = Arc::new(AppState { tagger });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("🚀 Servidor dictag iniciado em http://{}", config.addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tokenize", post(tokenize_handler))
        .route("/analyze", post(analyze_handler))
        .route("/dictionary", get(dictionary_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn empty_text() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": "Texto vazio"})),
    )
        .into_response()
}

/// Tokens do texto, com o tokenizador configurado ou outro modo pedido.
async fn tokenize_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenizeRequest>,
) -> impl IntoResponse {
    if req.text.is_empty() {
        return empty_text();
    }

    let mut tokenizer = state.tagger.tokenizer.clone();
    if let Some(mode) = req.tokenizer_mode {
        tokenizer.mode = mode;
    }
    let tokens: Vec<TokenView> = tokenizer
        .tag(&req.text)
        .map(|token| TokenView {
            text: token.text(&req.text).to_string(),
            token,
        })
        .collect();

    Json(tokens).into_response()
}

/// Etiquetagem via HTTP POST (sem streaming)
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return empty_text();
    }

    let start = Instant::now();
    let (tagged, entities) = state.tagger.analyze(&req.text);
    let total_tokens = tagged.len();

    Json(AnalyzeResponse {
        processing_ms: start.elapsed().as_millis() as u64,
        entities,
        tagged_tokens: tagged,
        total_tokens,
    })
    .into_response()
}

/// Tamanho do dicionário carregado e o tokenizador em uso
async fn dictionary_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dictionary = &state.tagger.dictionary;
    Json(DictionaryInfo {
        nodes: dictionary.node_count(),
        terms: dictionary.leaf_count(),
        tokenizer: state.tagger.tokenizer.clone(),
    })
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Recebe texto (puro ou `{"text": ...}`), executa o pipeline e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let text = match serde_json::from_str::<AnalyzeRequest>(&text) {
                    Ok(req) => req.text,
                    Err(_) => text.to_string(),
                };

                if text.trim().is_empty() {
                    let event = PipelineEvent::Error {
                        message: "Texto vazio".to_string(),
                    };
                    if send_event(&mut socket, &event).await.is_err() {
                        return;
                    }
                    continue;
                }

                info!("Analisando via WebSocket: {} bytes", text.len());

                // O pipeline é síncrono: roda fora do runtime
                let (tx, rx) = std::sync::mpsc::channel::<PipelineEvent>();
                let worker = Arc::clone(&state);
                let handle = tokio::task::spawn_blocking(move || {
                    worker.tagger.analyze_streaming(&text, tx);
                });
                if let Err(err) = handle.await {
                    warn!("Falha na análise: {}", err);
                    continue;
                }

                let events: Vec<PipelineEvent> = rx.try_iter().collect();
                for event in &events {
                    if send_event(&mut socket, event).await.is_err() {
                        return; // cliente desconectou
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

async fn send_event(socket: &mut WebSocket, event: &PipelineEvent) -> Result<(), axum::Error> {
    match serde_json::to_string(event) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(err) => {
            warn!("Evento não serializável: {}", err);
            Ok(())
        }
    }
}
