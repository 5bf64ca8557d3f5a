//! Axum web server with WebSocket streaming of playback frames.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use algotrace_core::{Snapshot, Step, Trace};
use algotrace_player::{Frame, PlaybackDriver, PlaybackStatus};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::error::ApiError;
use crate::request::TraceRequest;

/// Shared application state.
pub struct AppState {
    driver: PlaybackDriver<Snapshot>,
    algorithm: RwLock<String>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
    static_dir: Option<PathBuf>,
}

impl VisServer {
    /// Create a server replaying `trace`, labelled `algorithm`.
    pub fn new(trace: Trace<Snapshot>, algorithm: impl Into<String>, tick: Duration) -> Self {
        Self {
            state: Arc::new(AppState {
                driver: PlaybackDriver::new(trace, tick),
                algorithm: RwLock::new(algorithm.into()),
            }),
            static_dir: None,
        }
    }

    /// Serve frontend assets from `dir` for every path the API does not claim.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// The driver behind the API.
    pub fn driver(&self) -> &PlaybackDriver<Snapshot> {
        &self.state.driver
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/playback", get(playback_status_handler))
            .route("/api/step", get(step_handler))
            .route("/api/playback/play", post(play_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/resume", post(resume_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/seek", post(seek_handler))
            .route("/api/playback/speed", post(speed_handler))
            .route("/api/playback/step", post(manual_step_handler))
            .route("/api/trace", post(trace_handler))
            .route("/ws", get(ws_handler));

        let router = match &self.static_dir {
            Some(dir) => router.fallback_service(ServeDir::new(dir)),
            None => router,
        };

        router
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Bind `addr` and serve until the process is stopped.
    pub async fn serve(self, addr: SocketAddr) -> std::io::Result<()> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "visualization server listening");
        axum::serve(listener, router).await
    }
}

#[derive(Serialize)]
struct ServerStatus {
    status: &'static str,
    algorithm: String,
    steps: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<ServerStatus> {
    let steps = state.driver.frame().trace().len();
    Json(ServerStatus {
        status: "ok",
        algorithm: state.algorithm.read().await.clone(),
        steps,
    })
}

async fn playback_status_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.driver.status().await)
}

/// The active step together with the playback status it was taken at.
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub status: PlaybackStatus,
    pub step: Option<Step<Snapshot>>,
}

impl From<&Frame<Snapshot>> for FrameView {
    fn from(frame: &Frame<Snapshot>) -> Self {
        Self {
            status: frame.status.clone(),
            step: frame.step().cloned(),
        }
    }
}

async fn step_handler(State(state): State<Arc<AppState>>) -> Json<FrameView> {
    Json(FrameView::from(&state.driver.frame()))
}

async fn play_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    state.driver.start().await;
    Json(state.driver.status().await)
}

async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    state.driver.pause().await;
    Json(state.driver.status().await)
}

async fn resume_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    state.driver.resume().await;
    Json(state.driver.status().await)
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    state.driver.reset().await;
    Json(state.driver.status().await)
}

#[derive(Deserialize)]
struct SeekRequest {
    index: usize,
}

async fn seek_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeekRequest>,
) -> Json<PlaybackStatus> {
    state.driver.seek(req.index).await;
    Json(state.driver.status().await)
}

#[derive(Deserialize)]
struct SpeedRequest {
    delay_ms: u64,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeedRequest>,
) -> Result<Json<PlaybackStatus>, ApiError> {
    if req.delay_ms == 0 {
        return Err(ApiError::BadRequest("delay_ms must be greater than zero".into()));
    }
    state.driver.set_speed(Duration::from_millis(req.delay_ms)).await;
    Ok(Json(state.driver.status().await))
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Direction {
    Forward,
    Backward,
}

#[derive(Deserialize)]
struct StepRequest {
    direction: Direction,
}

async fn manual_step_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StepRequest>,
) -> Json<PlaybackStatus> {
    step(&state, req.direction).await;
    Json(state.driver.status().await)
}

async fn step(state: &AppState, direction: Direction) {
    match direction {
        Direction::Forward => state.driver.step_forward().await,
        Direction::Backward => state.driver.step_backward().await,
    }
}

async fn trace_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TraceRequest>,
) -> Result<Json<PlaybackStatus>, ApiError> {
    load(&state, &req).await?;
    Ok(Json(state.driver.status().await))
}

/// Generate first and only then swap the trace in, so a rejected request
/// leaves the player as it was.
async fn load(state: &AppState, req: &TraceRequest) -> Result<(), ApiError> {
    let trace = req.generate()?;
    *state.algorithm.write().await = req.name().to_string();
    state.driver.load(trace).await;
    tracing::info!(algorithm = req.name(), "new trace generated");
    Ok(())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetFrame,
    GetStatus,
    Play,
    Pause,
    Resume,
    Reset,
    Seek { index: usize },
    Step { direction: Direction },
    Trace { request: TraceRequest },
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    Frame(FrameView),
    Status(PlaybackStatus),
    Error { message: String },
}

async fn send(socket: &mut WebSocket, response: &WsResponse) -> bool {
    match serde_json::to_string(response) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode websocket message");
            true
        }
    }
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut frames = state.driver.subscribe();
    let initial = WsResponse::Frame(FrameView::from(&*frames.borrow_and_update()));
    if !send(&mut socket, &initial).await {
        return;
    }

    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = WsResponse::Frame(FrameView::from(&*frames.borrow_and_update()));
                if !send(&mut socket, &frame).await {
                    break;
                }
            }
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        let response = match serde_json::from_str::<WsCommand>(text.as_str()) {
                            Ok(cmd) => handle_ws_command(&state, cmd).await,
                            Err(err) => WsResponse::Error { message: err.to_string() },
                        };
                        if !send(&mut socket, &response).await {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    }
    tracing::debug!("websocket closed");
}

async fn handle_ws_command(state: &AppState, cmd: WsCommand) -> WsResponse {
    match cmd {
        WsCommand::GetFrame => return WsResponse::Frame(FrameView::from(&state.driver.frame())),
        WsCommand::GetStatus => {}
        WsCommand::Play => state.driver.start().await,
        WsCommand::Pause => state.driver.pause().await,
        WsCommand::Resume => state.driver.resume().await,
        WsCommand::Reset => state.driver.reset().await,
        WsCommand::Seek { index } => state.driver.seek(index).await,
        WsCommand::Step { direction } => step(state, direction).await,
        WsCommand::Trace { request } => {
            if let Err(err) = load(state, &request).await {
                return WsResponse::Error {
                    message: err.to_string(),
                };
            }
        }
    }
    WsResponse::Status(state.driver.status().await)
}
