use crate::generator::profile::{build_frames_from_config, GeneratorConfig};
use crate::gui_bridge::messages::display_text;
use crate::gui_bridge::model::{RunSummary, SessionModel};
use crate::gui_bridge::throttle::FeedbackThrottle;
use crate::workflow::cue::ConsoleCue;
use crate::workflow::runner::{Runner, WorkflowResult};
use anyhow::Result;
use log::{error, info};
use serde_json::json;
use squatcore::{FrameUpdate, PoseFrame, SquatSession};
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, PoisonError, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

pub fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

struct LiveSession {
    session: SquatSession<ConsoleCue>,
    throttle: FeedbackThrottle,
}

/// Bridge that hosts the HTTP endpoint and feeds incoming frames to a live session.
#[derive(Clone)]
pub struct GuiBridge {
    runner: Arc<Runner>,
    live: Arc<Mutex<LiveSession>>,
    state: Arc<RwLock<SessionModel>>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Result<Self> {
        let live = LiveSession {
            session: runner.start_session()?,
            throttle: FeedbackThrottle::default(),
        };
        Ok(Self {
            runner,
            live: Arc::new(Mutex::new(live)),
            state: Arc::new(RwLock::new(SessionModel::default())),
        })
    }

    /// Runs one camera frame through the live session and refreshes the model.
    /// Rejected frames leave the model untouched.
    pub fn ingest_frame(&self, frame: &PoseFrame) -> FrameUpdate {
        let mut live = self.live.lock().unwrap_or_else(PoisonError::into_inner);
        let update = live.session.process_frame(frame);
        if !update.accepted {
            return update;
        }
        let toast = if live.throttle.admit(update.feedback, frame.timestamp) {
            display_text(update.feedback).map(str::to_string)
        } else {
            None
        };
        let frames_processed = live.session.stats().frames_seen;
        drop(live);

        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        guard.rep_count = update.rep_count;
        guard.state = update.state;
        guard.feedback = update.feedback;
        guard.toast = toast;
        guard.frames_processed = frames_processed;
        update
    }

    /// Starts a new camera session; the last synthetic run summary is kept.
    pub fn reset(&self) {
        {
            let mut live = self.live.lock().unwrap_or_else(PoisonError::into_inner);
            live.session.reset();
            live.throttle.reset();
        }
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let last_run = guard.last_run.take();
        *guard = SessionModel {
            last_run,
            ..Default::default()
        };
    }

    /// Generates a synthetic workout and runs it in an isolated session.
    pub fn run_generated(&self, config: &GeneratorConfig) -> Result<WorkflowResult> {
        let frames = build_frames_from_config(config)?;
        let result = self.runner.execute(&frames)?;
        if let Some(name) = config.scenario.as_ref() {
            info!("[GUI] Scenario {} -> reps {}", name, result.rep_count);
        }
        self.publish(&result, config.scenario.clone());
        Ok(result)
    }

    pub fn publish(&self, result: &WorkflowResult, scenario: Option<String>) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        guard.last_run = Some(RunSummary {
            scenario,
            rep_count: result.rep_count,
            frames: result.stats.frames_seen,
        });
        info!(
            "[GUI] reps: {}, frames: {}",
            result.rep_count, result.stats.frames_seen
        );
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    pub fn snapshot(&self) -> SessionModel {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs a posted generator config and reports the outcome as JSON.
    fn generated_reply(&self, config: &GeneratorConfig) -> reply::WithStatus<reply::Json> {
        match self.run_generated(config) {
            Ok(result) => reply::with_status(
                reply::json(&json!({
                    "status": "ok",
                    "reps": result.rep_count,
                    "description": config.description.clone().unwrap_or_default()
                })),
                StatusCode::OK,
            ),
            Err(err) => {
                error!("ingest-config error: {:#}", err);
                reply::with_status(
                    reply::json(&json!({
                        "status": "error",
                        "message": format!("{:#}", err)
                    })),
                    StatusCode::BAD_REQUEST,
                )
            }
        }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone + Send + Sync + 'static {
        let bridge = self.clone();
        let bridge_filter = warp::any().map(move || bridge.clone());

        let status_route = warp::path!("status")
            .and(warp::get())
            .and(bridge_filter.clone())
            .map(|bridge: GuiBridge| reply::json(&bridge.snapshot()));

        let frame_route = warp::path!("frame")
            .and(warp::post())
            .and(warp::body::json())
            .and(bridge_filter.clone())
            .map(|frame: PoseFrame, bridge: GuiBridge| reply::json(&bridge.ingest_frame(&frame)));

        let reset_route = warp::path!("reset")
            .and(warp::post())
            .and(bridge_filter.clone())
            .map(|bridge: GuiBridge| {
                bridge.reset();
                reply::json(&json!({"status": "ok"}))
            });

        let generator_route = warp::path!("ingest-config")
            .and(warp::post())
            .and(warp::body::json())
            .and(bridge_filter)
            .map(|config: GeneratorConfig, bridge: GuiBridge| bridge.generated_reply(&config));

        status_route
            .or(frame_route)
            .or(reset_route)
            .or(generator_route)
    }

    /// Serves the routes on a background thread with its own runtime.
    pub fn serve(&self, addr: SocketAddr) -> thread::JoinHandle<()> {
        let routes = self.routes();
        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                match warp::serve(routes).try_bind_ephemeral(addr) {
                    Ok((bound, server)) => {
                        info!("bridge listening on {}", bound);
                        server.await;
                    }
                    Err(err) => error!("bridge could not bind {}: {}", addr, err),
                }
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::build_frames;
    use crate::workflow::config::WorkflowConfig;
    use squatcore::{FeedbackMessage, RepState};

    fn bridge() -> GuiBridge {
        GuiBridge::new(Arc::new(Runner::new(WorkflowConfig::default()))).unwrap()
    }

    #[test]
    fn gui_bridge_tracks_live_reps() {
        let gui = bridge();
        for frame in build_frames(2, 5).unwrap() {
            gui.ingest_frame(&frame);
        }
        let model = gui.snapshot();
        assert_eq!(model.rep_count, 2);
        assert_eq!(model.state, RepState::Standing);
        assert!(model.frames_processed > 0);
    }

    #[test]
    fn repeated_feedback_is_toasted_once_per_interval() {
        let gui = bridge();
        let empty = |t: f64| PoseFrame::new(t, Vec::new());
        gui.ingest_frame(&empty(0.0));
        assert!(gui.snapshot().toast.is_some());
        gui.ingest_frame(&empty(0.1));
        assert!(gui.snapshot().toast.is_none());
        assert_eq!(
            gui.snapshot().feedback,
            FeedbackMessage::InsufficientVisibility
        );
        gui.ingest_frame(&empty(1.5));
        assert!(gui.snapshot().toast.is_some());
    }

    #[test]
    fn stale_frame_keeps_last_message() {
        let gui = bridge();
        gui.ingest_frame(&PoseFrame::new(1.0, Vec::new()));
        let update = gui.ingest_frame(&PoseFrame::new(0.5, Vec::new()));
        assert!(!update.accepted);
        let model = gui.snapshot();
        assert_eq!(model.feedback, FeedbackMessage::InsufficientVisibility);
        assert!(model.toast.is_some());
        assert_eq!(model.frames_processed, 1);
    }

    #[test]
    fn reset_starts_a_new_session() {
        let gui = bridge();
        for frame in build_frames(1, 2).unwrap() {
            gui.ingest_frame(&frame);
        }
        gui.reset();
        let model = gui.snapshot();
        assert_eq!(model.rep_count, 0);
        assert_eq!(model.frames_processed, 0);
        // Timestamps may restart after a reset.
        assert!(gui.ingest_frame(&PoseFrame::new(0.0, Vec::new())).accepted);
    }

    #[test]
    fn generated_run_is_summarized() {
        let gui = bridge();
        let config = GeneratorConfig {
            reps: 2,
            scenario: Some("warmup".into()),
            ..Default::default()
        };
        let result = gui.run_generated(&config).unwrap();
        let summary = gui.snapshot().last_run.unwrap();
        assert_eq!(summary.rep_count, result.rep_count);
        assert_eq!(summary.scenario.as_deref(), Some("warmup"));
        // The live session is untouched by synthetic runs.
        assert_eq!(gui.snapshot().rep_count, 0);
    }

    #[tokio::test]
    async fn http_routes_process_frames() {
        let gui = bridge();
        let routes = gui.routes();

        let frame = PoseFrame::new(0.0, Vec::new());
        let response = warp::test::request()
            .method("POST")
            .path("/frame")
            .json(&frame)
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let update: FrameUpdate = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(update.feedback, FeedbackMessage::InsufficientVisibility);

        let response = warp::test::request()
            .method("GET")
            .path("/status")
            .reply(&routes)
            .await;
        let model: SessionModel = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(model.frames_processed, 1);
    }

    #[tokio::test]
    async fn bad_generator_config_is_rejected() {
        let gui = bridge();
        let response = warp::test::request()
            .method("POST")
            .path("/ingest-config")
            .json(&json!({"fps": 0.0}))
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_generator_config_is_rejected() {
        let gui = bridge();
        let response = warp::test::request()
            .method("POST")
            .path("/ingest-config")
            .json(&json!({"reps": 1, "frames_per_rep": 1_000_000_000_000_000u64}))
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(gui.snapshot().last_run.is_none());
    }
}
