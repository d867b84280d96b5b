//! In-memory stand-in for the downstream user service.
//!
//! Serves the contract the gateway forwards to: `POST /user`, `GET /user`
//! and the deliberately failing `GET /error`. Useful for exercising the
//! gateway's retry and error translation by hand.

use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use tokio::sync::Mutex;

use user_gateway::User;

#[derive(Parser)]
#[command(name = "mock-downstream")]
#[command(about = "In-memory stand-in for the downstream user service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "127.0.0.1:9000")]
    bind: String,

    /// Answer this many GET /user calls with 500 before recovering.
    #[arg(long, default_value_t = 0)]
    fail_first: u32,

    /// Status code returned by GET /error.
    #[arg(long, default_value_t = 503)]
    error_status: u16,
}

struct Downstream {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
    remaining_failures: AtomicU32,
    error_status: StatusCode,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let error_status =
        StatusCode::from_u16(cli.error_status).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);

    let state = Arc::new(Downstream {
        users: Mutex::new(Vec::new()),
        next_id: AtomicI64::new(1),
        remaining_failures: AtomicU32::new(cli.fail_first),
        error_status,
    });

    let app = Router::new()
        .route("/user", get(list_users).post(create_user))
        .route("/error", get(trigger_error))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .expect("Failed to bind mock downstream");
    println!("mock-downstream listening on http://{}", cli.bind);

    axum::serve(listener, app)
        .await
        .expect("mock downstream failed");
}

async fn create_user(
    State(state): State<Arc<Downstream>>,
    Json(mut user): Json<User>,
) -> (StatusCode, Json<User>) {
    user.id = Some(state.next_id.fetch_add(1, Ordering::SeqCst));
    state.users.lock().await.push(user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn list_users(
    State(state): State<Arc<Downstream>>,
) -> Result<Json<Vec<User>>, StatusCode> {
    let failing = state
        .remaining_failures
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failing {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(state.users.lock().await.clone()))
}

async fn trigger_error(State(state): State<Arc<Downstream>>) -> StatusCode {
    state.error_status
}
