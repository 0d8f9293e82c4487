//! Thin HTTP transport over the operation layer.
//!
//! Routing is a plain `match` over method and path; bodies are JSON with
//! camelCase field names. Domain errors map to status codes here and
//! nowhere else.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde::Serialize;
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::Error;
use crate::pumpvote::{ops, AppContext};
use crate::traits::SubmissionStore;
use crate::types::{now_ms, NewSubmission};

/// HTTP API server.
///
/// # Endpoints
/// - `GET  /health`
/// - `GET  /api/submissions`
/// - `POST /api/submissions`
/// - `POST /api/submissions/:id/vote`
/// - `GET  /api/pump-history`
/// - `GET  /api/round`
/// - `GET  /api/stats`
pub struct ApiServer {
    bind_addr: String,
    ctx: Arc<AppContext>,
}

impl ApiServer {
    pub fn new(bind_addr: String, ctx: Arc<AppContext>) -> Self {
        Self { bind_addr, ctx }
    }

    /// Bind and spawn the server task. Returns the actual bound address
    /// (useful with port 0) and the server's join handle.
    pub fn start(&self) -> Result<(SocketAddr, JoinHandle<hyper::Result<()>>)> {
        let addr: SocketAddr = self
            .bind_addr
            .parse()
            .with_context(|| format!("invalid bind address {}", self.bind_addr))?;

        let ctx = Arc::clone(&self.ctx);
        let make_svc = make_service_fn(move |_conn| {
            let ctx = Arc::clone(&ctx);
            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    handle_request(req, Arc::clone(&ctx))
                }))
            }
        });

        let server = Server::try_bind(&addr)?.serve(make_svc);
        let local_addr = server.local_addr();
        Ok((local_addr, tokio::spawn(server)))
    }
}

async fn handle_request(
    req: Request<Body>,
    ctx: Arc<AppContext>,
) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    debug!("HTTP request: {} {}", method, path);

    let response = match (&method, path.as_str()) {
        (&Method::GET, "/health") => json_response(StatusCode::OK, &json!({"status": "ok"})),

        (&Method::GET, "/api/submissions") => list_submissions(&ctx).await,
        (&Method::POST, "/api/submissions") => create_submission(req, &ctx).await,
        (&Method::GET, "/api/pump-history") => pump_history(&ctx).await,
        (&Method::GET, "/api/round") => round(&ctx).await,
        (&Method::GET, "/api/stats") => stats(&ctx).await,

        (&Method::POST, p) => match vote_submission_id(p) {
            Some(id) => cast_vote(req, &ctx, id).await,
            None => not_found(),
        },

        _ => not_found(),
    };

    Ok(response)
}

/// Extract the submission id from `/api/submissions/:id/vote`.
fn vote_submission_id(path: &str) -> Option<&str> {
    let id = path
        .strip_prefix("/api/submissions/")?
        .strip_suffix("/vote")?;
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id)
}

async fn list_submissions(ctx: &AppContext) -> Response<Body> {
    match ctx.store.list_submissions().await {
        Ok(submissions) => json_response(StatusCode::OK, &submissions),
        Err(e) => error_response(&e),
    }
}

async fn create_submission(req: Request<Body>, ctx: &AppContext) -> Response<Body> {
    let body = match hyper::body::to_bytes(req.into_body()).await {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to read request body: {}", e);
            return message_response(StatusCode::BAD_REQUEST, "Invalid submission data");
        }
    };
    let new: NewSubmission = match serde_json::from_slice(&body) {
        Ok(new) => new,
        Err(_) => return message_response(StatusCode::BAD_REQUEST, "Invalid submission data"),
    };

    match ops::create_submission_once(ctx, new).await {
        Ok(created) => json_response(StatusCode::CREATED, &created),
        Err(e) => error_response(&e),
    }
}

async fn cast_vote(req: Request<Body>, ctx: &AppContext, submission_id: &str) -> Response<Body> {
    #[derive(serde::Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    struct VoteBody {
        #[serde(default)]
        voter_address: Option<String>,
    }

    let body = match hyper::body::to_bytes(req.into_body()).await {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to read request body: {}", e);
            return message_response(StatusCode::BAD_REQUEST, "Invalid vote data");
        }
    };
    // An absent body is a valid anonymous vote.
    let vote: VoteBody = if body.is_empty() {
        VoteBody::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(vote) => vote,
            Err(_) => return message_response(StatusCode::BAD_REQUEST, "Invalid vote data"),
        }
    };

    match ops::cast_vote_once(ctx, submission_id, vote.voter_address).await {
        Ok(vote_count) => json_response(
            StatusCode::OK,
            &json!({"message": "Vote recorded successfully", "voteCount": vote_count}),
        ),
        Err(e) => error_response(&e),
    }
}

async fn pump_history(ctx: &AppContext) -> Response<Body> {
    match ctx.store.list_pump_history().await {
        Ok(history) => json_response(StatusCode::OK, &history),
        Err(e) => error_response(&e),
    }
}

async fn round(ctx: &AppContext) -> Response<Body> {
    let now = now_ms();
    let mut round = ctx.round.lock().await;
    // Tick on read: the round advances on queries as well as on the
    // background ticker.
    if let Err(e) = round.advance_if_due(now).await {
        return error_response(&e);
    }
    json_response(StatusCode::OK, &round.to_dto(now))
}

async fn stats(ctx: &AppContext) -> Response<Body> {
    match ops::stats_once(ctx).await {
        Ok(stats) => json_response(StatusCode::OK, &stats),
        Err(e) => error_response(&e),
    }
}

fn not_found() -> Response<Body> {
    json_response(
        StatusCode::NOT_FOUND,
        &json!({"error": "not_found"}),
    )
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Body> {
    let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{}".to_vec());
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap_or_default()
}

fn message_response(status: StatusCode, message: &str) -> Response<Body> {
    json_response(status, &json!({ "message": message }))
}

fn error_response(err: &Error) -> Response<Body> {
    match err {
        Error::Validation { message } => message_response(StatusCode::BAD_REQUEST, message),
        Error::DuplicateAddress { submission_id } => json_response(
            StatusCode::CONFLICT,
            &json!({
                "message": "Contract address already submitted",
                "submissionId": submission_id,
            }),
        ),
        Error::DuplicateVote => {
            message_response(StatusCode::CONFLICT, "Already voted for this submission")
        }
        Error::RateLimited {
            retry_after_seconds,
        } => json_response(
            StatusCode::TOO_MANY_REQUESTS,
            &json!({
                "message": "Rate limited: vote again later",
                "retryAfterSeconds": retry_after_seconds,
            }),
        ),
        Error::NotFound { message } => message_response(StatusCode::NOT_FOUND, message),
        Error::Internal(e) => {
            error!("Internal error: {:#}", e);
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
