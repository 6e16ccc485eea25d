//! One client connection
//!
//! A connection starts in control mode, where each line is a `ControlRequest`.
//! A `play` request hands the same line stream to a game session until the game
//! is over, then the connection returns to control mode.

use crate::core::GuessResult;
use crate::session::{
    ControlRequest, ErrorResponse, GuessRequest, SessionHandler, SessionOutcome, StatsResponse,
};
use futures::{SinkExt, StreamExt, future};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::{
    AnyDelimiterCodec, AnyDelimiterCodecError, FramedRead, FramedWrite, LinesCodec, LinesCodecError,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

type Frames<R> = FramedRead<R, AnyDelimiterCodec>;
type Replies<W> = FramedWrite<W, LinesCodec>;

/// Error type for connection I/O
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("read error: {0}")]
    Read(#[from] AnyDelimiterCodecError),
    #[error("write error: {0}")]
    Write(#[from] LinesCodecError),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Handle a single client connection until it closes
pub async fn handle_client(stream: TcpStream, handler: SessionHandler) {
    let peer = stream
        .peer_addr()
        .map_or_else(|_| "unknown".to_string(), |addr| addr.to_string());

    info!(%peer, "client connected");

    let (reader, writer) = stream.into_split();
    if let Err(e) = serve_connection(reader, writer, &handler, &peer).await {
        debug!(%peer, error = %e, "connection error");
    }

    info!(%peer, "client disconnected");
}

/// Serve control requests from `reader` until end of input
///
/// Input is split on newlines without assuming UTF-8, so a garbled line is
/// answered like any other malformed message instead of ending the connection.
///
/// # Errors
/// Returns `ConnectionError` when reading or writing the connection fails.
pub async fn serve_connection<R, W>(
    reader: R,
    writer: W,
    handler: &SessionHandler,
    peer: &str,
) -> Result<(), ConnectionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut frames = FramedRead::new(reader, AnyDelimiterCodec::new(b"\n".to_vec(), b"\n".to_vec()));
    let mut replies = FramedWrite::new(writer, LinesCodec::new());

    while let Some(frame) = frames.next().await {
        let frame = frame?;
        let line = frame.trim_ascii();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_slice::<ControlRequest>(line) {
            Ok(ControlRequest::Play) => {
                let session_id = Uuid::new_v4();
                debug!(%peer, %session_id, "play requested");

                let outcome = play_session(handler, session_id, &mut frames, &mut replies).await;
                debug!(%peer, %session_id, ?outcome, "session finished");

                if matches!(outcome, SessionOutcome::Abandoned { .. }) {
                    break;
                }
            }
            Ok(ControlRequest::GetStats) => {
                let stats = Arc::clone(handler.stats());
                let snapshot = tokio::task::spawn_blocking(move || stats.current_stats()).await?;
                send_json(&mut replies, &StatsResponse::from(&snapshot)).await?;
            }
            Err(e) => {
                warn!(%peer, error = %e, "invalid request");
                send_json(&mut replies, &ErrorResponse::new(format!("invalid request: {e}"))).await?;
            }
        }
    }

    Ok(())
}

/// Hand the connection to one game
///
/// A read error ends the guess stream after it is logged; the framed reader
/// yields `None` right after an error.
async fn play_session<R, W>(
    handler: &SessionHandler,
    session_id: Uuid,
    frames: &mut Frames<R>,
    replies: &mut Replies<W>,
) -> SessionOutcome
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let guesses = frames.filter_map(move |frame| {
        future::ready(match frame {
            Ok(line) => Some(GuessRequest::decode(&line).unwrap_or_else(|e| {
                warn!(%session_id, stage = "validate", error = %e, "undecodable guess, treating as empty");
                GuessRequest::default()
            })),
            Err(e) => {
                debug!(%session_id, stage = "await", error = %e, "read failed");
                None
            }
        })
    });

    let results = replies.with(|result: GuessResult| {
        future::ready(serde_json::to_string(&result).map_err(ConnectionError::from))
    });

    futures::pin_mut!(guesses);
    futures::pin_mut!(results);

    handler.play(session_id, guesses, results).await
}

async fn send_json<W, T>(replies: &mut Replies<W>, value: &T) -> Result<(), ConnectionError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    replies.send(serde_json::to_string(value)?).await?;
    Ok(())
}
