//! TCP front end for game clients
//!
//! One task per connection; connections share nothing but the session handler,
//! whose only shared state is the stats store.

mod connection;

pub use connection::{ConnectionError, handle_client, serve_connection};

use crate::session::SessionHandler;
use std::future::Future;
use std::io;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Accept clients on `listener` until `shutdown` completes
///
/// # Errors
/// Returns an I/O error if the listener address cannot be read.
pub async fn serve<F>(listener: TcpListener, handler: SessionHandler, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    info!(addr = %listener.local_addr()?, "listening");

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => {
                info!("shutting down");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        handle_client(stream, handler).await;
                    });
                }
                Err(e) => error!(error = %e, "accept error"),
            }
        }
    }

    Ok(())
}
