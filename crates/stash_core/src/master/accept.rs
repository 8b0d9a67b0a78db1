use std::{net::SocketAddr, sync::Arc};

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, error, info, instrument};

use crate::{worker::serve_connection, ProxyState};

pub async fn bind_listener(listen_addr: &str) -> anyhow::Result<TcpListener> {
    info!(
        target: "stash::master",
        listen = %listen_addr,
        "Binding listener"
    );

    match TcpListener::bind(listen_addr).await {
        Ok(listener) => {
            info!(
                target: "stash::master",
                listen = %listen_addr,
                "Server running at http://{}/",
                listen_addr
            );
            Ok(listener)
        }
        Err(e) => {
            error!(
                target: "stash::master",
                listen = %listen_addr,
                error = ?e,
                "Failed to bind listener"
            );
            Err(e.into())
        }
    }
}

struct AcceptedConn {
    stream: TcpStream,
    addr: SocketAddr,
    permit: OwnedSemaphorePermit,
}

/// Accepts one connection and reserves a slot for it.
///
/// Returns `Ok(None)` when `accept()` itself failed (e.g. fd exhaustion);
/// that failure is logged and the loop keeps going.
async fn accept_with_permit(
    listener: &TcpListener,
    listen_addr: &str,
    semaphore: &Arc<Semaphore>,
) -> anyhow::Result<Option<AcceptedConn>> {
    let permit = semaphore.clone().acquire_owned().await?;

    let (stream, addr) = match listener.accept().await {
        Ok(pair) => pair,
        Err(e) => {
            error!(
                target: "stash::master",
                listen = %listen_addr,
                error = ?e,
                "Failed to accept connection"
            );
            return Ok(None);
        }
    };

    debug!(
        target: "stash::master",
        listen = %listen_addr,
        client_addr = %addr,
        available_permits = semaphore.available_permits(),
        "Connection accepted"
    );

    Ok(Some(AcceptedConn {
        stream,
        addr,
        permit,
    }))
}

/// One task per connection; the loop itself never awaits a request.
#[instrument(
    skip(listener, semaphore, state),
    fields(listen = %listen_addr)
)]
pub(crate) async fn accept_loop(
    listener: TcpListener,
    listen_addr: String,
    semaphore: Arc<Semaphore>,
    state: Arc<ProxyState>,
) -> anyhow::Result<()> {
    info!(
        target: "stash::master",
        listen = %listen_addr,
        "accept_loop started for listening socket"
    );

    loop {
        let Some(AcceptedConn { stream, addr, permit }) =
            accept_with_permit(&listener, &listen_addr, &semaphore).await?
        else {
            continue;
        };

        let state = state.clone();

        tokio::spawn(async move {
            let _permit = permit;

            if let Err(e) = serve_connection(stream, addr, state).await {
                error!(
                    target: "stash::worker",
                    client_addr = %addr,
                    error = ?e,
                    "Error while handling connection"
                );
            }

            debug!(
                target: "stash::master",
                client_addr = %addr,
                "Permit released after connection closed"
            );
        });
    }
}
