//! `HypermazeServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → coordinator. Each
//! accepted connection gets its own task running
//! [`handle_connection`](crate::handler::handle_connection).

use std::sync::Arc;

use hypermaze_coordinator::{Coordinator, CoordinatorConfig};
use hypermaze_maze::MazeEngine;
use hypermaze_protocol::{Codec, JsonCodec};
use hypermaze_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::{HypermazeError, ServerConfig};

/// State shared by every connection task.
///
/// One mutex guards the whole coordinator, so each client event is applied
/// to completion before the next one from any connection starts.
pub(crate) struct ServerState<M: MazeEngine, C: Codec> {
    pub(crate) coordinator: Mutex<Coordinator<M>>,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a Hypermaze server.
///
/// # Example
///
/// ```rust,no_run
/// use hypermaze::prelude::*;
///
/// # async fn start() -> Result<(), HypermazeError> {
/// let server = HypermazeServer::builder()
///     .bind("127.0.0.1:3000")
///     .build(CarvedMazeEngine::new())
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct HypermazeServerBuilder {
    config: ServerConfig,
}

impl HypermazeServerBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Replaces every setting at once, e.g. with [`ServerConfig::from_env`].
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to listen on.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets maze size and session capacity.
    pub fn coordinator_config(mut self, config: CoordinatorConfig) -> Self {
        self.config.coordinator = config;
        self
    }

    /// Binds the listener and prepares the server around `engine`.
    ///
    /// Uses [`JsonCodec`] and [`WebSocketTransport`].
    pub async fn build<M: MazeEngine>(
        self,
        engine: M,
    ) -> Result<HypermazeServer<M, JsonCodec>, HypermazeError> {
        let transport = WebSocketTransport::bind(&self.config.bind_addr).await?;

        let state = Arc::new(ServerState {
            coordinator: Mutex::new(Coordinator::new(engine, self.config.coordinator)),
            codec: JsonCodec,
        });

        Ok(HypermazeServer { transport, state })
    }
}

impl Default for HypermazeServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Hypermaze server. Call [`run`](Self::run) to start serving.
pub struct HypermazeServer<M: MazeEngine, C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<M, C>>,
}

impl HypermazeServer<hypermaze_maze::CarvedMazeEngine, JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> HypermazeServerBuilder {
        HypermazeServerBuilder::new()
    }
}

impl<M, C> HypermazeServer<M, C>
where
    M: MazeEngine,
    C: Codec,
{
    /// Returns the address the server is listening on.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop until the process is terminated.
    pub async fn run(mut self) -> Result<(), HypermazeError> {
        tracing::info!("Hypermaze server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
