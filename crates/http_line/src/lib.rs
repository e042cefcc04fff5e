//! Reassembles lines out of TCP streams and validates HTTP/1.1 request lines

pub mod config;
pub mod diag;
pub mod http;
pub mod service;

use std::{fmt::Display, net::SocketAddr, sync::Arc};

pub use config::{LineConfig, ServerConfig};
use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::{
    http::parser::Lines,
    service::{Connection, Service},
};

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Accepts connections and hands each one, split into lines, to a [`Service`] on its own task
pub struct HttpServer<S>(Arc<HttpServerInternal<S>>);

impl<S> HttpServer<S>
where
    S: Service<Connection>,
    S::Error: Display,
{
    pub fn new(config: ServerConfig, service: S) -> Self {
        Self(Arc::new(HttpServerInternal::new(config, service)))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.0.config
    }

    /// Binds the configured address without accepting yet
    pub fn bind(&self) -> Result<TcpListener, HttpServerError> {
        self.0.bind()
    }

    pub async fn serve(&self) -> Result<(), HttpServerError> {
        let listener = self.bind()?;
        self.serve_on(listener).await
    }

    pub async fn serve_on(&self, listener: TcpListener) -> Result<(), HttpServerError> {
        HttpServerInternal::serve(self.0.clone(), listener).await
    }
}

pub(crate) struct HttpServerInternal<S> {
    config: ServerConfig,
    service: S,
}

impl<S> HttpServerInternal<S>
where
    S: Service<Connection>,
    S::Error: Display,
{
    pub fn new(config: ServerConfig, service: S) -> Self {
        Self { config, service }
    }

    fn bind(&self) -> Result<TcpListener, HttpServerError> {
        let addr = self.config.addr;
        let sock = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };

        sock.set_reuseaddr(true)?;
        sock.bind(addr)?;

        let listener = sock.listen(self.config.backlog)?;
        log::info!("listening on {}", listener.local_addr()?);
        Ok(listener)
    }

    pub async fn serve(sel: Arc<Self>, listener: TcpListener) -> Result<(), HttpServerError> {
        loop {
            let (stream, addr) = listener.accept().await?;
            log::debug!("accepted connection from {addr}");
            tokio::spawn(HttpServerInternal::handle_connection(
                sel.clone(),
                stream,
                addr,
            ));
        }
    }

    async fn handle_connection(sel: Arc<Self>, stream: TcpStream, addr: SocketAddr) {
        // The line producer owns the stream from here on and drops it on every exit path
        let lines = Lines::spawn(stream, &sel.config.line);
        match sel.service.call(Connection { peer: addr, lines }).await {
            Ok(_) => log::debug!("connection from {addr} done"),
            Err(err) => log::warn!("rejected connection from {addr}: {err}"),
        }
    }
}
