use std::net::SocketAddr;

use crate::http::parser::Lines;

mod print;
mod probe;
pub use print::{PrintError, PrintLines};
pub use probe::RequestLineProbe;

/// An accepted connection, its stream is already being split into lines
pub struct Connection {
    pub peer: SocketAddr,
    pub lines: Lines,
}

pub trait Service<Request>: Send + Sync + 'static {
    type Response;
    type Error;

    fn call(
        &self,
        req: Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}
