use crate::{
    http::{
        parser::{RequestError, strip_cr},
        request::{Request, RequestLine},
    },
    service::{Connection, Service},
};

/// Validates the first line of every connection as a request line.
///
/// The rest of the stream is not read, the connection is released as soon as the request line
/// is accepted or rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestLineProbe;

impl Service<Connection> for RequestLineProbe {
    type Response = Request;
    type Error = RequestError;

    fn call(
        &self,
        mut conn: Connection,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send {
        async move {
            let line = conn
                .lines
                .recv()
                .await
                .ok_or(RequestError::UnexpectedEof)??;
            let line = RequestLine::parse(strip_cr(&line))?;
            log::info!("{}: {line}", conn.peer);
            Ok(Request::new(line).with_remote(conn.peer))
        }
    }
}
