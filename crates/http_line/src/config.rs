use std::net::{Ipv4Addr, SocketAddr};

/// How lines are pulled out of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConfig {
    /// Upper bound of bytes requested by a single read
    pub read_chunk_size: usize,
    /// Longest line (terminator excluded) we agree to buffer, `None` buffers without bound
    pub max_line_len: Option<usize>,
    /// Lines a producer task may queue before waiting on the consumer
    pub channel_capacity: usize,
}

impl LineConfig {
    pub const DEFAULT_READ_CHUNK_SIZE: usize = 8192;
    pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;
    pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        // A zero sized read would look exactly like EOF
        self.read_chunk_size = size.max(1);
        self
    }

    pub fn with_max_line_len(mut self, limit: Option<usize>) -> Self {
        self.max_line_len = limit;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        // tokio panics on a zero capacity channel
        self.channel_capacity = capacity.max(1);
        self
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: Self::DEFAULT_READ_CHUNK_SIZE,
            max_line_len: Some(Self::DEFAULT_MAX_LINE_LEN),
            channel_capacity: Self::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub backlog: u32,
    pub line: LineConfig,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 42069;
    pub const DEFAULT_BACKLOG: u32 = 1024;

    pub fn new<A: Into<SocketAddr>>(addr: A) -> Self {
        Self {
            addr: addr.into(),
            ..Self::default()
        }
    }

    pub fn with_backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
        self
    }

    pub fn with_line(mut self, line: LineConfig) -> Self {
        self.line = line;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, Self::DEFAULT_PORT)),
            backlog: Self::DEFAULT_BACKLOG,
            line: LineConfig::default(),
        }
    }
}
