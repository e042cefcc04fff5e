//! A tiny UDP client for poking at listeners by hand

use std::{
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
};

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    net::UdpSocket,
};

/// Sends every line it reads as its own datagram
pub struct UdpLineSender {
    socket: UdpSocket,
}

impl UdpLineSender {
    pub async fn connect(target: SocketAddr) -> io::Result<Self> {
        let local = match target {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(target).await?;
        log::debug!("sending datagrams from {} to {target}", socket.local_addr()?);
        Ok(Self { socket })
    }

    /// Prompts on `prompt`, then sends the next line of `input` (terminator included) until EOF.
    /// Returns the number of datagrams sent.
    pub async fn send_lines<R, W>(&self, mut input: R, prompt: &mut W) -> io::Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();
        let mut sent = 0;
        loop {
            prompt.write_all(b">\n").await?;
            prompt.flush().await?;

            line.clear();
            if input.read_until(b'\n', &mut line).await? == 0 {
                return Ok(sent);
            }
            self.socket.send(&line).await?;
            sent += 1;
        }
    }
}
