use std::{
    net::{Ipv4Addr, SocketAddr},
    process::ExitCode,
};

use carbon_http_line::{ServerConfig, diag::UdpLineSender};
use tokio::io::BufReader;

const USAGE: &str = "usage: udpsender [ADDR]";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let target = match std::env::args().nth(1).as_deref() {
        None => SocketAddr::from((Ipv4Addr::LOCALHOST, ServerConfig::DEFAULT_PORT)),
        Some("-h" | "--help") => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Some(addr) => match addr.parse() {
            Ok(addr) => addr,
            Err(err) => {
                eprintln!("invalid address {addr:?}: {err}\n{USAGE}");
                return ExitCode::FAILURE;
            }
        },
    };

    let sender = match UdpLineSender::connect(target).await {
        Ok(sender) => sender,
        Err(err) => {
            log::error!("failed to reach {target}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = tokio::io::stdout();
    match sender
        .send_lines(BufReader::new(tokio::io::stdin()), &mut stdout)
        .await
    {
        Ok(sent) => {
            log::info!("sent {sent} datagram(s) to {target}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("failed to send to {target}: {err}");
            ExitCode::FAILURE
        }
    }
}
