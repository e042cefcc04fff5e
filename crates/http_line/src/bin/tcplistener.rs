use std::{net::SocketAddr, process::ExitCode};

use carbon_http_line::{
    HttpServer, ServerConfig,
    service::{PrintLines, RequestLineProbe},
};

const USAGE: &str = "usage: tcplistener [--request-line] [ADDR]";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut request_line = false;
    let mut config = ServerConfig::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--request-line" => request_line = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            addr => match addr.parse::<SocketAddr>() {
                Ok(addr) => config.addr = addr,
                Err(err) => {
                    eprintln!("invalid address {addr:?}: {err}\n{USAGE}");
                    return ExitCode::FAILURE;
                }
            },
        }
    }

    let result = if request_line {
        HttpServer::new(config, RequestLineProbe).serve().await
    } else {
        HttpServer::new(config, PrintLines::stdout()).serve().await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("server failed: {err}");
            ExitCode::FAILURE
        }
    }
}
