use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use tfgchat_server::{ChatServer, ServerConfig};

/// CLI arguments for the dev server
#[derive(Parser, Debug)]
#[command(name = "tfgchat-server")]
#[command(about = "Echo chat endpoint for developing the tfgchat widget")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "TFGCHAT_BIND")]
    bind: String,

    /// Port to listen on
    #[arg(long, short, default_value_t = 8000, env = "TFGCHAT_PORT")]
    port: u16,

    /// Directory with the built widget, served under /static
    #[arg(long, value_name = "DIR")]
    web_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let bind_addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;

    let server = ChatServer::new(ServerConfig {
        bind_addr,
        web_dir: args.web_dir,
    });
    server.start().await
}
