use anyhow::Result;
use clap::Parser;
use tfgchat_chat::{ChatController, ChatService, ChatView, HttpTransport};

mod cli;
mod repl;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let config = cli.chat_config();
    let service = ChatService::with_session_id(&config, HttpTransport::new(), cli.session_id());
    let controller = ChatController::from_parts(ChatView::new(&config), service);

    match cli.question {
        Some(question) => repl::run_single_question(controller, question).await,
        None => repl::run_repl_mode(controller).await,
    }
}
