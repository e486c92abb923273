use clap::Parser;
use tfgchat_chat::{ChatConfig, SessionId};

/// CLI arguments for tfgchat
#[derive(Parser, Debug)]
#[command(name = "tfgchat")]
#[command(about = "Terminal front end for the tfgchat chat endpoint")]
#[command(version)]
pub struct Cli {
    /// Chat endpoint receiving {question, session_id} posts [env: TFGCHAT_ENDPOINT]
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Reuse an existing session id instead of generating one
    #[arg(long, value_name = "ID")]
    pub session_id: Option<String>,

    /// Ask a single question, print the reply and exit
    #[arg(long, short, value_name = "TEXT")]
    pub question: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The REPL awaits every reply before reading the next line, so the
    /// submit policy stays at its default here.
    pub fn chat_config(&self) -> ChatConfig {
        let mut config = ChatConfig::from_env();
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.trim());
        }
        config
    }

    pub fn session_id(&self) -> SessionId {
        match &self.session_id {
            Some(id) => SessionId::from(id.as_str()),
            None => SessionId::generate(),
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
