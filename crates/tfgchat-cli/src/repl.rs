use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tfgchat_chat::{ChatController, ChatTransport, ChatView, Sender, SubmitOutcome};

/// Run interactive REPL mode
pub async fn run_repl_mode<T: ChatTransport>(controller: ChatController<T>) -> Result<()> {
    println!("{}", "💬 tfgchat".bright_cyan().bold());
    println!(
        "{}",
        format!(
            "Endpoint: {} • session {}",
            controller.service().endpoint(),
            controller.session_id()
        )
        .bright_black()
    );
    println!(
        "{}",
        "Type 'exit' or 'quit' to leave, '/history' to replay the conversation\n".bright_black()
    );

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                let command = line.trim();

                if command == "exit" || command == "quit" {
                    println!("{}", "¡Hasta luego!".bright_cyan());
                    break;
                }

                if command == "/history" {
                    print_history(&controller.view());
                    continue;
                }

                if command == "/session" {
                    println!("{} {}", "Session:".bright_cyan(), controller.session_id());
                    continue;
                }

                if !command.is_empty() {
                    let _ = rl.add_history_entry(command);
                }

                print_outcome(controller.submit_text(line).await);
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "¡Hasta luego!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}

/// Ask one question and print the reply; fails when the endpoint does
pub async fn run_single_question<T: ChatTransport>(
    controller: ChatController<T>,
    question: String,
) -> Result<()> {
    match controller.submit_text(question).await {
        SubmitOutcome::Replied(text) => {
            println!("{}", text);
            Ok(())
        }
        SubmitOutcome::Failed(message) => anyhow::bail!(message),
        SubmitOutcome::Ignored | SubmitOutcome::Rejected => {
            anyhow::bail!("nothing to ask: the question is empty")
        }
    }
}

fn print_outcome(outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Replied(text) => {
            println!("\n{} {}\n", "Bot:".bright_blue().bold(), text);
        }
        SubmitOutcome::Failed(message) => {
            eprintln!("{} {}\n", "Error:".bright_red().bold(), message);
        }
        // Each line waits for its reply, so nothing is ever pending here
        SubmitOutcome::Rejected | SubmitOutcome::Ignored => {}
    }
}

fn print_history(view: &ChatView) {
    if view.history().is_empty() {
        println!("{}", "No messages yet".bright_black());
        return;
    }
    for message in view.history() {
        let label = match message.sender {
            Sender::User => "You:".bright_green().bold(),
            Sender::Bot => "Bot:".bright_blue().bold(),
        };
        println!("{} {}", label, message.text);
    }
    println!();
}
