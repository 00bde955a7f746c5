use crate::error::CliError;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use toolgate_agent::{AgentConfig, Orchestrator};
use tracing::{error, info};

const PROMPT: &str = "Query: ";

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Exit,
    Empty,
    Query(&'a str),
}

fn classify_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Input::Empty
    } else if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        Input::Exit
    } else {
        Input::Query(trimmed)
    }
}

/// Interactive prompt, or a single turn when `query` is given.
pub async fn run_chat(query: Option<String>) -> Result<(), CliError> {
    let config = AgentConfig::from_env()?;
    let orchestrator = Orchestrator::from_config(&config)?;
    info!(gateway = %config.gateway_url, model = %config.model, "Chat session ready");

    if let Some(query) = query {
        let outcome = orchestrator.run_turn(&query).await?;
        println!("Assistant: {}", outcome.text);
        return Ok(());
    }

    println!("toolgate chat. Type 'exit' or 'quit' to leave.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{PROMPT}");
        std::io::stdout().flush()?;

        // EOF ends the session like `exit`.
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match classify_input(&line) {
            Input::Exit => break,
            Input::Empty => continue,
            Input::Query(query) => match orchestrator.run_turn(query).await {
                Ok(outcome) => println!("Assistant: {}", outcome.text),
                Err(e) => {
                    error!(error = %e, "Turn failed");
                    println!("Error: {e}");
                }
            },
        }
    }

    Ok(())
}
