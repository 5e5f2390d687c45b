//! pageflow - paginated list state pipeline
//!
//! Drives a feed from stdin commands and prints every state snapshot as a
//! JSON line on stdout. Logs go to stderr.

mod backend;
mod config;
mod runtime;
mod state_machine;

use backend::{LoggingSource, MockSource};
use config::FeedConfig;
use runtime::{FeedHandle, FeedRuntime};
use state_machine::{Event, FeedState};
use std::error::Error;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_stream::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One line of driver input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Send(Event),
    /// Print the current snapshot again
    State,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "appear" | "first_appear" => Some(Command::Send(Event::FirstAppear)),
        "bottom" | "reached_bottom" => Some(Command::Send(Event::ReachedBottom)),
        "state" => Some(Command::State),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pageflow=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = FeedConfig::from_env();
    tracing::info!(
        mock_delay_ms = %config.mock_delay.as_millis(),
        channel_capacity = config.channel_capacity,
        "Configuration loaded"
    );

    let source = LoggingSource::new(Arc::new(MockSource::new(config.mock_delay)));
    let handle = FeedRuntime::spawn(source, &config);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    drive(stdin, &mut stdout, handle).await
}

/// Feed commands from `input` into the feed and write every snapshot to
/// `output` as one JSON line.
///
/// When input ends (or on `quit`) the feed is allowed to settle first, so a
/// fetch still in flight is printed before the runtime stops.
async fn drive<R, W>(
    input: R,
    output: &mut W,
    handle: FeedHandle,
) -> Result<(), Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut updates = handle.updates();
    let mut lines = input.lines();

    loop {
        tokio::select! {
            biased;

            Some(state) = updates.next() => write_snapshot(output, &state).await?,

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(Command::Send(event)) => {
                        tracing::debug!(?event, "Sending event");
                        handle.send(event).await?;
                    }
                    Some(Command::State) => write_snapshot(output, &handle.current()).await?,
                    Some(Command::Quit) => break,
                    None => {
                        tracing::warn!(input = %line.trim(), "Unknown command (expected appear, bottom, state, quit)");
                    }
                }
            }
        }
    }

    {
        let settled = handle.settled();
        tokio::pin!(settled);
        loop {
            tokio::select! {
                biased;

                Some(state) = updates.next() => write_snapshot(output, &state).await?,

                result = &mut settled => {
                    let state = result?;
                    tracing::debug!(models = state.models.len(), "Feed settled");
                    break;
                }
            }
        }
    }

    // The stream ends once the runtime has dropped the store; anything not
    // yet printed is yielded first
    handle.shutdown();
    drop(handle);
    while let Some(state) = updates.next().await {
        write_snapshot(output, &state).await?;
    }
    Ok(())
}

async fn write_snapshot<W>(output: &mut W, state: &FeedState) -> Result<(), Box<dyn Error>>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_string(state)?;
    line.push('\n');
    output.write_all(line.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
