//! Terminal display surface.
//!
//! Prints the current quote whenever the controller publishes a new state and turns
//! input lines into refresh requests. The loop ends on `q`, end of input or shutdown
//! (Ctrl+C for the terminal), and always stops the controller's timer on the way out.
//!
//! Stdin is read on a dedicated thread and forwarded over a channel: a blocking read
//! cannot be cancelled, and parking it on Tokio's blocking pool would keep the runtime
//! from shutting down until the user presses Enter.
use std::future::Future;
use std::io::{self, BufRead, Write};
use std::thread;

use chrono::Local;
use log::{debug, error, info, warn};
use tokio::sync::mpsc;

use crate::controller::RefreshController;
use crate::model::FetchState;

/// Lines buffered between the stdin thread and the event loop.
const INPUT_BUFFER: usize = 16;

/// Placeholder shown until the first quote arrives.
pub const PLACEHOLDER: &str = "Fetching quote...";

/// A line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Empty line or `r`: fetch a new quote now.
    Refresh,
    /// `q`: leave.
    Quit,
    /// Anything else.
    Unknown(String),
}

impl UserCommand {
    /// Interpret one input line. Surrounding whitespace and case are ignored.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "r" | "refresh" => UserCommand::Refresh,
            "q" | "quit" | "exit" => UserCommand::Quit,
            _ => UserCommand::Unknown(trimmed.to_string()),
        }
    }
}

/// Text to show for `state`.
pub fn render(state: &FetchState) -> String {
    match (&state.current_quote, state.last_updated) {
        (Some(quote), Some(updated)) => format!(
            "[{}] {}",
            updated.with_timezone(&Local).format("%H:%M:%S"),
            quote
        ),
        (Some(quote), None) => quote.to_string(),
        (None, _) => PLACEHOLDER.to_string(),
    }
}

/// Drive `controller` from the terminal until the user leaves.
pub async fn run(controller: RefreshController) -> io::Result<()> {
    let lines = spawn_stdin_reader();
    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl+C received. Shutting down client..."),
            Err(e) => {
                error!("Unable to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        }
    };
    drive(controller, lines, shutdown, io::stdout()).await
}

/// Forward stdin lines into a channel from a plain OS thread.
///
/// The channel closes on end of input, on a read error, or once the receiver is gone.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(INPUT_BUFFER);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to read stdin: {e}");
                    break;
                }
            }
        }
        debug!("stdin reader stopping...");
    });
    rx
}

/// Event loop of the display: start `controller`, render state changes to `out`, act on
/// `lines` and leave on quit, closed input or `shutdown`. The timer is stopped on exit.
pub async fn drive<W, F>(
    controller: RefreshController,
    mut lines: mpsc::Receiver<String>,
    shutdown: F,
    mut out: W,
) -> io::Result<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    let mut updates = controller.subscribe();
    tokio::pin!(shutdown);

    let mut last_rendered = render(&updates.borrow_and_update());
    writeln!(out, "{last_rendered}")?;
    out.flush()?;
    controller.start();

    let result = loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let rendered = render(&updates.borrow_and_update());
                if rendered != last_rendered {
                    if let Err(e) = writeln!(out, "{rendered}").and_then(|()| out.flush()) {
                        break Err(e);
                    }
                    last_rendered = rendered;
                }
            }
            line = lines.recv() => {
                let Some(line) = line else {
                    debug!("Input closed");
                    break Ok(());
                };
                match UserCommand::parse(&line) {
                    UserCommand::Refresh if controller.state().is_loading => {
                        info!("A fetch is already in progress, ignoring refresh request");
                    }
                    UserCommand::Refresh => {
                        controller.refresh_now();
                    }
                    UserCommand::Quit => break Ok(()),
                    UserCommand::Unknown(input) => {
                        warn!("Unknown command '{input}'. Press Enter or 'r' for a new quote, 'q' to quit.");
                    }
                }
            }
            () = &mut shutdown => break Ok(()),
        }
    };

    controller.stop();
    result
}
