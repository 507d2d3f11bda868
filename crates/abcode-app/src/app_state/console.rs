//! Command console on stdin.
//!
//! Lines are read on a background thread and handed to the event loop.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;

use tracing::{debug, warn};

/// Command identifier for opening the dashboard.
pub(crate) const OPEN_DASHBOARD: &str = "abcode.openDashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Sync the focused document into the dashboard, opening it if needed.
    OpenDashboard,
    /// Make `path` the focused document.
    Focus(PathBuf),
    /// Close the dashboard panel.
    Close,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
commands:
  abcode.openDashboard | open   show the dashboard with the focused file
  focus <path>                  set the focused file
  close                         close the dashboard
  help                          show this help
  quit                          exit";

/// Parse one console line. Blank lines are `Ok(None)`.
pub(crate) fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };

    let command = match head {
        OPEN_DASHBOARD | "open" => Command::OpenDashboard,
        "focus" => {
            if rest.is_empty() {
                return Err("usage: focus <path>".to_string());
            }
            Command::Focus(PathBuf::from(rest))
        }
        "close" => Command::Close,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

/// Read commands from stdin until EOF or until the receiver is dropped.
pub(crate) fn spawn_stdin_console(tx: mpsc::Sender<Command>) {
    let spawned = std::thread::Builder::new()
        .name("abcode-console".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        warn!(error = %e, "console read failed");
                        break;
                    }
                };
                match parse_command(&line) {
                    Ok(Some(cmd)) => {
                        if tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(msg) => eprintln!("{msg}"),
                }
            }
            debug!("console input closed");
        });
    if let Err(e) = spawned {
        warn!(error = %e, "failed to start command console");
    }
}
