use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::select;

use crate::analytics::TracingAnalytics;
use crate::settings::Settings;
use crate::sources::{HttpSearchService, Result, SearchService};
use crate::state::{Intent, Item, SessionOutput};

use super::runtime::spawn_session;

/// One parsed stdin command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Forward an intent unchanged.
    Intent(Intent),
    /// Tap the item at this index of the current display list.
    Tap(usize),
    /// End the session.
    Quit,
}

/// What: Parse one stdin line into a command.
///
/// Inputs:
/// - `line`: Raw line, e.g. `type robots`, `row 8 10`, `tap 0`
///
/// Output:
/// - `Ok(Command)` on success; `Err` with a human-readable message otherwise
///
/// # Errors
/// - Returns `Err` for unknown verbs and malformed numeric arguments
///
/// Details:
/// - `type` takes the rest of the line verbatim (after one separating space), so
///   `type` alone sends an empty text change
pub fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let number = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid number {s:?}: {e}"))
    };
    let cmd = match verb.trim() {
        "appear" => Command::Intent(Intent::ViewAppeared {
            animated: rest.trim() == "animated",
        }),
        "type" => Command::Intent(Intent::TextChanged(rest.to_string())),
        "cancel" => Command::Intent(Intent::CancelPressed),
        "clear" => Command::Intent(Intent::ClearPressed),
        "focus" => Command::Intent(Intent::BeginEditing),
        "blur" => Command::Intent(Intent::EditingEnded),
        "row" => {
            let mut parts = rest.split_whitespace();
            let (Some(row), Some(total), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err("usage: row <n> <total>".to_string());
            };
            Command::Intent(Intent::RowVisible {
                row: number(row)?,
                total: number(total)?,
            })
        }
        "tap" => Command::Tap(number(rest)?),
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(cmd)
}

/// What: Drive one session from stdin commands, printing outputs as JSON lines.
///
/// Inputs:
/// - `settings`: Session settings (endpoint, debounce, ...)
///
/// Output:
/// - `Ok(())` at end of input; `Err` on stdin/stdout failures or HTTP client setup errors
///
/// # Errors
/// - Returns `Err` when the HTTP client cannot be built or stdio fails
pub async fn run(settings: Settings) -> Result<()> {
    let service: Arc<dyn SearchService> = Arc::new(HttpSearchService::new(
        settings.endpoint.clone(),
        settings.request_timeout(),
    )?);
    let mut session = spawn_session(service, Arc::new(TracingAnalytics), &settings);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut displayed: Vec<Item> = Vec::new();

    loop {
        select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(Command::Intent(intent)) => {
                        let _ = session.intents.send(intent);
                    }
                    Ok(Command::Tap(index)) => match displayed.get(index) {
                        Some(item) => {
                            let _ = session.intents.send(Intent::ItemTapped(item.clone()));
                        }
                        None => tracing::warn!(index, len = displayed.len(), "tap outside the displayed list"),
                    },
                    Ok(Command::Quit) => break,
                    Err(e) => tracing::warn!(line = %line, error = %e, "ignoring command"),
                }
            }
            Some(out) = session.outputs.recv() => {
                write_output(&mut stdout, &mut displayed, &out).await?;
            }
        }
    }

    drop(session.intents);
    while let Some(out) = session.outputs.recv().await {
        write_output(&mut stdout, &mut displayed, &out).await?;
    }
    let _ = session.task.await;
    Ok(())
}

/// What: Print one output as a JSON line and remember the latest display list.
async fn write_output(
    stdout: &mut tokio::io::Stdout,
    displayed: &mut Vec<Item>,
    out: &SessionOutput,
) -> Result<()> {
    if let SessionOutput::DisplayList(list) = out {
        displayed.clone_from(list);
    }
    let mut line = serde_json::to_string(out)?;
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Every verb parses into the matching command.
    ///
    /// Inputs:
    /// - One line per supported verb.
    ///
    /// Output:
    /// - Matching `Command` values; `type` keeps inner spaces and may be empty.
    fn parses_all_verbs() {
        assert_eq!(
            parse_command("appear"),
            Ok(Command::Intent(Intent::ViewAppeared { animated: false }))
        );
        assert_eq!(
            parse_command("appear animated"),
            Ok(Command::Intent(Intent::ViewAppeared { animated: true }))
        );
        assert_eq!(
            parse_command("type 3d  printer"),
            Ok(Command::Intent(Intent::TextChanged("3d  printer".into())))
        );
        assert_eq!(
            parse_command("type"),
            Ok(Command::Intent(Intent::TextChanged(String::new())))
        );
        assert_eq!(parse_command("cancel"), Ok(Command::Intent(Intent::CancelPressed)));
        assert_eq!(parse_command("clear"), Ok(Command::Intent(Intent::ClearPressed)));
        assert_eq!(parse_command("focus"), Ok(Command::Intent(Intent::BeginEditing)));
        assert_eq!(parse_command("blur"), Ok(Command::Intent(Intent::EditingEnded)));
        assert_eq!(
            parse_command("row 8 10"),
            Ok(Command::Intent(Intent::RowVisible { row: 8, total: 10 }))
        );
        assert_eq!(parse_command("tap 2"), Ok(Command::Tap(2)));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    /// What: Malformed lines are rejected with a message.
    fn rejects_malformed_lines() {
        assert!(parse_command("jump").is_err());
        assert!(parse_command("row 8").is_err());
        assert!(parse_command("row 8 ten").is_err());
        assert!(parse_command("row 1 2 3").is_err());
        assert!(parse_command("tap first").is_err());
    }

    #[test]
    /// What: Outputs serialize to tagged JSON lines.
    fn outputs_serialize_as_tagged_json() {
        let json = serde_json::to_string(&SessionOutput::PopularVisible(true)).expect("json");
        assert_eq!(json, r#"{"kind":"popular_visible","value":true}"#);
        let json = serde_json::to_string(&SessionOutput::ResignFocus).expect("json");
        assert_eq!(json, r#"{"kind":"resign_focus"}"#);
    }
}
