//! Line-oriented session over one in-memory planner.
//!
//! Every input line is one command and produces one compact JSON line on
//! stdout: the resulting event, `{"type":"refused"}`, or a projection.
//! Nothing is persisted; the day ends with the process.

use std::time::Duration;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use dailythree_core::{Config, Event, Planner, PlannerService};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Args)]
pub struct ShellArgs {
    /// Override the focus tick period in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,
}

#[derive(Parser)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Add a blank task
    Add,
    /// Replace a task's text
    Edit {
        rank: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Delete a task
    Delete { rank: usize },
    /// Toggle a task's completion
    Toggle { rank: usize },
    /// Start a focus session on a task
    Focus { rank: usize },
    /// Stop the focus session
    Stop,
    /// Advance the countdown by hand
    Tick {
        #[arg(default_value_t = 1)]
        count: u32,
    },
    /// Answer the morning question
    Morning {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Submit the end-of-day reflection
    Reflect {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Discard today and start over
    Reset,
    /// Close the upgrade prompt
    DismissUpgrade,
    /// Print the focus score
    Score,
    /// Print the full day view
    Show,
    /// Leave the shell
    Quit,
}

pub fn run(args: ShellArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let tick_interval = args
        .tick_ms
        .map(|ms| Duration::from_millis(ms.max(1)))
        .unwrap_or_else(|| config.tick_interval());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    runtime.block_on(session(Planner::new(config.account.is_pro), tick_interval))
}

async fn session(
    planner: Planner,
    tick_interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut service = PlannerService::new(planner, tick_interval).with_event_sink(tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                if let Some(event) = service.rollover_if_stale(Local::now().date_naive())? {
                    emit_event(&event)?;
                }
                match ShellLine::try_parse_from(line.split_whitespace()) {
                    Ok(ShellLine { command: ShellCommand::Quit }) => break,
                    Ok(ShellLine { command }) => execute(&mut service, command, &line)?,
                    Err(e) => {
                        let message = e.to_string();
                        let first = message.lines().next().unwrap_or_default();
                        println!("{}", json!({ "type": "error", "message": first }));
                    }
                }
            }
            Some(event) = rx.recv() => {
                if matches!(event, Event::SessionElapsed { .. }) {
                    emit_event(&event)?;
                }
            }
        }
    }
    debug!("shell session ended");
    Ok(())
}

/// Free text after the first `words` whitespace-separated words, verbatim.
fn raw_tail(line: &str, words: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..words {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}

/// Text argument of a command. Parsed words only say whether any were given;
/// the stored text is taken from the raw line so its spacing survives.
fn text_arg<'a>(line: &'a str, words: usize, parsed: &[String]) -> &'a str {
    if parsed.is_empty() {
        ""
    } else {
        raw_tail(line, words)
    }
}

fn execute(
    service: &mut PlannerService,
    command: ShellCommand,
    line: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = match command {
        ShellCommand::Add => service.add_task()?,
        ShellCommand::Edit { rank, text } => match service.task_id_at(rank)? {
            Some(id) => service.update_task(&id, text_arg(line, 2, &text))?,
            None => None,
        },
        ShellCommand::Delete { rank } => match service.task_id_at(rank)? {
            Some(id) => service.delete_task(&id)?,
            None => None,
        },
        ShellCommand::Toggle { rank } => match service.task_id_at(rank)? {
            Some(id) => service.toggle_complete(&id)?,
            None => None,
        },
        ShellCommand::Focus { rank } => match service.task_id_at(rank)? {
            Some(id) => service.start_session(&id)?,
            None => None,
        },
        ShellCommand::Stop => service.stop_session()?,
        ShellCommand::Tick { count } => {
            let mut last = None;
            for _ in 0..count {
                match service.tick()? {
                    Some(event) => last = Some(event),
                    None => break,
                }
            }
            last
        }
        ShellCommand::Morning { text } => {
            service.submit_morning_question(text_arg(line, 1, &text))?
        }
        ShellCommand::Reflect { text } => service.submit_reflection(text_arg(line, 1, &text))?,
        ShellCommand::Reset => service.reset_day()?,
        ShellCommand::DismissUpgrade => service.dismiss_upgrade_prompt()?,
        ShellCommand::Score => {
            let breakdown = service.with_planner(|p| p.score_breakdown())?;
            println!(
                "{}",
                json!({ "type": "score", "score": breakdown.total, "breakdown": breakdown })
            );
            return Ok(());
        }
        ShellCommand::Show => {
            println!("{}", serde_json::to_string(&service.view()?)?);
            return Ok(());
        }
        ShellCommand::Quit => return Ok(()),
    };

    match outcome {
        Some(event) => emit_event(&event)?,
        None => println!("{}", json!({ "type": "refused" })),
    }
    Ok(())
}

fn emit_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_tail_keeps_inner_whitespace() {
        assert_eq!(raw_tail("edit 1 a    b\tc", 2), "a    b\tc");
        assert_eq!(raw_tail("  morning   ship it ", 1), "ship it ");
        assert_eq!(raw_tail("reflect", 1), "");
    }

    #[test]
    fn text_arg_is_empty_without_parsed_words() {
        assert_eq!(text_arg("edit 1", 2, &[]), "");
        assert_eq!(text_arg("edit 1 x  y", 2, &["x".into(), "y".into()]), "x  y");
    }
}
