//! Interactive shell over a single controller.
//!
//! Mirrors the two-tab checker page: pick a tab, type input, check, and
//! browse or export the history between checks.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};

use super::commands::{self, Report};
use super::view;
use crate::constants::DEFAULT_EXPORT_COUNT;
use crate::logic::classify::{ApiClient, CheckKind};
use crate::logic::controller::CheckController;

const PROMPT_SUFFIX: &str = "> ";

const HELP: &str = "\
Commands:
  tab xss|url       switch input mode
  input <text>      set input for the current tab
  check             run the check for the current tab
  clear             clear input and current result
  show              show the current result
  history [n]       show history (newest first)
  export [n]        print the newest n records as JSON (default 50)
  clear-history     delete all stored history
  health            ping the classification API
  help              this text
  quit | exit       leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Tab(CheckKind),
    Input(String),
    Check,
    Clear,
    Show,
    History(Option<usize>),
    Export(usize),
    ClearHistory,
    Health,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "tab" => rest.parse().map(Self::Tab),
            "input" => Ok(Self::Input(rest.to_string())),
            "check" => Ok(Self::Check),
            "clear" => Ok(Self::Clear),
            "show" => Ok(Self::Show),
            "history" => parse_count(rest).map(Self::History),
            "export" => parse_count(rest).map(|n| Self::Export(n.unwrap_or(DEFAULT_EXPORT_COUNT))),
            "clear-history" => Ok(Self::ClearHistory),
            "health" => Ok(Self::Health),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{}' (try 'help')", other)),
        }
    }
}

fn parse_count(arg: &str) -> Result<Option<usize>, String> {
    if arg.is_empty() {
        return Ok(None);
    }
    arg.parse()
        .map(Some)
        .map_err(|_| format!("expected a number, got '{}'", arg))
}

pub struct Shell {
    controller: CheckController,
    client: ApiClient,
}

impl Shell {
    pub fn new(controller: CheckController, client: ApiClient) -> Self {
        Self { controller, client }
    }

    /// Execute one command. `None` means the shell should exit.
    pub async fn execute(&mut self, command: ShellCommand) -> Option<Report> {
        let c = &mut self.controller;
        let report = match command {
            ShellCommand::Tab(kind) => {
                c.set_tab(kind);
                Report { text: format!("Tab: {}", kind.as_str().to_uppercase()), ok: true }
            }
            ShellCommand::Input(text) => {
                let kind = c.active_tab();
                c.set_input(kind, text);
                Report { text: format!("{} input set ({} chars)", kind.as_str().to_uppercase(), c.input(kind).chars().count()), ok: true }
            }
            ShellCommand::Check => commands::run_active(c).await,
            ShellCommand::Clear => {
                let kind = c.active_tab();
                c.clear(kind);
                Report { text: view::render_state(c.state()), ok: true }
            }
            ShellCommand::Show => Report { text: view::render_state(c.state()), ok: true },
            ShellCommand::History(limit) => commands::history(c, limit),
            ShellCommand::Export(count) => match commands::export(c, count, None) {
                Ok(report) => report,
                Err(e) => Report { text: e.to_string(), ok: false },
            },
            ShellCommand::ClearHistory => commands::clear_history(c),
            ShellCommand::Health => commands::health(&self.client).await,
            ShellCommand::Help => Report { text: HELP.to_string(), ok: true },
            ShellCommand::Quit => return None,
        };
        Some(report)
    }

    /// Read commands from stdin until quit or EOF
    pub async fn run(&mut self) -> io::Result<()> {
        println!("Rakshak shell. API: {}. Type 'help' for commands.", self.client.base_url());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = io::stdout();

        loop {
            print!("{}{}", self.controller.active_tab(), PROMPT_SUFFIX);
            stdout.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match ShellCommand::parse(&line) {
                Ok(command) => match self.execute(command).await {
                    Some(report) => println!("{}", report.text),
                    None => break,
                },
                Err(e) => println!("Error: {}", e),
            }
        }
        Ok(())
    }
}
