//! Terminal chat loop around the storefront agent.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::chat;
use crate::config::Config;
use crate::core::category::QUICK_OPTIONS;
use crate::core::{BotReply, StorefrontAgent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Category(String),
    NewSession,
    Options,
    Stats,
    Forget,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Text(line.to_string());
    };

    let (name, arg) = rest.split_once(' ').unwrap_or((rest, ""));
    match name {
        "new" => Command::NewSession,
        "options" => Command::Options,
        "stats" => Command::Stats,
        "forget" => Command::Forget,
        "quit" | "exit" => Command::Quit,
        "category" if !arg.trim().is_empty() => Command::Category(arg.trim().to_string()),
        _ => match name.parse::<usize>() {
            Ok(n) if (1..=QUICK_OPTIONS.len()).contains(&n) => {
                Command::Category(QUICK_OPTIONS[n - 1].to_string())
            }
            _ => Command::Unknown(line.to_string()),
        },
    }
}

pub struct ChatApp {
    config: Config,
    agent: StorefrontAgent,
}

impl ChatApp {
    pub fn new(config: Config, agent: StorefrontAgent) -> Self {
        Self { config, agent }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.print_greeting();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match parse_command(&line) {
                Command::Quit => break,
                Command::Text(text) => {
                    if text.is_empty() {
                        continue;
                    }
                    println!("{}", chat::THINKING_LINE);
                    let reply = self.agent.send_user_text(&text).await;
                    self.print_reply(reply);
                }
                Command::Category(label) => {
                    println!("{}", chat::THINKING_LINE);
                    let reply = self.agent.select_category(&label).await;
                    self.print_reply(reply);
                }
                Command::NewSession => {
                    self.agent.start_new_session();
                    self.print_greeting();
                }
                Command::Options => println!("{}", chat::render_options(&QUICK_OPTIONS)),
                Command::Stats => println!("{}", self.agent.storage_stats()),
                Command::Forget => {
                    self.agent.forget_history();
                    println!("Previous conversations forgotten.");
                }
                Command::Unknown(raw) => {
                    println!("Unknown command {raw}. Try /options, /new, /stats, /forget or /quit.");
                }
            }
        }

        log::info!("👋 Chat closed");
        Ok(())
    }

    fn print_greeting(&self) {
        if let Some(welcome) = self.agent.transcript().first() {
            println!("{}", chat::render_message(welcome, &self.config.assistant_name));
        }
        println!("{}", chat::render_options(&QUICK_OPTIONS));
        if !self.agent.has_remote() {
            println!("(offline: answers come from the built-in FAQ)");
        }
    }

    fn print_reply(&self, reply: Option<BotReply>) {
        if let Some(reply) = reply {
            println!("{}", chat::render_message(&reply.message, &self.config.assistant_name));
        }
    }
}
