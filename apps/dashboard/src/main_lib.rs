use std::io::Write;
use std::sync::Arc;

use investor_dashboard_client::InvestorApiClient;
use investor_dashboard_core::dashboard::{DashboardController, DashboardEvent};
use investor_dashboard_core::InvestorDataSourceTrait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::commands::{ShellCommand, HELP};
use crate::config::{Config, LogFormat};
use crate::render;

/// Installs the global subscriber. Logs go to stderr, grids to stdout.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// What the terminal loop should do after a command.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Redraw,
    Print(&'static str),
    Quit,
}

/// Dashboard controller plus the terminal-only view state.
pub struct Session {
    controller: DashboardController,
    page: usize,
}

impl Session {
    pub fn new(source: Arc<dyn InvestorDataSourceTrait>) -> Self {
        Self {
            controller: DashboardController::new(source),
            page: 1,
        }
    }

    pub fn start(&mut self) {
        self.controller.dispatch(DashboardEvent::Mounted);
    }

    pub fn apply(&mut self, command: ShellCommand) -> Flow {
        match command {
            ShellCommand::Select(investor_id) => {
                self.page = 1;
                self.controller
                    .dispatch(DashboardEvent::InvestorSelected(investor_id));
                Flow::Redraw
            }
            ShellCommand::Filter(filter) => {
                self.page = 1;
                self.controller.dispatch(DashboardEvent::FilterSelected(filter));
                Flow::Redraw
            }
            ShellCommand::Page(page) => {
                self.page = page;
                Flow::Redraw
            }
            ShellCommand::Refresh => {
                self.controller.dispatch(DashboardEvent::Refresh);
                Flow::Redraw
            }
            ShellCommand::Help => Flow::Print(HELP),
            ShellCommand::Quit => Flow::Quit,
        }
    }

    pub fn has_in_flight(&self) -> bool {
        self.controller.in_flight() > 0
    }

    pub async fn next_update(&mut self) -> bool {
        self.controller.next_update().await
    }

    pub fn render(&self) -> String {
        render::render_dashboard(self.controller.state(), self.page)
    }
}

fn print_screen(screen: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", screen)?;
    write!(stdout, "> ")?;
    stdout.flush()
}

/// Runs the terminal dashboard until `quit` or end of input.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let client = InvestorApiClient::new(&config.api_url, config.request_timeout)?;
    tracing::info!("Using investors API at {}", client.base_url());

    let mut session = Session::new(Arc::new(client));
    session.start();
    print_screen(&session.render())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            applied = session.next_update(), if session.has_in_flight() => {
                if applied {
                    print_screen(&session.render())?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<ShellCommand>() {
                    Ok(command) => match session.apply(command) {
                        Flow::Redraw => print_screen(&session.render())?,
                        Flow::Print(text) => print_screen(text)?,
                        Flow::Quit => break,
                    },
                    Err(e) => print_screen(&e.to_string())?,
                }
            }
        }
    }

    tracing::info!("Dashboard closed");
    Ok(())
}
