mod context;
mod diagnostics;
mod power;
mod presentation;
mod render;
mod theme;
mod ticker;
mod time_provider;
mod todo;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::context::AppContext;
use crate::render::background::{Background, BackgroundKind};
use crate::time_provider::{parse_fixed_time, select_provider};
use crate::todo::TodoStore;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliBackground {
    Flat,
    Gradient,
    Bitmap,
}

impl From<CliBackground> for BackgroundKind {
    fn from(value: CliBackground) -> Self {
        match value {
            CliBackground::Flat => BackgroundKind::Flat,
            CliBackground::Gradient => BackgroundKind::Gradient,
            CliBackground::Bitmap => BackgroundKind::Bitmap,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "wallclock",
    version,
    about = "Full-screen wall clock with time-of-day backgrounds and a todo list"
)]
struct Cli {
    /// Todo file, one reminder per line. A file picker opens when omitted.
    #[arg(long)]
    todo_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = CliBackground::Flat)]
    background: CliBackground,

    /// Image whose four horizontal bands back the four periods of the day.
    #[arg(long)]
    wallpaper: Option<PathBuf>,

    #[arg(long)]
    windowed: bool,

    /// Print the current frame instead of opening a window.
    #[arg(long)]
    diagnostics: bool,

    /// Fixed local time, YYYY-MM-DDTHH:MM[:SS].
    #[arg(long, requires = "diagnostics")]
    at: Option<String>,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wallclock=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let fixed_at = cli.at.as_deref().map(parse_fixed_time).transpose()?;
    let clock = select_provider(fixed_at);
    let background = Background::load(cli.background.into(), cli.wallpaper.as_deref())?;

    if cli.diagnostics {
        let todos = cli
            .todo_file
            .map(|path| TodoStore::open(path).list().clone())
            .unwrap_or_default();
        return diagnostics::run_diagnostics(&clock, &background, &todos);
    }

    let todo_file = match cli.todo_file {
        Some(path) => path,
        None => ui::dialogs::pick_todo_file()?,
    };
    let context = AppContext::new(
        clock,
        background,
        TodoStore::open(todo_file),
        power::SleepInhibitor::new(power::platform_backend()),
    )
    .context("failed to prepare the clock")?;

    ui::app::run_gui(context, cli.windowed)
}
