use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use indoc::indoc;

use pane_wm::tracing_sub::{init_default, level_for_verbosity};
use pane_wm::{
    ConfigError, FileStore, FixedViewport, LayoutStrategy, PaneId, PersistError,
    PersistenceAdapter, Position, Viewport, WindowRegistry, WmConfig,
};

const AFTER_HELP: &str = indoc! {"
    Every invocation restores the saved layout, applies one command, writes
    the layout back and prints the stack front-most first.

    Examples:
      pane-wm open conv-1 --title Support
      pane-wm move conv-1 -- -20 140
      pane-wm arrange grid --viewport 1600x1000
"};

#[derive(Parser, Debug)]
#[command(
    name = "pane-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect and drive a persisted pane layout",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Directory holding the layout files. Defaults to the platform data dir.
    #[arg(long, value_name = "DIR", global = true)]
    state_dir: Option<PathBuf>,

    /// Canvas size the layout is bounded to.
    #[arg(
        long,
        value_name = "WxH",
        default_value = "1280x800",
        value_parser = parse_viewport,
        global = true
    )]
    viewport: Viewport,

    /// JSON file overriding the built-in tunables.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a pane, or bring it to the front if it is already open.
    Open {
        id: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, requires = "y", allow_negative_numbers = true)]
        x: Option<i32>,
        #[arg(long, requires = "x", allow_negative_numbers = true)]
        y: Option<i32>,
    },
    /// Bring a pane to the front.
    Activate { id: String },
    Close { id: String },
    /// Toggle minimized state.
    Minimize { id: String },
    /// Toggle maximized state.
    Maximize { id: String },
    /// Move a pane; the position is snapped and kept inside the viewport.
    Move {
        id: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    Resize { id: String, width: i32, height: i32 },
    /// Arrange every visible pane.
    Arrange {
        #[arg(value_enum)]
        layout: ArrangeArg,
    },
    /// Print the stack without changing anything.
    List,
    /// Close every pane.
    Reset,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ArrangeArg {
    Grid,
    Horizontal,
    Vertical,
    Cascade,
}

impl From<ArrangeArg> for LayoutStrategy {
    fn from(value: ArrangeArg) -> Self {
        match value {
            ArrangeArg::Grid => LayoutStrategy::Grid,
            ArrangeArg::Horizontal => LayoutStrategy::TileHorizontal,
            ArrangeArg::Vertical => LayoutStrategy::TileVertical,
            ArrangeArg::Cascade => LayoutStrategy::Cascade,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write layout: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to open log file: {0}")]
    Log(#[from] io::Error),
    #[error("no state directory available; pass --state-dir")]
    NoStateDir,
    #[error("no pane with id `{0}`")]
    UnknownPane(PaneId),
}

fn parse_viewport(raw: &str) -> Result<Viewport, String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{raw}`"))?;
    let width: i32 = w.trim().parse().map_err(|_| format!("bad width `{w}`"))?;
    let height: i32 = h.trim().parse().map_err(|_| format!("bad height `{h}`"))?;
    if width <= 0 || height <= 0 {
        return Err(format!("viewport must be positive, got {width}x{height}"));
    }
    Ok(Viewport::new(width, height))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pane-wm: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_default(level_for_verbosity(cli.verbose), cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => WmConfig::load(path)?,
        None => WmConfig::default(),
    };
    let dir = cli
        .state_dir
        .clone()
        .or_else(FileStore::default_dir)
        .ok_or(CliError::NoStateDir)?;
    tracing::debug!(dir = %dir.display(), "using state directory");

    let adapter = PersistenceAdapter::new(FileStore::new(dir), &config);
    let mut registry =
        WindowRegistry::with_persistence(config, Arc::new(FixedViewport(cli.viewport)), adapter);

    apply(&mut registry, cli.command)?;
    registry.flush()?;
    print_stack(&registry);
    Ok(())
}

fn apply(registry: &mut WindowRegistry, command: Command) -> Result<(), CliError> {
    fn known(registry: &WindowRegistry, id: String) -> Result<PaneId, CliError> {
        let id = PaneId::from(id);
        if registry.contains(&id) {
            Ok(id)
        } else {
            Err(CliError::UnknownPane(id))
        }
    }

    match command {
        Command::Open { id, title, x, y } => {
            let position = x.zip(y).map(|(x, y)| Position::new(x, y));
            registry.create_window(id, title, position);
        }
        Command::Activate { id } => {
            let id = known(registry, id)?;
            registry.activate_window(&id);
        }
        Command::Close { id } => {
            let id = known(registry, id)?;
            registry.close_window(&id);
        }
        Command::Minimize { id } => {
            let id = known(registry, id)?;
            registry.toggle_minimize(&id);
        }
        Command::Maximize { id } => {
            let id = known(registry, id)?;
            registry.toggle_maximize(&id);
        }
        Command::Move { id, x, y } => {
            let id = known(registry, id)?;
            registry.update_position(&id, x, y);
        }
        Command::Resize { id, width, height } => {
            let id = known(registry, id)?;
            registry.update_size(&id, width, height);
        }
        Command::Arrange { layout } => {
            registry.arrange(layout.into());
        }
        Command::List => {}
        Command::Reset => registry.clear(),
    }
    Ok(())
}

fn print_stack(registry: &WindowRegistry) {
    let active = registry.active_window_id();
    for id in registry.z_order().iter().rev() {
        let Some(pane) = registry.pane(id) else {
            continue;
        };
        let marker = if Some(id) == active { '*' } else { ' ' };
        let mut flags = String::new();
        if pane.is_minimized {
            flags.push_str(" minimized");
        }
        if pane.is_maximized {
            flags.push_str(" maximized");
        }
        println!(
            "{marker} {:<16} {:>5},{:<5} {:>5}x{:<5} z={}{flags}  {}",
            pane.id, pane.x, pane.y, pane.width, pane.height, pane.z_index, pane.title
        );
    }
}
