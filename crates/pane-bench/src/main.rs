use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use indoc::printdoc;

use pane_wm::tracing_sub::init_default;
use pane_wm::{
    DragController, FixedViewport, LayoutStrategy, MemoryStore, PaneId, PersistenceAdapter,
    ResizeEdge, Viewport, WindowRegistry, WmConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "pane-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replay randomized pane events and check that every pane stays bounded"
)]
struct BenchCli {
    /// Number of panes to open before replaying events.
    #[arg(short = 'p', long = "panes", default_value_t = 24)]
    panes: usize,

    /// Number of random events to replay.
    #[arg(short = 'n', long = "events", default_value_t = 200_000)]
    events: usize,

    /// Seed for the event generator; the same seed replays the same run.
    #[arg(short = 's', long = "seed", default_value_t = 0x5eed)]
    seed: u64,

    /// Canvas size.
    #[arg(long, default_value_t = 1600)]
    width: i32,
    #[arg(long, default_value_t = 1000)]
    height: i32,
}

#[derive(Debug, Default)]
struct Counters {
    moves: usize,
    resizes: usize,
    activations: usize,
    toggles: usize,
    arranges: usize,
    reopens: usize,
    saves: usize,
}

fn main() -> ExitCode {
    let cli = BenchCli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(violation) => {
            eprintln!("pane-bench: {violation}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &BenchCli) -> Result<(), String> {
    init_default(tracing::Level::INFO, None).map_err(|e| e.to_string())?;
    let mut rng = fastrand::Rng::with_seed(cli.seed);
    let viewport = FixedViewport::new(cli.width, cli.height);
    let store = MemoryStore::new();
    let config = WmConfig::default();
    let adapter = PersistenceAdapter::new(store.clone(), &config);
    let mut registry =
        WindowRegistry::with_persistence(config, Arc::new(viewport), adapter);
    let mut drag = DragController::new();

    let ids: Vec<PaneId> = (0..cli.panes)
        .map(|i| registry.create_window(format!("conv-{i}"), format!("Conversation {i}"), None))
        .collect();
    if ids.is_empty() {
        return Err("need at least one pane".to_string());
    }

    let mut counters = Counters::default();
    // simulated clock so the debounce fires at a realistic rate
    let mut clock = Instant::now();
    let started = Instant::now();

    for step in 0..cli.events {
        let id = &ids[rng.usize(..ids.len())];
        match rng.u8(..100) {
            0..=39 => {
                let (px, py) = (rng.f64() * 1000.0, rng.f64() * 1000.0);
                if drag.begin_move(&mut registry, id, px, py) {
                    for _ in 0..rng.usize(1..6) {
                        let dx = (rng.f64() - 0.5) * 800.0;
                        let dy = (rng.f64() - 0.5) * 800.0;
                        drag.pointer_moved(&mut registry, px + dx, py + dy);
                    }
                    drag.end();
                }
                counters.moves += 1;
            }
            40..=59 => {
                let edge = ResizeEdge::ALL[rng.usize(..ResizeEdge::ALL.len())];
                if drag.begin_resize(&mut registry, id, edge, 500.0, 500.0) {
                    let dx = rng.i32(-600..600);
                    let dy = rng.i32(-600..600);
                    drag.pointer_moved(&mut registry, 500.0 + f64::from(dx), 500.0 + f64::from(dy));
                    drag.end();
                }
                counters.resizes += 1;
            }
            60..=79 => {
                registry.activate_window(id);
                counters.activations += 1;
            }
            80..=89 => {
                if rng.bool() {
                    registry.toggle_minimize(id);
                } else {
                    registry.toggle_maximize(id);
                }
                counters.toggles += 1;
            }
            90..=96 => {
                let strategy = LayoutStrategy::ALL[rng.usize(..LayoutStrategy::ALL.len())];
                registry.arrange(strategy);
                counters.arranges += 1;
            }
            _ => {
                registry.close_window(id);
                registry.create_window(id.clone(), id.to_string(), None);
                counters.reopens += 1;
            }
        }

        clock += Duration::from_millis(rng.u64(0..120));
        if registry.tick(clock) {
            counters.saves += 1;
        }
        registry.take_events();
        check_bounded(&registry, step)?;
    }

    let elapsed = started.elapsed();
    let rate = cli.events as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    tracing::info!(events = cli.events, ?elapsed, "bench finished");
    printdoc! {"
        pane-bench: {events} events over {panes} panes in {elapsed:.2?} ({rate:.0} events/s)
          moves {moves}, resizes {resizes}, activations {activations}, toggles {toggles}
          arranges {arranges}, reopens {reopens}
          debounced saves {saves} ({writes} store writes)
        ",
        events = cli.events,
        panes = cli.panes,
        elapsed = elapsed,
        rate = rate,
        moves = counters.moves,
        resizes = counters.resizes,
        activations = counters.activations,
        toggles = counters.toggles,
        arranges = counters.arranges,
        reopens = counters.reopens,
        saves = counters.saves,
        writes = store.write_count(),
    };
    Ok(())
}

fn check_bounded(registry: &WindowRegistry, step: usize) -> Result<(), String> {
    let Viewport { width, height } = registry.viewport();
    let min = registry.config().min_size();
    for pane in registry.panes() {
        if pane.width < min.width || pane.height < min.height {
            return Err(format!("step {step}: {} below minimum size", pane.id));
        }
        if pane.x < 0 || pane.y < 0 {
            return Err(format!("step {step}: {} has a negative origin", pane.id));
        }
        // panes larger than the canvas are pinned to the origin instead
        let fits_x = if pane.width > width {
            pane.x == 0
        } else {
            pane.x + pane.width <= width
        };
        let fits_y = if pane.height > height {
            pane.y == 0
        } else {
            pane.y + pane.height <= height
        };
        if !(fits_x && fits_y) {
            return Err(format!("step {step}: {} escaped the viewport", pane.id));
        }
    }
    if let Some(active) = registry.active_window_id()
        && !registry.contains(active)
    {
        return Err(format!("step {step}: dangling active pane {active}"));
    }
    Ok(())
}
