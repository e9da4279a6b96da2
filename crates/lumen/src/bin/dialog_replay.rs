//! # Dialog Replay
//!
//! Replays the menu's startup dialogs headless on a fixed 60 FPS clock, so
//! the same settings always produce the same frame log.
//!
//! 1. Welcome screen until its countdown runs out
//! 2. Asset extraction, completed by a worker thread
//! 3. The controls screen, dismissed after one frame
//! 4. A few MEM1 allocations, then shutdown
//!
//! ```bash
//! # Built-in first-launch settings
//! ./dialog_replay
//!
//! # Settings from a file, with per-frame tracing
//! RUST_LOG=lumen_ui=trace ./dialog_replay settings.toml
//! ```

use std::env;
use std::process;
use std::thread;

use lumen::core::Region;
use lumen::ui::{ConfigFlag, DialogKind, MenuSettings, SharedSettings};
use lumen::{MenuLoop, MenuLoopConfig, TARGET_FRAME_TIME};
use tracing::{error, info};
use tracing_subscriber::prelude::*;

/// Give up on a dialog after this many frames.
const MAX_FRAMES: u64 = 600;

/// Frame at which the extraction worker reports completion.
const EXTRACTION_DONE_FRAME: u64 = 45;

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(e) = result {
        eprintln!("failed to initialize tracing: {e}");
    }
}

fn load_settings() -> MenuSettings {
    let Some(path) = env::args().nth(1) else {
        return MenuSettings {
            menu_show_start_screen: true,
            ..MenuSettings::default()
        };
    };

    match MenuSettings::load(&path) {
        Ok(settings) => {
            info!(%path, "settings loaded");
            settings
        }
        Err(e) => {
            error!(%path, error = %e, "cannot load settings");
            process::exit(1);
        }
    }
}

/// Ticks until the active dialog finishes or `MAX_FRAMES` pass.
///
/// `on_frame` runs before every tick with the number of frames spent on
/// this dialog so far.
fn run_dialog(
    menu: &mut MenuLoop,
    frame_us: u64,
    mut on_frame: impl FnMut(u64),
) -> bool {
    for local in 0..MAX_FRAMES {
        on_frame(local);
        let now_us = menu.frame_count() * frame_us;
        let report = menu.tick(now_us);

        if report.pushed {
            info!(frame = report.frame, kind = ?report.kind, "help screen pushed");
            println!("{}\n", menu.text());
        }
        if report.finished {
            info!(frame = report.frame, kind = ?report.kind, "dialog finished");
            return true;
        }
        if menu.dialogs().current_kind() == DialogKind::None {
            return false;
        }
    }
    false
}

fn main() {
    init_logging();

    let frame_us = u64::try_from(TARGET_FRAME_TIME.as_micros()).unwrap_or(u64::MAX);
    let settings = SharedSettings::new(load_settings());
    let mut menu = MenuLoop::new(MenuLoopConfig::default(), settings.clone());

    if let Err(e) = menu.startup() {
        error!(error = %e, "menu startup failed");
        process::exit(1);
    }

    // === STARTUP DIALOG ===
    if menu.dialogs().current_kind() == DialogKind::Welcome {
        let _ = run_dialog(&mut menu, frame_us, |_| {});
    }

    // === ASSET EXTRACTION ===
    let extracting = menu.dialogs().current_kind() == DialogKind::HelpExtract
        || menu.open(DialogKind::HelpExtract);
    if extracting {
        let done = run_dialog(&mut menu, frame_us, |local| {
            if local == EXTRACTION_DONE_FRAME {
                let worker = settings.clone();
                let handle = thread::spawn(move || worker.set(ConfigFlag::BundleFinished, true));
                if handle.join().is_err() {
                    error!("extraction worker panicked");
                }
            }
        });
        if !done {
            error!("extraction never finished");
        }
    }

    // === CONTROLS ===
    if menu.open(DialogKind::HelpControls) {
        let report = menu.tick(menu.frame_count() * frame_us);
        info!(frame = report.frame, "controls shown");
        println!("{}", menu.text());
        menu.dismiss();
    }

    // === MEM1 ===
    let regions = menu.regions_mut();
    let blocks: Vec<_> = [4096, 256, 64 * 1024]
        .into_iter()
        .map(|size| regions.allocate(Region::Mem1, size, 32))
        .collect();
    if let Some(stats) = regions.stats(Region::Mem1) {
        info!(
            used = stats.used,
            free = stats.free,
            allocations = stats.allocations,
            "MEM1 usage"
        );
    }
    for block in blocks {
        regions.free(Region::Mem1, block);
    }

    menu.shutdown();
}
