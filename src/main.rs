//! Eye Care - a 20-20-20 break reminder
//!
//! Every 20 minutes a full-screen overlay asks you to look 20 feet away for
//! 20 seconds, pausing any playing media for the duration.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, warn};

use eyecare::cycle::Signals;
use eyecare::media::{MediaController, SystemMediaController};
use eyecare::platform;
use eyecare::sound::{RodioTonePlayer, SilentToneEmitter, ToneEmitter};
use eyecare::ui;

fn main() {
    // Initialize logging
    init_tracing();

    if let Err(e) = platform::ensure_supported() {
        platform::report(&e);
        std::process::exit(1);
    }

    if let Err(e) = run() {
        error!(error = %e, "Eye care exited with an error");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn run() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("break-cycle")
        .enable_time()
        .build()
        .context("Failed to create timing runtime")?;

    let tones: Arc<dyn ToneEmitter> = match RodioTonePlayer::new() {
        Ok(player) => Arc::new(player),
        Err(e) => {
            warn!(error = %e, "Tone player unavailable, breaks will be silent");
            Arc::new(SilentToneEmitter)
        }
    };
    let media: Arc<dyn MediaController> = Arc::new(SystemMediaController::new());

    ui::run_gui(runtime.handle().clone(), Signals::new(tones, media))
}
