//! Interrupt handling.
//!
//! A Ctrl-C in the terminal reaches the whole foreground process group. The
//! session transport owns the terminal while a tunnel is open, so ssm-jump
//! only records the interrupt and lets the transport decide how to exit.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Check if an interrupt has been received since the last reset.
pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::Relaxed)
}

/// Reset the interrupt flag.
pub fn reset_interrupt() {
    INTERRUPTED.store(false, Ordering::Relaxed);
}

/// Install the process-wide Ctrl-C handler.
///
/// The handler can only be set once per process; later calls keep the
/// existing one.
pub fn install_interrupt_handler() {
    if let Err(e) = ctrlc::set_handler(|| {
        info!("Received Ctrl+C signal");
        INTERRUPTED.store(true, Ordering::Relaxed);
    }) {
        debug!("Could not set Ctrl-C handler: {}", e);
    }
}

