//! Real-time simulation of the 8-digit counter display.
//!
//! Logs what the LEDs would show a few times per second.

use std::thread;
use std::time::Duration;

use anyhow::Context;
use ledmux_core::MuxConfig;
use ledmux_driver::BusLayout;
use ledmux_posix::HostDisplay;
use log::{error, info};

const REFRESH: Duration = Duration::from_millis(250);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let display = HostDisplay::start(MuxConfig::OCTAL, BusLayout::OCTAL_BOARD)
        .inspect_err(|err| error!("{err}"))
        .context("display startup failed")?;

    loop {
        thread::sleep(REFRESH);
        if !display.is_running() {
            anyhow::bail!("ticker thread exited");
        }
        info!("[{}]", display.snapshot());
    }
}
