//! Host port errors

use ledmux_core::MuxError;
use ledmux_driver::StartupError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PosixError {
    #[error("invalid display configuration: {0}")]
    Config(#[from] MuxError),
    #[error("display startup failed: {0}")]
    Startup(#[from] StartupError),
}
