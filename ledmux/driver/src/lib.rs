#![no_std]
#![forbid(unsafe_code)]

//! # ledmux driver
//!
//! Binds the pure multiplexing logic of `ledmux-core` to a GPIO bank and a
//! repeating timer from `ledmux-hal`.
//!
//! A typical bring-up:
//!
//! ```ignore
//! let config = MuxConfig::OCTAL;
//! let layout = BusLayout::OCTAL_BOARD;
//! let scheduler = MuxScheduler::new(config, layout)?;
//! startup::start(bus, &mut timer, scheduler, None)?;
//! loop {}
//! ```
//!
//! Boards without a closure-based timer install the scheduler in a
//! [`SharedScheduler`] and call [`SharedScheduler::on_interrupt`] from the
//! timer ISR instead.

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod error;
pub mod layout;
pub mod pins;
pub mod scheduler;
pub mod shared;
pub mod startup;

pub use error::StartupError;
pub use layout::BusLayout;
pub use pins::PinBus;
pub use scheduler::MuxScheduler;
pub use shared::SharedScheduler;
