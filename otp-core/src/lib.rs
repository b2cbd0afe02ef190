//! Framework-free core logic for the OTP entry flow.
//!
//! Two independent pieces live here: the segmented code-input state machine
//! (`segment`) and the countdown timer state machine plus its wire messages
//! (`timer`). Neither touches the DOM or an async runtime; the frontend crate
//! adapts them to events and tasks.

pub mod segment;
pub mod timer;

pub use segment::{Backspace, Edit, FocusMove, NavKey};
pub use timer::{Countdown, TimerCommand, TimerEvent};
