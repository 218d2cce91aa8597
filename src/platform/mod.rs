//! Platform abstraction layer
//!
//! - `input`: keyboard events to paddle intent
//! - `timer`: one-shot timers on a virtual clock
//! - `headless`: host implementation for running without a browser
//! - `notify`: player notices shown outside the game borrow

pub mod headless;
pub mod input;
pub mod notify;
pub mod timer;

pub use headless::{HeadlessHost, HeadlessRunner, RunSummary};
pub use input::{InputState, KeyAction};
pub use notify::{NoticeQueue, frame_then_notify};
pub use timer::TimerQueue;
