//! Player notifications that must not run while the game is borrowed
//!
//! A browser `alert` blocks, and timers may still fire while it is open. The
//! frame queues its notices and they are shown only after the game borrow is
//! released.

use std::cell::RefCell;

/// Notices produced during a frame
#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: Vec<String>,
}

impl NoticeQueue {
    pub fn push(&mut self, message: &str) {
        self.pending.push(message.to_string());
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Run `frame` under a mutable borrow, then hand its notices to `show` with
/// the borrow released
pub fn frame_then_notify<G>(
    game: &RefCell<G>,
    frame: impl FnOnce(&mut G) -> Vec<String>,
    mut show: impl FnMut(&str),
) {
    let notices = frame(&mut game.borrow_mut());
    for notice in &notices {
        show(notice);
    }
}
