//! Selection state machine.
//!
//! States are `None` (passthrough) or an index into the color space list.
//! Discrete input events move between them; invalid indices are ignored and
//! `Quit` ends the machine without touching the selection.

use tracing::debug;

/// Selected color space index, or `None` for passthrough.
pub type Selection = Option<usize>;

/// Discrete input delivered by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Select the space at this index.
    ChooseIndex(usize),
    /// Select passthrough.
    ChooseNone,
    /// Shut down.
    Quit,
}

impl InputEvent {
    /// Maps a digit key: `1..=9` choose index 0..8, `0` chooses none.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Self::ChooseNone),
            1..=9 => Some(Self::ChooseIndex(usize::from(digit - 1))),
            _ => None,
        }
    }
}

/// Outcome of feeding one event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Selection moved (possibly to the same state).
    Changed(Selection),
    /// Event had no effect.
    Ignored,
    /// Terminal state reached.
    Quit,
}

/// Drives [`Selection`] from input events.
#[derive(Debug, Clone)]
pub struct SelectionController {
    selection: Selection,
    len: usize,
    done: bool,
}

impl SelectionController {
    /// Controller over `len` spaces; starts at index 0, or `None` if empty.
    pub fn new(len: usize) -> Self {
        Self {
            selection: (len > 0).then_some(0),
            len,
            done: false,
        }
    }

    /// Current selection.
    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// True once `Quit` was handled.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Applies one event.
    pub fn handle(&mut self, event: InputEvent) -> Transition {
        if self.done {
            return Transition::Ignored;
        }
        match event {
            InputEvent::ChooseIndex(k) if k < self.len => {
                debug!(from = ?self.selection, to = k, "selection changed");
                self.selection = Some(k);
                Transition::Changed(self.selection)
            }
            InputEvent::ChooseIndex(k) => {
                debug!(index = k, len = self.len, "ignoring out-of-range selection");
                Transition::Ignored
            }
            InputEvent::ChooseNone => {
                debug!(from = ?self.selection, "selection cleared");
                self.selection = None;
                Transition::Changed(None)
            }
            InputEvent::Quit => {
                self.done = true;
                Transition::Quit
            }
        }
    }
}
