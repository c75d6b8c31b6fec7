//! Slide navigation: a clamped index over a fixed number of slides.
//!
//! The deck never touches the document itself. Every visible change goes
//! through a [`SlideView`], which the browser build backs with DOM elements
//! and tests back with a recorder.

use crate::error::InitError;

/// The presentation surface the deck drives.
pub trait SlideView {
    fn set_active(&mut self, index: usize, active: bool);
    /// Progress bar width in percent, 0.0 to 100.0.
    fn set_progress(&mut self, percent: f64);
    fn set_prev_visible(&mut self, visible: bool);
    fn set_next_visible(&mut self, visible: bool);
}

/// Navigation requested by a control or a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
}

impl NavCommand {
    /// Maps a `KeyboardEvent.key` value to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(NavCommand::Next),
            "ArrowLeft" => Some(NavCommand::Previous),
            _ => None,
        }
    }
}

/// Progress of `index` through `len` slides, in percent.
///
/// A deck of one slide is already at its end and reports 100%.
pub fn progress_percent(index: usize, len: usize) -> f64 {
    if len <= 1 {
        return 100.0;
    }
    index.min(len - 1) as f64 / (len - 1) as f64 * 100.0
}

pub struct SlideDeck<V> {
    view: V,
    len: usize,
    current: usize,
}

impl<V: SlideView> SlideDeck<V> {
    /// Wraps `len` slides. The view is left untouched until [`show_slide`]
    /// is called.
    ///
    /// [`show_slide`]: SlideDeck::show_slide
    pub fn new(view: V, len: usize) -> Result<Self, InitError> {
        if len == 0 {
            return Err(InitError::EmptyDeck);
        }
        Ok(Self {
            view,
            len,
            current: 0,
        })
    }

    /// Makes `index` the only active slide and updates progress and controls.
    /// Indices past the end are clamped to the last slide.
    pub fn show_slide(&mut self, index: usize) {
        let last = self.len - 1;
        let index = index.min(last);
        for i in 0..self.len {
            self.view.set_active(i, false);
        }
        self.view.set_active(index, true);
        self.view.set_progress(progress_percent(index, self.len));
        self.view.set_prev_visible(index != 0);
        self.view.set_next_visible(index != last);
        self.current = index;
    }

    /// Returns whether the index moved.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.len {
            self.show_slide(self.current + 1);
            true
        } else {
            false
        }
    }

    /// Returns whether the index moved.
    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.show_slide(self.current - 1);
            true
        } else {
            false
        }
    }

    pub fn apply(&mut self, command: NavCommand) -> bool {
        match command {
            NavCommand::Next => self.next(),
            NavCommand::Previous => self.previous(),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
