#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that forwards world events to the host's listeners.

use std::fmt;

use lizard_puzzle_core::{Event, ScoreUpdateListener, ShowDialogListener, WIN_MESSAGE};

/// Dispatches dialog and score notifications derived from world events.
///
/// Listeners are called synchronously, in event order, while [`Notifier::handle`]
/// runs. They receive no access to the world and therefore cannot re-enter it.
#[derive(Default)]
pub struct Notifier {
    dialog: Option<Box<dyn ShowDialogListener>>,
    score: Option<Box<dyn ScoreUpdateListener>>,
}

impl Notifier {
    /// Creates a notifier with the provided listeners installed.
    #[must_use]
    pub fn new(
        dialog: Option<Box<dyn ShowDialogListener>>,
        score: Option<Box<dyn ScoreUpdateListener>>,
    ) -> Self {
        Self { dialog, score }
    }

    /// Replaces both listeners. Passing `None` silences that channel.
    pub fn set_listeners(
        &mut self,
        dialog: Option<Box<dyn ShowDialogListener>>,
        score: Option<Box<dyn ScoreUpdateListener>>,
    ) {
        self.dialog = dialog;
        self.score = score;
    }

    /// Consumes a batch of world events, invoking listeners as needed.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::LizardCountChanged { count } => {
                    if let Some(score) = self.score.as_mut() {
                        score.update_score(*count);
                    }
                }
                Event::PuzzleSolved => {
                    if let Some(dialog) = self.dialog.as_mut() {
                        dialog.show_dialog(WIN_MESSAGE);
                    }
                }
                _ => {}
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("dialog", &self.dialog.is_some())
            .field("score", &self.score.is_some())
            .finish()
    }
}
