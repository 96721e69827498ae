//! Pipeline command handoff
//!
//! The dispatcher translates variable changes into [`PendingCommand`]s and
//! pushes them into a single-producer/single-consumer queue. The display
//! pipeline drains the queue on its own thread and applies each command
//! exactly once; the dispatcher side never blocks on it.

use std::sync::mpsc;

use tracing::{debug, trace};

/// A state change the display pipeline must apply
///
/// Produced by the dispatcher, consumed exactly once per emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingCommand {
    /// Constrain the source to an aspect ratio; `0:0` lifts the constraint
    ChangeCropRatio {
        /// Ratio numerator
        num: u32,
        /// Ratio denominator
        den: u32,
    },
    /// Crop the source to an absolute window
    ChangeCropWindow {
        /// Left edge of the window
        x: u32,
        /// Top edge of the window
        y: u32,
        /// Window width
        width: u32,
        /// Window height
        height: u32,
    },
    /// Trim the source by per-edge borders
    ChangeCropBorder {
        /// Pixels trimmed from the left
        left: u32,
        /// Pixels trimmed from the top
        top: u32,
        /// Pixels trimmed from the right
        right: u32,
        /// Pixels trimmed from the bottom
        bottom: u32,
    },
    /// Override the sample aspect ratio; `0:0` restores the source value
    ChangeAspectRatio {
        /// Aspect numerator
        num: u32,
        /// Aspect denominator
        den: u32,
    },
    /// Scale the video by `num/den`
    ChangeZoom {
        /// Zoom numerator
        num: u32,
        /// Zoom denominator
        den: u32,
    },
    /// Fill the display area instead of fitting the video into it
    ChangeDisplayFilled(bool),
    /// Keep the video window above the others
    ChangeOnTop(bool),
    /// Switch fullscreen on or off
    ChangeFullscreen(bool),
    /// Replace the video filter chain (colon-separated module list)
    ChangeFilters(String),
    /// Replace the subpicture source chain
    ChangeSubSources(String),
    /// Replace the subpicture filter chain
    ChangeSubFilters(String),
    /// Move rendered subtitles by this many pixels
    ChangeSubMargin(i64),
    /// Grab and save the current frame
    TakeSnapshot,
}

/// Create the dispatcher-to-pipeline command queue
///
/// The sender half goes to the dispatcher; the receiver half to the
/// pipeline thread.
#[must_use]
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::channel();
    (CommandSender { tx }, CommandReceiver { rx })
}

/// Dispatcher side of the command queue
#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<PendingCommand>,
}

impl CommandSender {
    pub(crate) fn push(&self, command: PendingCommand) {
        trace!(?command, "pipeline command");
        if self.tx.send(command).is_err() {
            // the pipeline went away first during teardown; nothing to apply
            debug!("pipeline command receiver is gone");
        }
    }
}

/// Pipeline side of the command queue
pub struct CommandReceiver {
    rx: mpsc::Receiver<PendingCommand>,
}

impl CommandReceiver {
    /// Take the next command without blocking
    #[must_use]
    pub fn try_next(&self) -> Option<PendingCommand> {
        self.rx.try_recv().ok()
    }

    /// Take every command currently in the queue
    #[must_use]
    pub fn drain(&self) -> Vec<PendingCommand> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_arrive_in_order() {
        let (tx, rx) = command_channel();
        tx.push(PendingCommand::ChangeOnTop(true));
        tx.push(PendingCommand::ChangeZoom { num: 500, den: 1000 });

        assert_eq!(rx.try_next(), Some(PendingCommand::ChangeOnTop(true)));
        assert_eq!(
            rx.try_next(),
            Some(PendingCommand::ChangeZoom { num: 500, den: 1000 })
        );
        assert_eq!(rx.try_next(), None);
    }

    #[test]
    fn test_push_survives_dropped_receiver() {
        let (tx, rx) = command_channel();
        drop(rx);
        // must not panic or block
        tx.push(PendingCommand::TakeSnapshot);
    }

    #[test]
    fn test_drain_empties_queue() {
        let (tx, rx) = command_channel();
        tx.push(PendingCommand::ChangeFullscreen(true));
        tx.push(PendingCommand::ChangeFullscreen(false));

        assert_eq!(rx.drain().len(), 2);
        assert!(rx.drain().is_empty());
    }
}
