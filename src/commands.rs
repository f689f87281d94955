//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host performs after an update.

use std::time::Duration;

use crate::panel::DrawerEdge;
use crate::tracker::PeekHandle;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Repaint once; nothing is animating
    Redraw,
    /// Repaint and send `Msg::Frame` on the next render tick
    RequestFrame,
    /// After `delay`, send `Msg::PeekElapsed { edge, handle }`
    SchedulePeek {
        edge: DrawerEdge,
        handle: PeekHandle,
        delay: Duration,
    },
    /// Deliver a synthetic cancel to content children; the layout has
    /// taken over the gesture
    CancelChildTouches,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, flattening trivial cases
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| *c != Cmd::None).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::RequestFrame => true,
            // Timers redraw when they fire
            Cmd::SchedulePeek { .. } => false,
            Cmd::CancelChildTouches => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Check if the host must keep delivering frames
    pub fn needs_frame(&self) -> bool {
        match self {
            Cmd::RequestFrame => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_frame()),
            _ => false,
        }
    }

    /// Flatten into a list of leaf commands
    pub fn into_vec(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_vec).collect(),
            other => vec![other],
        }
    }

    /// Convert into the `Option` form returned by `update`
    pub fn into_option(self) -> Option<Cmd> {
        match self {
            Cmd::None => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_flattens_trivial_cases() {
        assert_eq!(Cmd::batch(vec![]), Cmd::None);
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::Redraw]), Cmd::Redraw);
        assert!(matches!(
            Cmd::batch(vec![Cmd::Redraw, Cmd::CancelChildTouches]),
            Cmd::Batch(_)
        ));
    }

    #[test]
    fn test_needs_redraw_and_frame() {
        let peek = Cmd::SchedulePeek {
            edge: DrawerEdge::Left,
            handle: PeekHandle(1),
            delay: Duration::from_millis(160),
        };
        assert!(!peek.needs_redraw());
        assert!(Cmd::batch(vec![peek.clone(), Cmd::RequestFrame]).needs_frame());
        assert!(Cmd::batch(vec![peek, Cmd::Redraw]).needs_redraw());
        assert!(!Cmd::Redraw.needs_frame());
    }
}
