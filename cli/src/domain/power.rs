//! Power-state transition vocabulary.

use std::fmt;

/// An OS power-state notification.
///
/// `StatusChange` covers notifications that are neither a suspend nor a
/// resume (battery/AC transitions and the like); it is logged but never
/// actions services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEvent {
    Suspend,
    Resume,
    StatusChange,
}

impl fmt::Display for PowerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Suspend => "suspend",
            Self::Resume => "resume",
            Self::StatusChange => "status-change",
        })
    }
}
