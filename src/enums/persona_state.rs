use strum_macros::Display;
use num_enum::IntoPrimitive;

/// The friends-list state shown to other users.
#[derive(Debug, Display, IntoPrimitive, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum PersonaState {
    /// Not shown as online.
    Offline = 0,
    /// Visible and online.
    Online = 1,
    /// Online but busy.
    Busy = 2,
    /// Online but away.
    Away = 3,
    /// Online but snoozing.
    Snooze = 4,
    /// Looking to trade.
    LookingToTrade = 5,
    /// Looking to play.
    LookingToPlay = 6,
    /// Online but invisible to others.
    Invisible = 7,
}
