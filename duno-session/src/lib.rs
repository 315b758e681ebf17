pub mod notice;
pub mod session;

pub use notice::{Notice, NoticeKind};
pub use session::{GameSession, SessionEvent, SessionHandle, BOT_TURN_DELAY, UNO_PENALTY_WINDOW};
