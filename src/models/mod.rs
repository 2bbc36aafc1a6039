pub mod session;
pub mod slot;

pub use session::{ChatMessage, Session, SessionMode};
pub use slot::SlotOption;
