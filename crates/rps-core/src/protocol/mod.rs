//! Game records, notifications and caller-side messages.

mod events;
mod messages;
mod types;

pub use events::GameEvent;
pub use messages::{CommitMessage, RevealMessage, SealedMove};
pub use types::{Game, GameView};
