// core logic - completion client, sessions, and the topic gate

mod ai;
mod gate;
mod session;

pub use ai::{Ai, Message, Params};
pub use gate::{Gate, TOPICS, WARN_PREFIX};
pub use session::{ChatSession, ClassifierSession};
