// recap - client for a desktop recording and replay automation tool

mod actions;
mod chat;
pub mod cli;
mod config;
mod console;
mod core;
mod error;
mod store;

pub use chat::Chat;
pub use config::Config;
pub use console::{Console, Level};
pub use crate::core::{
    Ai, ChatSession, ClassifierSession, Gate, Message, Params, TOPICS, WARN_PREFIX,
};
pub use error::Error;
pub use store::{Recording, Store};
