// interactive chat - a blocking stdin reader feeding an async chat task

use crate::console::{Console, Level};
use crate::core::{Ai, ChatSession, Gate};
use tokio::sync::mpsc;

const ASSISTANT_NAME: &str = "Assistant";
const ASSISTANT_SYSTEM: &str =
    "You are a helpful assistant embedded in a desktop recording and replay tool. \
     Answer the user's questions directly.";

/// All chat state in one place: the wire client, the advisory gate, the
/// running conversation, and the output sink.
pub struct Chat {
    ai: Ai,
    gate: Option<Gate>,
    session: ChatSession,
    console: Console,
}

impl Chat {
    pub fn new(ai: Ai, console: Console, gated: bool) -> Self {
        Self {
            ai,
            gate: gated.then(Gate::new),
            session: ChatSession::new(ASSISTANT_SYSTEM),
            console,
        }
    }

    /// Drain the queue until it closes. Every message runs gate -> reply,
    /// strictly in that order, one message at a time.
    pub async fn run(&mut self, mut lines: mpsc::Receiver<String>) {
        self.console.reply(ASSISTANT_NAME, "Ready for chat!");
        self.console.prompt();

        while let Some(line) = lines.recv().await {
            self.handle(&line).await;
            self.console.prompt();
        }
    }

    async fn handle(&mut self, message: &str) {
        if let Some(gate) = &self.gate {
            match gate.check(&self.ai, message).await {
                Ok(Some(warning)) => self.console.warning(&warning),
                Ok(None) => {}
                // the gate is advisory - report and keep going
                Err(e) => self.console.log(Level::Warn, &format!("gate anomaly: {e}")),
            }
        }

        match self.session.send(&self.ai, message).await {
            Ok(reply) => self.console.reply(ASSISTANT_NAME, &reply),
            Err(e) => self.console.log(Level::Error, &format!("chat failed: {e}")),
        }
    }
}

/// Read lines on a dedicated thread. An empty line or EOF ends the session
/// by closing the channel.
pub fn stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(1);

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            if stdin.read_line(&mut line).unwrap_or(0) == 0 {
                break;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            if tx.blocking_send(trimmed.to_string()).is_err() {
                break;
            }
        }
    });

    rx
}
