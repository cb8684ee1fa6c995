// app configuration - one explicit object, no process-wide globals

use std::env;
use std::path::PathBuf;

pub const DEFAULT_UPLOAD_URL: &str = "http://127.0.0.1:8000/upload";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the capture subsystem keeps its data.
    pub data_dir: PathBuf,
    /// Where `export` uploads the recordings database.
    pub upload_url: String,
    pub chat_model: String,
    pub dark_mode: bool,
    /// External programs; we only launch them.
    pub visualize_command: String,
    pub replay_command: String,
}

impl Config {
    pub fn load(data_dir: Option<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.unwrap_or_else(default_data_dir),
            upload_url: env::var("RECAP_UPLOAD_URL")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_URL.to_string()),
            chat_model: env::var("RECAP_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            dark_mode: detect_dark(),
            visualize_command: "recap-visualize".to_string(),
            replay_command: "recap-replay".to_string(),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("recordings.db")
    }
}

fn default_data_dir() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".recap"),
        Err(_) => PathBuf::from(".recap"),
    }
}

// dark unless the terminal background is clearly light
fn detect_dark() -> bool {
    match terminal_light::luma() {
        Ok(luma) => luma < 0.6,
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = Config::load(Some(PathBuf::from("/tmp/recap-test")));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/recap-test"));
    }

    #[test]
    fn test_db_path_is_under_the_data_dir() {
        let config = Config::load(Some(PathBuf::from("/tmp/recap-test")));
        assert_eq!(
            config.db_path(),
            PathBuf::from("/tmp/recap-test/recordings.db")
        );
    }
}
