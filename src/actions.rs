// the front-end data actions: import/export/clear/list, plus launching the
// external visualizer and replayer

use crate::Error;
use crate::config::Config;
use crate::console::{Console, Level};
use crate::store::Store;
use std::io;
use std::path::Path;
use std::process::Command;

/// Upload the recordings database to the configured server.
pub async fn export(config: &Config, console: &mut Console) -> Result<(), Error> {
    let db_path = config.db_path();
    if !db_path.exists() {
        console.log(Level::Warn, "nothing to export yet");
        return Ok(());
    }

    let bytes = std::fs::read(&db_path)?;
    let name = format!(
        "recordings-{}.db",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );

    let client = reqwest::Client::new();
    let response = client
        .post(&config.upload_url)
        .query(&[("filename", name.as_str())])
        .body(bytes)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::Api(format!("upload failed: {}", response.status())));
    }

    console.log(
        Level::Ok,
        &format!("exported {} to {}", db_path.display(), config.upload_url),
    );
    Ok(())
}

/// Copy a recordings database into the data directory.
pub fn import(config: &Config, source: &Path, console: &mut Console) -> Result<(), Error> {
    if !source.is_file() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a file", source.display()),
        )));
    }

    std::fs::create_dir_all(&config.data_dir)?;
    let dest = config.db_path();
    std::fs::copy(source, &dest)?;

    console.log(
        Level::Ok,
        &format!("imported {} -> {}", source.display(), dest.display()),
    );
    Ok(())
}

/// Wipe all recorded data.
pub async fn clear(config: &Config, console: &mut Console) -> Result<(), Error> {
    let store = Store::open(&config.db_path()).await?;
    let removed = store.clear().await?;
    console.log(Level::Ok, &format!("cleared {removed} recordings"));
    Ok(())
}

/// Print the recorded replays, newest first.
pub async fn list(config: &Config, json: bool, console: &mut Console) -> Result<(), Error> {
    let store = Store::open(&config.db_path()).await?;
    let recordings = store.list().await?;

    // raw json for scripts
    if json {
        console.line(&serde_json::to_string(&recordings).unwrap_or_default());
        return Ok(());
    }

    if recordings.is_empty() {
        console.log(Level::Info, "no recordings yet");
        return Ok(());
    }

    for r in &recordings {
        console.line(&format!(
            "{:>4}  {}  {}",
            r.id,
            format_timestamp(r.timestamp),
            r.task
        ));
    }
    Ok(())
}

/// Open the latest replay in the external visualizer.
pub async fn visualize(config: &Config, console: &mut Console) -> Result<(), Error> {
    let store = Store::open(&config.db_path()).await?;
    match store.latest().await? {
        Some(recording) => {
            console.log(Level::Info, &format!("visualizing \"{}\"", recording.task));
            spawn(&config.visualize_command, &[], console)
        }
        None => {
            console.log(Level::Warn, "nothing recorded yet");
            Ok(())
        }
    }
}

/// Replay the latest recording with the given strategy.
pub async fn replay(config: &Config, strategy: &str, console: &mut Console) -> Result<(), Error> {
    let store = Store::open(&config.db_path()).await?;
    match store.latest().await? {
        Some(recording) => {
            console.log(Level::Info, &format!("replaying \"{}\"", recording.task));
            spawn(&config.replay_command, &["--strategy", strategy], console)
        }
        None => {
            console.log(Level::Warn, "nothing recorded yet");
            Ok(())
        }
    }
}

// external tools are separate programs; fire and forget
fn spawn(program: &str, args: &[&str], console: &mut Console) -> Result<(), Error> {
    Command::new(program).args(args).spawn()?;
    console.log(Level::Ok, &format!("launched {program}"));
    Ok(())
}

fn format_timestamp(ts: f64) -> String {
    chrono::DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| ts.to_string())
}
