pub mod check;
pub mod list;
pub mod roll;

use std::path::PathBuf;

use tb_engine::{EngineConfig, TableSession};

/// Build a session and load every table file into it, in order.
fn load_session(files: &[PathBuf], config: EngineConfig) -> Result<TableSession, String> {
    let mut session = TableSession::new(config);
    for path in files {
        let count = session
            .load_file(path)
            .map_err(|e| format!("{}: {e}", path.display()))?;
        log::info!("registered {count} table(s) from {}", path.display());
    }
    Ok(session)
}
