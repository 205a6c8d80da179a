use std::path::PathBuf;

use colored::Colorize;

use tb_engine::EngineConfig;

pub fn run(files: &[PathBuf]) -> Result<(), String> {
    let session = super::load_session(files, EngineConfig::default())?;
    let registry = session.registry();
    let dangling = registry.validate();

    if dangling.is_empty() {
        println!("  All checks passed.");
        println!(
            "  {} tables, {} public",
            registry.len(),
            registry.list_public().len()
        );
        return Ok(());
    }

    for problem in &dangling {
        eprintln!("  {} {problem}", "✗".red());
    }
    Err(format!(
        "{} dangling reuse reference{}",
        dangling.len(),
        if dangling.len() == 1 { "" } else { "s" }
    ))
}
