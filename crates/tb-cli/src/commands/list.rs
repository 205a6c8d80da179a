use std::path::PathBuf;

use comfy_table::{ContentArrangement, Table};

use tb_engine::EngineConfig;

pub fn run(files: &[PathBuf]) -> Result<(), String> {
    let session = super::load_session(files, EngineConfig::default())?;
    let names = session.list_public();

    if names.is_empty() {
        println!("  No public tables found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Entries", "Roller", "Flags"]);

    for name in &names {
        let Some(def) = session.registry().get(name.as_str()) else {
            continue;
        };

        let mut flags = Vec::new();
        if def.store {
            flags.push("store".to_string());
        }
        if let Some(source) = &def.reuse {
            flags.push(format!("reuse {source}"));
        }
        let flags = if flags.is_empty() {
            "—".to_string()
        } else {
            flags.join(", ")
        };

        table.add_row(vec![
            name.to_string(),
            def.data.len().to_string(),
            def.roller.to_string(),
            flags,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} public table{}",
        names.len(),
        if names.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
