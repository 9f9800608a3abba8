//! The `flashdeck groups` command.

use anyhow::Result;

use flashdeck_sources::create_source;

use crate::SessionArgs;

pub async fn execute(args: SessionArgs, toggles: Vec<String>) -> Result<()> {
    let config = super::resolve_config(&args)?;
    let source = create_source(&config.catalog)?;
    let mut session = super::open_session(&config, source.as_ref()).await?;

    for name in &toggles {
        let snapshot = session.toggle_group(name)?;
        let selected = snapshot
            .groups
            .iter()
            .any(|o| &o.group == name && o.selected);
        println!(
            "{} {name}",
            if selected { "Selected" } else { "Deselected" }
        );
    }

    let snapshot = session.snapshot();
    if snapshot.groups.is_empty() {
        println!("No groups discovered.");
        return Ok(());
    }

    for option in &snapshot.groups {
        let mark = if option.selected { "x" } else { " " };
        println!("[{mark}] {}", option.group);
    }
    println!("\n{}", snapshot.summary);

    Ok(())
}
