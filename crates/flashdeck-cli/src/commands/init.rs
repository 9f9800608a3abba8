//! The `flashdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("flashdeck.toml").exists() {
        println!("flashdeck.toml already exists, skipping.");
    } else {
        std::fs::write("flashdeck.toml", SAMPLE_CONFIG)?;
        println!("Created flashdeck.toml");
    }

    if std::path::Path::new("vokabeln.csv").exists() {
        println!("vokabeln.csv already exists, skipping.");
    } else {
        std::fs::write("vokabeln.csv", SAMPLE_CATALOG)?;
        println!("Created vokabeln.csv");
    }

    println!("\nNext steps:");
    println!("  1. Add your own words to vokabeln.csv (term;translation, ###Group headers)");
    println!("  2. Run: flashdeck validate --catalog vokabeln.csv");
    println!("  3. Run: flashdeck study");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# flashdeck configuration

# JSON file holding learning progress and group selection
store_path = ".flashdeck/store.json"

# Uncomment for a reproducible card order
# shuffle_seed = 42

[catalog]
type = "file"
path = "vokabeln.csv"

# Or fetch the catalog over HTTP:
# type = "http"
# url = "https://example.org/vokabeln.csv"
"#;

const SAMPLE_CATALOG: &str = "\
###Tiere
canis;Hund
felis;Katze
equus;Pferd
###Farben
ruber;rot
albus;weiß
niger;schwarz
###Verben
amare;lieben
videre;sehen
";
