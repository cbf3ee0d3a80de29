use dripflow::diagram;
use dripflow::flow::{Autoresponder, EditorSession};
use std::env;
use std::fs;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: cargo run -- <path/to/autoresponder.json>");
        std::process::exit(1);
    }

    let definition_path = &args[1];
    println!("Loading autoresponder from: {}", definition_path);

    let definition_json = match fs::read_to_string(definition_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to read definition file '{}': {}", definition_path, e);
            std::process::exit(1);
        }
    };

    let autoresponder: Autoresponder = match serde_json::from_str(&definition_json) {
        Ok(autoresponder) => autoresponder,
        Err(e) => {
            eprintln!("Failed to parse autoresponder JSON: {}", e);
            std::process::exit(1);
        }
    };

    let session = EditorSession::load(autoresponder);
    let autoresponder = session.autoresponder();

    println!(
        "Autoresponder '{}' with {} steps",
        autoresponder.autoresponder_id,
        autoresponder.steps.len()
    );

    match autoresponder.validate() {
        Ok(()) => println!("Definition is complete and ready to save"),
        Err(e) => println!("Definition is not ready to save: {}", e),
    }

    println!("\nFlowchart:");
    println!("{}", diagram::to_diagram_text(autoresponder));
}
