use clap::{Parser, Subcommand};
use dripflow::client::{ApiClient, ApiConfig};
use dripflow::diagram;
use dripflow::flow::{Autoresponder, EditorSession};
use std::fs;

/// Manage autoresponder flows through the backend admin API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a local definition file as flowchart text (offline)
    Render {
        /// Path to the autoresponder definition JSON file
        definition_path: String,
    },
    /// List the autoresponders stored on the backend
    List,
    /// Fetch one autoresponder and print its JSON
    Get {
        autoresponder_id: String,
        /// Write the definition to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate a local definition file and create-or-update it
    Push {
        /// Path to the autoresponder definition JSON file
        definition_path: String,
    },
    /// Delete an autoresponder by id
    Delete { autoresponder_id: String },
    /// List the email templates available to 'send email' steps
    Templates,
    /// Print the tags that auto-confirm a subscriber
    GetAutoConfirmTags,
    /// Replace the tags that auto-confirm a subscriber
    SetAutoConfirmTags { tags: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render { definition_path } => render(&definition_path),
        Command::List => {
            let autoresponders = client()
                .list_autoresponders(None)
                .await
                .unwrap_or_else(|e| exit_with_error(&format!("Listing failed: {}", e)));
            if autoresponders.is_empty() {
                println!("No autoresponders found");
            }
            for autoresponder in autoresponders {
                println!("{}", autoresponder.autoresponder_id);
            }
        }
        Command::Get {
            autoresponder_id,
            output,
        } => {
            let autoresponder = client()
                .get_autoresponder(&autoresponder_id)
                .await
                .unwrap_or_else(|e| {
                    exit_with_error(&format!(
                        "Error loading autoresponder '{}': {}",
                        autoresponder_id, e
                    ))
                });
            let json = serde_json::to_string_pretty(&autoresponder)
                .unwrap_or_else(|e| exit_with_error(&format!("Serialization failed: {}", e)));
            match output {
                Some(path) => {
                    fs::write(&path, json).unwrap_or_else(|e| {
                        exit_with_error(&format!("Failed to write '{}': {}", path, e))
                    });
                    println!("Saved autoresponder '{}' to '{}'", autoresponder_id, path);
                }
                None => println!("{}", json),
            }
        }
        Command::Push { definition_path } => {
            let mut autoresponder = load_definition(&definition_path);
            autoresponder.apply_default_tag_reason();
            autoresponder
                .validate()
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            client()
                .put_autoresponder(&autoresponder)
                .await
                .unwrap_or_else(|e| {
                    exit_with_error(&format!("Error posting autoresponder: {}", e))
                });
            println!(
                "Autoresponder '{}' created or updated",
                autoresponder.autoresponder_id
            );
        }
        Command::Delete { autoresponder_id } => {
            client()
                .delete_autoresponder(&autoresponder_id)
                .await
                .unwrap_or_else(|e| {
                    exit_with_error(&format!(
                        "Error deleting autoresponder '{}': {}",
                        autoresponder_id, e
                    ))
                });
            println!("Deleted autoresponder '{}'", autoresponder_id);
        }
        Command::Templates => {
            let templates = client()
                .list_templates()
                .await
                .unwrap_or_else(|e| exit_with_error(&format!("Template listing failed: {}", e)));
            if templates.is_empty() {
                println!("No templates found");
            }
            for template in templates {
                println!("{}", template.name);
            }
        }
        Command::GetAutoConfirmTags => {
            let tags = client()
                .get_auto_confirm_tags()
                .await
                .unwrap_or_else(|e| exit_with_error(&format!("Loading tags failed: {}", e)));
            println!("{}", tags);
        }
        Command::SetAutoConfirmTags { tags } => {
            client()
                .set_auto_confirm_tags(&tags)
                .await
                .unwrap_or_else(|e| exit_with_error(&format!("Saving tags failed: {}", e)));
            println!("Auto confirm tags updated");
        }
    }
}

fn render(definition_path: &str) {
    let autoresponder = load_definition(definition_path);
    let session = EditorSession::load(autoresponder);
    print!("{}", diagram::to_diagram_text(session.autoresponder()));
}

fn load_definition(path: &str) -> Autoresponder {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)))
}

fn client() -> ApiClient {
    let config =
        ApiConfig::from_env().unwrap_or_else(|e| exit_with_error(&format!("{}", e)));
    ApiClient::new(config)
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
