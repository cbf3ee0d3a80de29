use clap::Parser;
use dripflow::flow::{EditorSession, HumanTime, Outcome, StepKind, TimeUnit};
use rand::{rngs::ThreadRng, Rng};
use std::fs;

/// A CLI tool to generate demo autoresponder flows for the editor and
/// diagram renderer.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Autoresponder id of the generated flow
    #[arg(long, default_value = "demo-sequence")]
    id: String,

    /// Number of follow-up emails in the main sequence
    #[arg(long, default_value_t = 3)]
    emails: usize,

    /// Append a tag-check branch with a VIP offer at the end
    #[arg(long, default_value_t = true)]
    branch: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    println!(
        "Generating demo flow '{}' with {} follow-up email(s)...",
        cli.id, cli.emails
    );

    let mut session = EditorSession::new(cli.id.clone());
    session.open_step("Start")?;
    session.set_template_id("Welcome")?;

    let mut current = "Start".to_string();
    for i in 1..=cli.emails {
        let name = format!("Follow up {}", i);
        session.wire_next(&current, &name, random_delay(&mut rng))?;
        session.set_template_id(&format!("FollowUp{}", i))?;
        println!("-> Added '{}'", name);
        current = name;
    }

    if cli.branch {
        session.wire_next(&current, "Pause", random_delay(&mut rng))?;
        session.set_step_kind("Pause", StepKind::Wait)?;
        session.wire_next("Pause", "Check vip tag", HumanTime::new(1, TimeUnit::Days))?;
        session.set_tag_to_check("vip")?;
        session.wire_branch("Check vip tag", Outcome::Yes, "Send vip offer")?;
        session.set_template_id("VipOffer")?;
        session.wire_branch("Check vip tag", Outcome::No, "Goodbye")?;
        session.set_step_kind("Goodbye", StepKind::Unsubscribe)?;
        println!("-> Added vip tag check branch");
    }

    let autoresponder = session.into_autoresponder();
    let json_output = serde_json::to_string_pretty(&autoresponder)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved demo flow to '{}'",
        cli.output
    );

    Ok(())
}

/// Picks a plausible delay between sequence emails.
fn random_delay(rng: &mut ThreadRng) -> HumanTime {
    if rng.random_bool(0.7) {
        HumanTime::new(rng.random_range(1..=7), TimeUnit::Days)
    } else {
        HumanTime::new(rng.random_range(1..=23), TimeUnit::Hours)
    }
}
