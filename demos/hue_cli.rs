//! CLI application for controlling Hue lights.
//!
//! Pair once with `pair <bridge-ip>`, then every other command reuses the
//! cached credentials.
//!
//! Run with: cargo run --example hue_cli -- --help

use clap::{Parser, Subcommand};
use hue_lights_rs::{Bridge, FileCredentialStore, LightFilter, PatchOutcome};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hue-cli")]
#[command(about = "Control Hue lights from the command line", long_about = None)]
struct Cli {
    /// Where the bridge credentials are cached
    #[arg(short, long, global = true, default_value = "hue-credentials.json")]
    credentials: PathBuf,

    /// Light ids to target (all lights when omitted)
    #[arg(short, long, global = true, value_delimiter = ',')]
    lights: Vec<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pair with a bridge (press its link button first)
    Pair {
        /// IP address of the bridge
        bridge_ip: String,
    },

    /// Show bridge address and user
    Info,

    /// List all lights
    Lights,

    /// List all groups and their lights
    Groups,

    /// List scenes, bucketed by name
    Scenes,

    /// Turn lights on
    On,

    /// Turn lights off
    Off,

    /// Toggle lights on/off
    Toggle,

    /// Set brightness: 0-254, a fraction like 0.5, or min/med/max
    Brightness { value: String },

    /// Set color: a web color name like "orange", or "r,g,b" with components in 0-1
    Color { color: String },
}

fn report(outcomes: &[PatchOutcome]) {
    for outcome in outcomes {
        match outcome.error() {
            None => println!("Light {}: ok", outcome.light_id()),
            Some(e) => eprintln!("Light {}: {}", outcome.light_id(), e),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let store = FileCredentialStore::new(&cli.credentials);
    let mut bridge = Bridge::http();

    if let Commands::Pair { bridge_ip } = &cli.command {
        println!("Pairing with bridge at {}...", bridge_ip);
        bridge.create_user(bridge_ip)?;
        bridge.save_credentials(&store)?;
        println!("Paired; credentials saved to {}", store.path().display());
        return Ok(());
    }

    bridge.load_existing(&store)?;
    let filter = LightFilter::from(cli.lights);

    match cli.command {
        Commands::Pair { .. } => unreachable!(),

        Commands::Info => println!("{}", bridge.debug_info()?),

        Commands::Lights => {
            for light in bridge.fetch_lights()? {
                println!("{}", light.borrow());
            }
        }

        Commands::Groups => {
            bridge.fetch_lights()?;
            for group in bridge.fetch_groups()? {
                println!("{}\n", group);
            }
        }

        Commands::Scenes => {
            bridge.fetch_lights()?;
            bridge.fetch_scenes()?;
            for (name, scenes) in bridge.grouped_scenes() {
                println!("\nScene group: {}", name);
                for scene in scenes {
                    println!("{}", scene);
                }
            }
        }

        Commands::On => {
            bridge.fetch_lights()?;
            report(&bridge.turn_on(filter));
        }

        Commands::Off => {
            bridge.fetch_lights()?;
            report(&bridge.turn_off(filter));
        }

        Commands::Toggle => {
            bridge.fetch_lights()?;
            report(&bridge.toggle_on(filter));
        }

        Commands::Brightness { value } => {
            bridge.fetch_lights()?;
            report(&bridge.set_brightness(value, filter)?);
        }

        Commands::Color { color } => {
            bridge.fetch_lights()?;
            report(&bridge.set_color(color.parse::<hue_lights_rs::Color>()?, filter)?);
        }
    }

    Ok(())
}
