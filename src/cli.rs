use clap::{Args, Parser, Subcommand};

use crate::models::{ActivityLevel, Gender, Goal};

/// Nutri Planner: nutrition targets and AI-assisted meal planning.
#[derive(Parser, Debug)]
#[command(name = "nutri_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML config file.
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API.
    Serve {
        /// Address to bind, overriding the config.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the config.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print daily calorie and macro targets for a profile.
    Targets(ProfileArgs),

    /// Print the meal catalog.
    Catalog {
        /// JSON catalog to load instead of the configured one.
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Build a budget menu for a profile.
    Menu {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Daily budget in VND.
        #[arg(long)]
        budget: Option<f64>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve {
            host: None,
            port: None,
        }
    }
}

/// Profile values; any that are missing are asked for interactively.
#[derive(Args, Debug, Default, Clone)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Age in years.
    #[arg(long)]
    pub age: Option<u32>,

    #[arg(long, value_enum)]
    pub gender: Option<Gender>,

    /// Height in centimetres.
    #[arg(long)]
    pub height: Option<f64>,

    /// Weight in kilograms.
    #[arg(long)]
    pub weight: Option<f64>,

    #[arg(long, value_enum)]
    pub activity: Option<ActivityLevel>,

    #[arg(long, value_enum)]
    pub goal: Option<Goal>,
}
