mod layout;
mod logging;
mod merge;
mod output;
mod prune;
mod remove;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use droidres::{BuiltinLayout, Config};

use crate::layout::{parse_layout, run_gen_layout_command};
use crate::merge::run_merge_command;
use crate::prune::run_remove_english_command;
use crate::remove::run_remove_string_command;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./droidres.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove a named string from every strings.xml in the resource tree.
    RemoveString {
        /// Name of the string entry to delete
        name: String,

        /// Resource directory to walk (overrides the configuration)
        #[arg(long)]
        res_dir: Option<PathBuf>,
    },

    /// Print a keyboard layout as Android keyboard XML rows.
    GenLayout {
        /// Built-in layout to render: colemak, bulgarian-bds or armenian
        #[arg(short, long, default_value_t, value_parser = parse_layout)]
        layout: BuiltinLayout,
    },

    /// Merge crowd-sourced translations into the app's resource files.
    Merge {
        /// Crowd-sourced export, one directory per locale tag
        #[arg(long)]
        crowd_dir: Option<PathBuf>,

        /// Resource directory to update
        #[arg(long)]
        res_dir: Option<PathBuf>,
    },

    /// Remove translated strings that are identical to the English baseline.
    RemoveEnglish {
        /// Resource directory holding values/ and the translated values-*/ directories
        /// (defaults to app/src/main/res)
        #[arg(long)]
        res_dir: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let load_config = || Config::load(args.config.as_deref()).map_err(|e| e.to_string());

    match args.commands {
        Commands::RemoveString { name, res_dir } => {
            run_remove_string_command(&load_config()?, &name, res_dir, args.json)
        }
        Commands::GenLayout { layout } => run_gen_layout_command(layout, args.json),
        Commands::Merge { crowd_dir, res_dir } => {
            run_merge_command(&load_config()?, crowd_dir, res_dir, args.json)
        }
        Commands::RemoveEnglish { res_dir } => {
            run_remove_english_command(&load_config()?, res_dir, args.json)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Args::command(),
                "droidres",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
