use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "delve")]
#[command(about = "Deep Dungeon progress tracker tools")]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Feed a recorded capture through the progress tracker
    Replay {
        /// JSON-lines capture file
        capture: PathBuf,

        /// Opcode table (TOML); built-in defaults when omitted
        #[arg(short, long)]
        opcodes: Option<PathBuf>,

        /// Write the final run summary as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Decode a single server message payload
    Decode {
        /// Opcode in hex (e.g. 0x0200)
        opcode: String,

        /// Payload bytes in hex, spaces allowed
        payload: String,

        /// Opcode table (TOML); built-in defaults when omitted
        #[arg(short, long)]
        opcodes: Option<PathBuf>,
    },

    /// Write default config and opcode files
    InitConfig {
        #[arg(long, default_value = "delve.toml")]
        out: PathBuf,

        #[arg(long, default_value = "opcodes.toml")]
        opcodes_out: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let directive = if args.verbose {
        "delve=debug"
    } else {
        "delve=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    match args.command {
        Command::Replay {
            capture,
            opcodes,
            json,
        } => commands::replay::run(&capture, opcodes.as_deref(), json.as_deref()),
        Command::Decode {
            opcode,
            payload,
            opcodes,
        } => commands::decode::run(&opcode, &payload, opcodes.as_deref()),
        Command::InitConfig {
            out,
            opcodes_out,
            force,
        } => commands::init_config::run(&out, &opcodes_out, force),
    }
}
