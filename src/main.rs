//! # Steganography Tool Entry Point
//!
//! ## Usage
//!
//! Interactive:
//! ```bash
//! cargo run --bin stego
//! ```
//!
//! Non-interactive:
//! ```bash
//! cargo run --bin stego -- encode --image photo.jpg --message "meet at noon" --color white
//! cargo run --bin stego -- decode --image encoded_output.png
//! ```

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use lsb_stego::common::config::StegoConfig;
use lsb_stego::driver::{decode_file, encode_file, run_interactive, Prompter};
use lsb_stego::utils::logging::init_logger;
use lsb_stego::{StegoError, TextColor};

/// Hide text in the least significant bits of an image, or read it back.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Do not open the output images in a viewer
    #[arg(long)]
    no_show: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Run once without prompting; the interactive dialogue starts otherwise
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message and write encoded_output.png and visible_message.png
    Encode {
        #[arg(short, long)]
        image: PathBuf,
        #[arg(short, long)]
        message: String,
        /// Colour of the visible text (red or white)
        #[arg(long, default_value = "red")]
        color: TextColor,
    },
    /// Print the message hidden in an image
    Decode {
        #[arg(short, long)]
        image: PathBuf,
    },
}

/// Print an operation failure the way the interactive session does and turn
/// it into a failing exit status.
fn report(result: Result<(), StegoError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_logger(args.verbose);

    let mut config = match &args.config {
        Some(path) => StegoConfig::from_file(path)?,
        None => StegoConfig::default(),
    };
    if args.no_show {
        config.output.show = false;
    }

    let status = match args.command {
        Some(Command::Encode {
            image,
            message,
            color,
        }) => report(encode_file(&image, &message, color, &config).map(|paths| {
            println!("✅ Hidden message saved as '{}'", paths.hidden.display());
            println!("✅ Visible message saved as '{}'", paths.visible.display());
        })),
        Some(Command::Decode { image }) => report(decode_file(&image).map(|message| {
            println!("🔍 Decoded message: {}", message);
        })),
        None => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            run_interactive(&mut prompter, &config)?;
            ExitCode::SUCCESS
        }
    };

    Ok(status)
}
