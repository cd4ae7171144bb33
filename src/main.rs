//! # Command-Line Entry Point
//!
//! ## Usage
//!
//! ```bash
//! pixel-cipher encode --input photo.jpg --output secret.png --message "HELLO" --password test123
//! pixel-cipher decode --input secret.png --password test123
//! pixel-cipher capacity --input photo.jpg
//! ```
//!
//! The output of `encode` is always PNG: lossy formats would destroy the
//! embedded bits.

use anyhow::bail;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use pixel_cipher::common::config::AppConfig;
use pixel_cipher::common::logging::init_logger;
use pixel_cipher::image_io::{read_image_file, write_image_file, ImageSource, PngCodec};
use pixel_cipher::processing::capacity::message_capacity;
use pixel_cipher::{DecodeOutcome, DecodeRequest, EncodeRequest, Pipeline};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Log at DEBUG level regardless of the configured level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide an encrypted message in an image
    Encode {
        /// Cover image (any format the decoder understands)
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the PNG carrier
        #[arg(short, long)]
        output: PathBuf,

        /// Message to hide
        #[arg(short, long)]
        message: String,

        /// Password protecting the message
        #[arg(short, long)]
        password: String,
    },
    /// Recover a hidden message
    Decode {
        /// Carrier image produced by `encode`
        #[arg(short, long)]
        input: PathBuf,

        /// Password used at encode time
        #[arg(short, long)]
        password: String,
    },
    /// Show how many message bytes an image can hold
    Capacity {
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load_or_default(args.config.as_deref())?;
    let level = if args.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logger(level);

    let pipeline = Pipeline::png(config.image.max_input_bytes);

    match args.command {
        Command::Encode {
            input,
            output,
            message,
            password,
        } => {
            let image = read_image_file(&input).await?;
            let carrier = pipeline
                .encode(EncodeRequest {
                    image: Some(image),
                    message: Some(message),
                    password: Some(password),
                })
                .await?;

            write_image_file(&output, &carrier).await?;
            info!("💾 Carrier written to {}", output.display());
        }
        Command::Decode { input, password } => {
            let image = read_image_file(&input).await?;
            let outcome = pipeline
                .decode(DecodeRequest {
                    image: Some(image),
                    password: Some(password),
                })
                .await?;

            match outcome {
                DecodeOutcome::Success(message) => println!("{}", message),
                other => bail!("{}", other.describe()),
            }
        }
        Command::Capacity { input } => {
            let image = read_image_file(&input).await?;
            let buffer = PngCodec::new(config.image.max_input_bytes)
                .load(image)
                .await?;

            println!(
                "{}x{}: up to {} message bytes",
                buffer.width(),
                buffer.height(),
                message_capacity(buffer.channel_count())
            );
        }
    }

    Ok(())
}
