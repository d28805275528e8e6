use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "model-fetch")]
#[command(version)]
#[command(
    about = "Install Python ML dependencies and download a model from the Hugging Face Hub",
    long_about = None
)]
pub struct Cli {
    /// Model repository identifier, e.g. meta-llama/Meta-Llama-3-8B
    #[arg(long)]
    pub model: String,

    /// Hugging Face access token
    #[arg(long)]
    pub token: String,
}
