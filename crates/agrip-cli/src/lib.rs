use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agrip")]
#[command(about = "Interactive text summarization driven one token at a time", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the tokenizer definition (tokenizer.json)
    pub tokenizer: String,

    /// Maximum summary length in tokens
    #[arg(long, default_value_t = 100)]
    pub max_length: usize,

    /// Minimum summary length before an end token is honored
    #[arg(long, default_value_t = 30)]
    pub min_length: usize,

    /// Sampling temperature (0.0 = greedy, higher = more random)
    #[arg(short, long, default_value_t = 0.8)]
    pub temperature: f32,

    /// Use greedy decoding (ignores temperature)
    #[arg(long)]
    pub greedy: bool,

    /// Suppress status messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
