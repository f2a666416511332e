use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::stdout;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xword_core::config::{PuzzleConfig, WordDistribution};
use xword_core::core::direction::DirectionWeights;
use xword_core::core::selector::LengthPolicy;
use xword_core::corpus::Corpus;
use xword_core::persistence::{load_corpus, save_corpus};
use xword_core::render::render_styled;
use xword_core::CrosswordEngine;

#[derive(Parser)]
#[command(
    name = "xword",
    version,
    about = "Fills a grid with crossing words and prints it with its clues"
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a raw dictionary and frequency list into a corpus file
    BuildCorpus(BuildCorpusArgs),
    /// Generate one puzzle from a corpus file
    Generate(GenerateArgs),
}

#[derive(Args)]
struct BuildCorpusArgs {
    /// Gutenberg Webster dictionary text
    #[arg(long)]
    dictionary: PathBuf,
    /// Word frequency list, one `word<TAB>count` per line
    #[arg(long)]
    frequency: PathBuf,
    #[arg(long, default_value = "corpus.bin")]
    out: PathBuf,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long, default_value = "corpus.bin")]
    corpus: PathBuf,
    /// JSON puzzle config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// right,down,left,up
    #[arg(long, value_delimiter = ',')]
    weights: Option<Vec<f64>>,
    /// Draw word ranks uniformly instead of from the gamma distribution
    #[arg(long)]
    uniform: bool,
    #[arg(long)]
    min_len: Option<usize>,
    /// Only use words matching this regex
    #[arg(long)]
    starts_with: Option<String>,
    #[arg(long)]
    shuffle: bool,
    /// Allow words shorter than the room available at their anchor
    #[arg(long)]
    fit: bool,
    /// Print the answer after each clue
    #[arg(long)]
    answers: bool,
}

impl GenerateArgs {
    fn puzzle_config(&self) -> Result<PuzzleConfig> {
        let mut config = match &self.config {
            Some(path) => PuzzleConfig::from_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => PuzzleConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(weights) = &self.weights {
            let Ok(weights) = <[f64; 4]>::try_from(weights.as_slice()) else {
                bail!("--weights takes exactly four values, got {}", weights.len());
            };
            config.direction_weights = DirectionWeights::from(weights);
        }
        if self.uniform {
            config.distribution = WordDistribution::Uniform;
        }
        if let Some(min_len) = self.min_len {
            config.min_word_len = min_len;
        }
        if self.starts_with.is_some() {
            config.starts_with = self.starts_with.clone();
        }
        config.shuffle |= self.shuffle;
        if self.fit {
            config.length_policy = LengthPolicy::Fit;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::BuildCorpus(args) => build_corpus(&args),
        Command::Generate(args) => generate(&args),
    }
}

fn build_corpus(args: &BuildCorpusArgs) -> Result<()> {
    let dictionary = std::fs::read_to_string(&args.dictionary)
        .with_context(|| format!("reading dictionary {}", args.dictionary.display()))?;
    let frequency = std::fs::read_to_string(&args.frequency)
        .with_context(|| format!("reading frequency list {}", args.frequency.display()))?;

    let corpus = Corpus::from_sources(&dictionary, &frequency);
    save_corpus(&corpus, &args.out)
        .with_context(|| format!("writing corpus {}", args.out.display()))?;
    Ok(())
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let config = args.puzzle_config()?;
    let mut corpus = load_corpus(&args.corpus)
        .with_context(|| format!("loading corpus {}", args.corpus.display()))?;

    corpus.retain_min_length(config.min_word_len);
    if let Some(re) = config.word_filter()? {
        corpus.retain_matching(&re);
    }
    if config.shuffle {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        corpus.shuffle(&mut rng);
    }
    info!(
        words = corpus.len(),
        width = config.width,
        height = config.height,
        "filling grid"
    );

    let rng = config.random_source()?;
    let weights = config.direction_weights;
    let mut engine = CrosswordEngine::new(config.width, config.height, corpus, rng, weights)
        .with_length_policy(config.length_policy);
    engine.fill();

    render_styled(engine.grid(), &mut stdout().lock(), args.answers)?;
    Ok(())
}
