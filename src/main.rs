use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use refalign::io::format_time;
use refalign::{
    align, current_segment_ref, parse_refs, parse_transcription_file, ref_timeline,
    AlignConfig, AlignmentOutput, SefariaClient, SefariaConfig, SoferClient, SoferConfig,
    Transcription,
};

#[derive(Parser)]
#[command(name = "refalign")]
#[command(author, version, about = "Align spoken transcripts to canonical text segments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align a transcription against the segments of one or more references
    Align {
        /// Transcription JSON file
        #[arg(short, long, conflicts_with = "uid", required_unless_present = "uid")]
        input: Option<PathBuf>,

        /// Fetch the transcription by id instead (needs SOFER_API_TOKEN)
        #[arg(long)]
        uid: Option<String>,

        /// References to align against, comma or newline separated
        #[arg(short, long, required = true)]
        refs: Vec<String>,

        /// Output file for the alignment (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for the human-readable ref timeline (text)
        #[arg(long)]
        timeline: Option<PathBuf>,

        /// Minimum normalized word length used for anchoring
        #[arg(long, default_value = "4")]
        min_token_len: usize,

        /// Segments around the expected next one the assigner may pick
        #[arg(long, default_value = "1")]
        wiggle_range: usize,

        /// Largest forward segment jump accepted by the final check
        #[arg(long, default_value = "5")]
        max_jump: usize,

        /// Language tag marking alignable words
        #[arg(long, default_value = "he")]
        language: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show which segment is being read at a point in the recording
    Locate {
        /// Alignment output file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Playback position in seconds
        #[arg(long)]
        at: f64,
    },

    /// Summarize a transcription without aligning it
    Inspect {
        /// Transcription JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Language tag marking alignable words
        #[arg(long, default_value = "he")]
        language: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Align {
            input,
            uid,
            refs,
            output,
            timeline,
            min_token_len,
            wiggle_range,
            max_jump,
            language,
            verbose,
        } => {
            setup_logging(verbose);
            let config = AlignConfig {
                min_token_len,
                wiggle_range,
                max_allowed_jump: max_jump,
                target_language: language,
            };
            align_transcription(input, uid, refs, output, timeline, config).await
        }
        Commands::Locate { input, at } => {
            setup_logging(false);
            locate(input, at)
        }
        Commands::Inspect { input, language } => {
            setup_logging(false);
            inspect(input, &language)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn load_transcription(
    input: Option<PathBuf>,
    uid: Option<String>,
) -> Result<Transcription> {
    match (input, uid) {
        (Some(path), _) => {
            info!("Loading transcription from {:?}", path);
            parse_transcription_file(&path).context("Failed to parse input transcription")
        }
        (None, Some(uid)) => {
            info!("Fetching transcription {}", uid);
            let client = SoferClient::new(SoferConfig::from_env()?);
            client.fetch_transcription(&uid).await
        }
        (None, None) => anyhow::bail!("Either --input or --uid is required"),
    }
}

async fn align_transcription(
    input: Option<PathBuf>,
    uid: Option<String>,
    refs: Vec<String>,
    output: PathBuf,
    timeline: Option<PathBuf>,
    config: AlignConfig,
) -> Result<()> {
    let transcription = load_transcription(input, uid).await?;
    let references: Vec<String> = refs.iter().flat_map(|r| parse_refs(r)).collect();
    if references.is_empty() {
        anyhow::bail!("No references given");
    }

    info!(
        "Loaded {} entries ({} tagged '{}'), aligning against {} references",
        transcription.timestamps.len(),
        transcription.count_language(&config.target_language),
        config.target_language,
        references.len()
    );

    let source = SefariaClient::new(SefariaConfig::from_env());
    let result = align(&source, &references, &transcription.timestamps, &config)
        .await
        .context("Alignment failed")?;

    let stats = result.stats.clone();
    let document = AlignmentOutput::from_result(&references, result);

    document.write_json(&output)?;
    info!("Output written to {:?}", output);

    if let Some(path) = timeline {
        document.write_timeline(&path)?;
        info!("Timeline written to {:?}", path);
    }

    let aligned_pct = if stats.total_entries > 0 {
        stats.aligned_entries as f64 / stats.total_entries as f64 * 100.0
    } else {
        0.0
    };

    info!(
        "Complete: {} anchors, {} out-of-order removed, {} rejected, {} entries aligned ({:.1}%)",
        stats.anchors,
        stats.removed_out_of_order,
        stats.rejected_non_monotone,
        stats.aligned_entries,
        aligned_pct
    );

    Ok(())
}

fn locate(input: PathBuf, at: f64) -> Result<()> {
    let document = AlignmentOutput::read_json(&input)?;

    match current_segment_ref(&document.aligned, at) {
        Some(segment_ref) => println!("{} {}", format_time(at), segment_ref),
        None => println!("{} No segment yet", format_time(at)),
    }

    Ok(())
}

fn inspect(input: PathBuf, language: &str) -> Result<()> {
    info!("Inspecting transcription from {:?}", input);
    let transcription =
        parse_transcription_file(&input).context("Failed to parse input transcription")?;
    let meta = transcription.info.clone().unwrap_or_default();

    println!("Transcription");
    println!("=============");
    println!("Title: {}", meta.title.as_deref().unwrap_or("-"));
    println!(
        "Duration: {}",
        meta.duration
            .or(transcription.last_start())
            .map(format_time)
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "Language: {}",
        meta.primary_language.as_deref().unwrap_or("-")
    );
    println!(
        "Speakers: {}",
        meta.num_speakers
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!();

    let total = transcription.timestamps.len();
    let tagged = transcription.count_language(language);
    let with_ref = transcription
        .timestamps
        .iter()
        .filter(|t| t.has_segment_ref())
        .count();

    println!("Words");
    println!("-----");
    println!("Total entries: {}", total);
    println!("Tagged '{}': {}", language, tagged);
    println!("Already aligned: {}", with_ref);

    let rows = ref_timeline(&transcription.timestamps);
    if !rows.is_empty() {
        println!();
        println!("Existing refs");
        println!("-------------");
        for row in rows {
            println!("{:>6}  {}", format_time(row.start), row.segment_ref);
        }
    }

    Ok(())
}
