use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vaani::voice::{samples_to_wav, AudioCapture, AudioPlayback, Synthesizer, SAMPLE_RATE};
use vaani::{lang, Config, Lang, Pipeline};

/// Vaani - bilingual English/Hindi voice assistant
#[derive(Parser)]
#[command(name = "vaani", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Listen window in seconds
    #[arg(long, env = "VAANI_LISTEN_SECS")]
    listen_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Keep listening and answering until interrupted
    Loop,
    /// Answer typed text instead of listening to the microphone
    Ask {
        /// The question or remark to answer
        text: String,
    },
    /// Print the detected language for a piece of text
    Detect {
        /// Text to classify
        text: String,
    },
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Test speaker output
    TestSpeaker,
    /// Test speech synthesis output
    TestTts {
        /// Text to speak
        #[arg(default_value = "Hello! This is a test of the text to speech system.")]
        text: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,vaani=info",
        1 => "info,vaani=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    // Offline commands that need no credentials
    match &cli.command {
        Some(Command::Detect { text }) => {
            cmd_detect(text);
            return Ok(());
        }
        Some(Command::TestMic { duration }) => return test_mic(*duration).await,
        Some(Command::TestSpeaker) => return test_speaker().await,
        Some(Command::TestTts { text }) => return test_tts(text).await,
        _ => {}
    }

    // Missing credential is fatal before any pipeline run
    let mut config = Config::from_env()?;
    if let Some(secs) = cli.listen_secs {
        config.listen_secs = secs;
    }

    let pipeline = Pipeline::from_config(&config)?;
    let mut playback = AudioPlayback::new()?;

    match cli.command {
        Some(Command::Ask { text }) => {
            let language = lang::classify(&text);
            tracing::info!(%language, "answering typed input");
            pipeline.respond(&text, language, &mut playback).await?;
        }
        Some(Command::Loop) => loop {
            if let Err(e) = listen_once(&pipeline, &config, &mut playback).await {
                // A failed run must not take down the loop; the next
                // utterance starts fresh
                tracing::warn!(error = %e, "utterance run failed");
            }
        },
        _ => listen_once(&pipeline, &config, &mut playback).await?,
    }

    Ok(())
}

/// Capture one utterance and run it through the pipeline
#[allow(clippy::future_not_send)]
async fn listen_once(
    pipeline: &Pipeline,
    config: &Config,
    playback: &mut AudioPlayback,
) -> anyhow::Result<()> {
    let mut capture = AudioCapture::new()?;

    println!("Say something! (listening for {}s)", config.listen_secs);
    let samples = capture
        .record_for(Duration::from_secs(config.listen_secs))
        .await?;
    println!("Processing speech...");

    let wav = samples_to_wav(&samples, SAMPLE_RATE)?;
    pipeline.run_audio(&wav, playback).await?;

    Ok(())
}

/// Print the disambiguated language for text
fn cmd_detect(text: &str) {
    let language = lang::classify(text);
    let indicators = lang::count_indicators(text);
    let devanagari = lang::contains_devanagari(text);

    println!("Language:   {} ({})", language.display_name(), language);
    println!("Indicators: {indicators}");
    println!("Devanagari: {devanagari}");
}

/// Test microphone input
#[allow(clippy::future_not_send)]
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let mut capture = AudioCapture::new()?;
    capture.start()?;

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.peek_buffer();
        let energy = calculate_rms(&samples);
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (energy * 100.0).min(50.0) as usize;
        let meter: String = "█".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!(
            "[{:2}s] RMS: {:.4} | Peak: {:.4} | [{}]",
            i + 1,
            energy,
            peak,
            meter
        );

        capture.clear_buffer();
    }

    capture.stop();

    println!("\n---");
    println!("If you saw movement in the meter, your mic is working!");

    Ok(())
}

/// Calculate RMS energy
#[allow(clippy::cast_precision_loss)]
fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Test speaker output with a sine wave
async fn test_speaker() -> anyhow::Result<()> {
    println!("Testing speaker output...");
    println!("You should hear a 440Hz tone for 2 seconds\n");

    let mut playback = AudioPlayback::new()?;

    let sample_rate = 24000_f32;
    let frequency = 440.0_f32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let num_samples = (sample_rate * 2.0) as usize;

    #[allow(clippy::cast_precision_loss)]
    let samples: Vec<f32> = (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate;
            (2.0 * std::f32::consts::PI * frequency * t).sin() * 0.3
        })
        .collect();

    playback.play(&samples).await?;

    println!("If you heard the tone, your speakers are working!");

    Ok(())
}

/// Test speech synthesis and playback
#[allow(clippy::future_not_send)]
async fn test_tts(text: &str) -> anyhow::Result<()> {
    println!("Testing TTS with text: \"{text}\"\n");

    let synthesizer = Synthesizer::new();
    let mp3_data = synthesizer.synthesize(text, Lang::En).await?;
    println!("Got {} bytes of audio data", mp3_data.len());

    println!("Playing audio...");
    let mut playback = AudioPlayback::new()?;
    playback.play_mp3(&mp3_data).await?;

    println!("If you heard the speech, TTS is working!");

    Ok(())
}
