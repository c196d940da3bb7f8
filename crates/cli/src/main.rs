//! Terminal front-end for the classroom assistant.

mod audio;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Command, HELP};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tutor_core::{
    Assistant, ChatCompletion, DeckSink, Language, PipelineOptions, Recorder, Role, Session,
    SlideOrder, SpeechToText, TextToSpeech, TurnOutcome, Utterance,
};
use tutor_pptx::DeckPublisher;
use tutor_remote::{GroqChat, GroqConfig, TranslateTts, WhisperTranscriber};

/// Multilingual classroom assistant: answers questions and builds slide decks.
#[derive(Parser, Debug)]
#[command(name = "tutor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory for generated presentations
    #[arg(short, long, env = "TUTOR_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Chat model used for classification, generation and answers
    #[arg(short, long, env = "TUTOR_MODEL", default_value = tutor_remote::config::DEFAULT_CHAT_MODEL)]
    model: String,

    /// Conversation language (English, Hindi, Bengali, Tamil, ...)
    #[arg(short, long, env = "TUTOR_LANGUAGE", default_value = "English", value_parser = parse_language)]
    language: Language,

    /// Use the conversation language for typed lines instead of asking the model
    #[arg(long)]
    no_detect_language: bool,

    /// Speak every reply and print the audio file path
    #[arg(short, long)]
    speak: bool,

    /// Reject outlines whose slide types are out of the canonical order
    #[arg(long)]
    strict_slide_order: bool,

    /// How long a voice turn listens, in seconds
    #[arg(long, default_value = "5")]
    record_seconds: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_language(name: &str) -> std::result::Result<Language, String> {
    Language::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Language::ALL.iter().map(|l| l.name()).collect();
        format!("unknown language '{}' (expected one of: {})", name, known.join(", "))
    })
}

/// Everything the loop needs besides the session.
struct Frontend<C, D> {
    assistant: Assistant<C, D>,
    recognizer: WhisperTranscriber,
    speaker: Option<TranslateTts>,
    window: Duration,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = GroqConfig::from_env()
        .context("Groq API key not found; set GROQ_API_KEY or add it to .env")?
        .with_chat_model(args.model.as_str());
    let chat = GroqChat::new(config.clone()).context("Failed to create chat client")?;
    log::debug!(
        "Model {}, language {}, decks in {}",
        chat.model(),
        args.language,
        args.output_dir.display()
    );
    let recognizer = WhisperTranscriber::new(config).context("Failed to create transcription client")?;
    let speaker = if args.speak {
        Some(TranslateTts::new().context("Failed to create speech client")?)
    } else {
        None
    };

    let options = PipelineOptions {
        slide_order: if args.strict_slide_order {
            SlideOrder::Strict
        } else {
            SlideOrder::Lenient
        },
        detect_language: !args.no_detect_language,
    };
    let frontend = Frontend {
        assistant: Assistant::new(chat, DeckPublisher::new(&args.output_dir), options),
        recognizer,
        speaker,
        window: Duration::from_secs(args.record_seconds.max(1)),
    };

    let mut session = Session::new(args.language);
    println!("Classroom assistant ({}). Type /help for commands.", args.language.native_name());

    run(&frontend, &mut session)
}

fn run<C: ChatCompletion, D: DeckSink>(frontend: &Frontend<C, D>, session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let Some(command) = Command::parse(&line.context("Failed to read input")?) else {
            continue;
        };

        match command {
            Command::Say(text) => {
                let turn = frontend
                    .assistant
                    .handle_text_turn(session, Utterance::new(text));
                report_turn(frontend, turn);
            }
            Command::Voice(file) => {
                let recorder = match recorder_for(file) {
                    Ok(recorder) => recorder,
                    Err(message) => {
                        eprintln!("{}", message);
                        continue;
                    }
                };
                println!("Listening ({}s)...", frontend.window.as_secs());
                let turn = frontend.assistant.handle_voice_turn(
                    session,
                    recorder.as_ref(),
                    &frontend.recognizer as &dyn SpeechToText,
                    frontend.window,
                );
                if let Ok(outcome) = &turn {
                    println!("You said: {}", outcome.utterance);
                }
                report_turn(frontend, turn);
            }
            Command::Language(name) => match parse_language(&name) {
                Ok(language) => {
                    session.language = language;
                    println!("{}", language_banner(language));
                }
                Err(message) => eprintln!("{}", message),
            },
            Command::Save(path) => match save_last_reply(session, path) {
                Ok(path) => println!("Saved to {}", path.display()),
                Err(e) => eprintln!("{:#}", e),
            },
            Command::History => print_history(session),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Unknown(name) => eprintln!("Unknown command '/{}'. Type /help.", name),
        }
    }

    Ok(())
}

fn language_banner(language: Language) -> String {
    format!(
        "Language set to {} ({}, {})",
        language,
        language.native_name(),
        language.speech_locale()
    )
}

/// Print the reply (and deck details), then speak it if asked to.
///
/// Error replies go to stderr.
fn report_turn<C, D>(frontend: &Frontend<C, D>, turn: tutor_core::Result<TurnOutcome>) {
    let outcome = match turn {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    if outcome.is_error {
        eprintln!("{}", outcome.reply);
    } else {
        println!("{}", outcome.reply);
    }
    if let Some(deck) = &outcome.deck {
        print!("{}", deck.outline);
        println!("Saved to {}", deck.path.display());
    }

    if let Some(speaker) = &frontend.speaker {
        match speaker.synthesize(&outcome.reply, outcome.language) {
            Ok(path) => println!("Audio: {}", path.display()),
            Err(e) => eprintln!("{}", e),
        }
    }
}

fn recorder_for(file: Option<PathBuf>) -> std::result::Result<Box<dyn Recorder>, String> {
    match file {
        Some(path) => Ok(Box::new(audio::WavFileRecorder::new(path))),
        None => microphone(),
    }
}

#[cfg(feature = "microphone")]
fn microphone() -> std::result::Result<Box<dyn Recorder>, String> {
    Ok(Box::new(audio::MicRecorder::new()))
}

#[cfg(not(feature = "microphone"))]
fn microphone() -> std::result::Result<Box<dyn Recorder>, String> {
    Err("Built without microphone support; use /voice <file.wav>".to_string())
}

/// Default file name for a saved reply.
fn reply_file_name(language: Language) -> String {
    format!("ai_response_{}.txt", language.name().to_lowercase())
}

fn save_last_reply(session: &Session, path: Option<PathBuf>) -> Result<PathBuf> {
    let reply = session
        .last_reply()
        .context("Nothing to save yet")?;
    let language = reply.language.unwrap_or(session.language);
    let path = path.unwrap_or_else(|| PathBuf::from(reply_file_name(language)));
    write_output(&path, &reply.content)?;
    Ok(path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write to {}", path.display()))
}

fn print_history(session: &Session) {
    if session.history.is_empty() {
        println!("(no messages yet)");
        return;
    }
    for message in &session.history {
        let who = match message.role {
            Role::User => "You",
            Role::Assistant => "Assistant",
            Role::System => "System",
        };
        println!("{}: {}", who, message.content);
    }
}
