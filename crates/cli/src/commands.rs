//! Parsing of input lines into front-end commands.

use std::path::PathBuf;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text, handled as a turn.
    Say(String),
    /// `/voice [file.wav]`
    Voice(Option<PathBuf>),
    /// `/lang <name>`
    Language(String),
    /// `/save [file]`
    Save(Option<PathBuf>),
    /// `/history`
    History,
    /// `/help`
    Help,
    /// `/quit` or `/exit`
    Quit,
    /// A slash command we don't know.
    Unknown(String),
}

pub const HELP: &str = "\
Type a question, or ask for slides (\"create a ppt about volcanoes\").
  /voice [file.wav]  speak a turn (microphone, or a WAV file)
  /lang <name>       switch language (English, Hindi, Tamil, ...)
  /save [file]       save the last reply as text
  /history           show the conversation
  /quit              leave";

impl Command {
    /// Parse a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Some(Self::Say(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (rest, None),
        };

        let command = match name.to_lowercase().as_str() {
            "voice" => Self::Voice(arg.map(PathBuf::from)),
            "lang" | "language" => Self::Language(arg.unwrap_or_default().to_string()),
            "save" => Self::Save(arg.map(PathBuf::from)),
            "history" => Self::History,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(
            Command::parse("  what is gravity? "),
            Some(Command::Say("what is gravity?".into()))
        );
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn test_voice_with_and_without_file() {
        assert_eq!(Command::parse("/voice"), Some(Command::Voice(None)));
        assert_eq!(
            Command::parse("/voice  clip.wav"),
            Some(Command::Voice(Some(PathBuf::from("clip.wav"))))
        );
    }

    #[test]
    fn test_lang_and_save() {
        assert_eq!(
            Command::parse("/lang Hindi"),
            Some(Command::Language("Hindi".into()))
        );
        assert_eq!(Command::parse("/lang"), Some(Command::Language(String::new())));
        assert_eq!(Command::parse("/save"), Some(Command::Save(None)));
        assert_eq!(
            Command::parse("/save notes.txt"),
            Some(Command::Save(Some(PathBuf::from("notes.txt"))))
        );
    }

    #[test]
    fn test_other_commands() {
        assert_eq!(Command::parse("/QUIT"), Some(Command::Quit));
        assert_eq!(Command::parse("/exit"), Some(Command::Quit));
        assert_eq!(Command::parse("/history"), Some(Command::History));
        assert_eq!(Command::parse("/dance"), Some(Command::Unknown("dance".into())));
    }
}
