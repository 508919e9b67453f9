use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Translate selected text with DeepL, in whichever direction it needs")]
pub struct Args {
    /// Settings profile to use
    #[arg(short, long, global = true, default_value = "main")]
    pub profile: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate TEXT, or the current selection / clipboard when omitted
    Translate {
        text: Option<String>,

        /// Print only, never copy the result to the clipboard
        #[arg(long)]
        no_copy: bool,
    },

    /// Make LANG the current secondary language
    Select {
        #[arg(value_name = "LANG")]
        language: String,
    },

    /// List supported languages
    Languages,

    /// Show or change the profile's language and clipboard settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage the API key stored in the system keyring
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

impl Command {
    /// Whether the command reads or writes the stored API key
    pub fn needs_credential(&self) -> bool {
        matches!(self, Command::Translate { .. } | Command::Key { .. })
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current settings
    Show,

    /// Set the main language, the one foreign text is translated into
    Main {
        #[arg(value_name = "LANG")]
        language: String,
    },

    /// Set the secondary languages, up to three
    Languages {
        #[arg(value_name = "LANG", required = true, num_args = 1..=3)]
        languages: Vec<String>,
    },

    /// Choose which results are copied to the clipboard
    AutoCopy {
        /// Copy results translated into the main language
        #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
        main: Option<bool>,

        /// Copy results translated into a secondary language
        #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
        secondary: Option<bool>,
    },
}

#[derive(Subcommand)]
pub enum KeyAction {
    /// Store a new API key
    Set { key: String },
    /// Remove the stored API key
    Clear,
    /// Show whether an API key is stored
    Status,
}
