use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use huenote_core::VERSION;

/// Huenote - encrypted notes unlocked by a passphrase and three colors
#[derive(Parser)]
#[command(name = "huenote")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the note store
    #[arg(short, long, global = true, env = "HUENOTE_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Default algorithm for new notes (aes-gcm, rsa-oaep, ecc)
    #[arg(long)]
    pub algorithm: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `write` command
#[derive(Args)]
pub struct WriteArgs {
    /// Note title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Note body (overrides stdin/prompt)
    #[arg(long)]
    pub body: Option<String>,

    /// Encryption algorithm (aes-gcm, rsa-oaep, ecc)
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Color sequence, comma separated (e.g. "red,lime,blue")
    #[arg(long, value_name = "C1,C2,C3")]
    pub colors: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive title search
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by algorithm
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Color sequence, comma separated
    #[arg(long, value_name = "C1,C2,C3")]
    pub colors: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// New note body (overrides stdin/prompt)
    #[arg(long)]
    pub body: Option<String>,

    /// Color sequence, comma separated
    #[arg(long, value_name = "C1,C2,C3")]
    pub colors: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Destination path
    #[arg(value_name = "DEST")]
    pub destination: String,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// Archive produced by `huenote export`
    #[arg(value_name = "SRC")]
    pub source: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the config file and create the note store
    Init(InitArgs),

    /// Encrypt and save a new note
    Write(WriteArgs),

    /// List notes (titles only, nothing is decrypted)
    List(ListArgs),

    /// Decrypt and show a note
    Show(ShowArgs),

    /// Replace a note's body, keeping its secret and algorithm
    Edit(EditArgs),

    /// Delete a note and its stored key
    Delete(DeleteArgs),

    /// Export all notes to a JSON archive
    Export(ExportArgs),

    /// Import notes from a JSON archive
    Import(ImportArgs),

    /// Show the color palette
    Palette,

    /// Check store integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
