use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use plmerge::{cli, config, error, merge::RecommendationPolicy};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Merge playlists into a new playlist
    Merge(MergeOptions),

    /// Show name and track count of playlists
    Inspect(InspectOptions),

    /// Run the local HTTP server with the merge endpoint
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct MergeOptions {
    /// Playlist URLs, URIs or ids (at least two)
    #[clap(required = true)]
    pub urls: Vec<String>,

    /// Merge mode: intersection or union
    #[clap(long, default_value = "intersection")]
    pub mode: String,

    /// When to add recommended tracks: never, intersection or always
    #[clap(long)]
    pub recommendations: Option<RecommendationPolicy>,
}

#[derive(Parser, Debug, Clone)]
pub struct InspectOptions {
    /// Playlist URLs, URIs or ids
    #[clap(required = true)]
    pub urls: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Merge(opt) => cli::merge(opt.urls, opt.mode, opt.recommendations).await,
        Command::Inspect(opt) => cli::inspect(opt.urls).await,
        Command::Serve => cli::serve().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
