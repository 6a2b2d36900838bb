use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use coleccion::{cli, config, warning};

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
    /// Log in with your Spotify account
    Login,

    /// Forget the stored Spotify session
    Logout,

    /// Show the state of the stored session
    Status,

    /// Search for artists
    Search(SearchOptions),

    #[clap(about = "Create a playlist with your saved tracks of an artist")]
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Artist name to search for
    #[clap(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Artist name to search for
    #[clap(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Position of the artist in the search results (1 = best match)
    #[clap(long, default_value_t = 1)]
    pub pick: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Login => cli::login().await,
        Command::Logout => cli::logout().await,
        Command::Status => cli::status().await,
        Command::Search(opt) => cli::search(opt.query.join(" ")).await,
        Command::Playlist(opt) => cli::playlist(opt.query.join(" "), opt.pick).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
