use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use songdata::{
    cli, config, error,
    pipeline::{DEFAULT_IMAGE_DIR, ExportRequest},
    utils,
};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Export playlist tracks and audio features to CSV
    Export(ExportOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Playlist id, spotify:playlist: URI or open.spotify.com URL
    #[clap(default_value = utils::DEFAULT_PLAYLIST_ID, value_parser = parse_playlist)]
    playlist: String,

    /// Directory for the {playlist_id}_songs.csv file
    #[clap(long, default_value = ".")]
    output_dir: PathBuf,

    /// Directory for downloaded cover images
    #[clap(long, default_value = DEFAULT_IMAGE_DIR)]
    image_dir: PathBuf,

    /// Do not download cover images
    #[clap(long)]
    skip_images: bool,

    /// Print the exported songs as a table
    #[clap(long)]
    preview: bool,

    /// Print token endpoint diagnostics (secrets redacted)
    #[clap(long, short)]
    verbose: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_playlist(value: &str) -> Result<String, String> {
    utils::parse_playlist_id(value)
        .ok_or_else(|| format!("'{}' is not a Spotify playlist id, URI or URL", value))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Export(opt) => {
            config::load_env();
            let config = match config::Config::from_env() {
                Ok(c) => c,
                Err(e) => error!("Cannot load configuration. Err: {}", e),
            };

            let request = ExportRequest {
                playlist_id: opt.playlist,
                output_dir: opt.output_dir,
                image_dir: opt.image_dir,
                download_images: !opt.skip_images,
                verbose: opt.verbose,
            };

            cli::export(&config, &request, opt.preview).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
