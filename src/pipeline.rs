//! The export run.
//!
//! A strictly linear sequence: acquire a token, fetch the playlist, download
//! cover images, fetch audio features, then build and write the song table.
//! Only authentication failures and an invalid playlist stop the run; every
//! per-track problem is reported and skipped.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    Error, Res,
    config::Config,
    info,
    management::{DownloadOutcome, ImageStore, SongTableManager},
    spotify, success,
    types::{AccessToken, AudioFeatures, Playlist, SongRow},
    utils, warning,
};

pub const DEFAULT_IMAGE_DIR: &str = "track_images";

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub playlist_id: String,
    /// Directory receiving `{playlist_id}_songs.csv`.
    pub output_dir: PathBuf,
    pub image_dir: PathBuf,
    pub download_images: bool,
    pub verbose: bool,
}

impl ExportRequest {
    pub fn new(playlist_id: impl Into<String>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            output_dir: PathBuf::from("."),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            download_images: true,
            verbose: false,
        }
    }
}

/// The audio-features endpoint answered with a different number of entries
/// than ids were requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCountMismatch {
    pub requested: usize,
    pub returned: usize,
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub playlist_name: Option<String>,
    pub csv_path: PathBuf,
    pub rows: Vec<SongRow>,
    pub images_saved: usize,
    pub images_skipped: usize,
    /// Set when the positional join ran on arrays of different lengths.
    pub feature_mismatch: Option<FeatureCountMismatch>,
}

impl ExportSummary {
    pub fn rows_with_features(&self) -> usize {
        self.rows.iter().filter(|row| row.has_features()).count()
    }
}

/// Runs one export of `request.playlist_id`.
///
/// # Errors
///
/// - [`crate::Error::Auth`] if no token could be obtained; nothing is written
/// - [`crate::Error::InvalidPlaylist`] if the playlist id is not a Spotify id
///   (checked before any request), or the playlist is unknown or not
///   accessible; nothing is written, not even the image directory
/// - I/O and CSV errors while writing the table
pub async fn run(config: &Config, request: &ExportRequest) -> Res<ExportSummary> {
    if !utils::is_spotify_id(&request.playlist_id) {
        return Err(Error::InvalidPlaylist(format!(
            "'{}' is not a Spotify playlist id",
            request.playlist_id
        )));
    }

    let client = spotify::http_client(config)?;

    info!("Requesting access token");
    let token = spotify::auth::acquire_token(&client, config, request.verbose).await?;

    info!("Fetching playlist {}", request.playlist_id);
    let playlist =
        spotify::playlist::get_playlist(&client, config, &request.playlist_id, &token).await?;
    success!(
        "Playlist {} has {} tracks",
        playlist.name.as_deref().unwrap_or(&playlist.id),
        playlist.tracks.len()
    );

    let (images_saved, images_skipped) = if request.download_images {
        let store = ImageStore::new(&request.image_dir);
        store.ensure_dir().await?;
        download_covers(&client, &store, &playlist).await
    } else {
        (0, 0)
    };

    info!("Fetching audio features");
    let (features, feature_mismatch) = fetch_features(&client, config, &playlist, &token).await;

    let table = SongTableManager::build(&playlist, &features);
    let csv_path = table.persist(&request.output_dir).await?;

    Ok(ExportSummary {
        playlist_name: playlist.name,
        csv_path,
        rows: table.into_rows(),
        images_saved,
        images_skipped,
        feature_mismatch,
    })
}

/// Downloads one cover per track. Returns `(saved, skipped)`.
async fn download_covers(client: &Client, store: &ImageStore, playlist: &Playlist) -> (usize, usize) {
    let pb = ProgressBar::new(playlist.tracks.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb.set_message("Downloading cover images...");

    let mut saved = 0;
    let mut skipped = 0;

    for track in &playlist.tracks {
        let file_name = track.id.as_deref().and_then(utils::image_file_name);
        let outcome = match (file_name, &track.cover_url) {
            (Some(file_name), Some(url)) => store.download(client, url, &file_name).await,
            (None, _) => DownloadOutcome::Skipped {
                reason: "track has no Spotify id".to_string(),
            },
            (_, None) => DownloadOutcome::Skipped {
                reason: "album has no images".to_string(),
            },
        };

        match outcome {
            DownloadOutcome::Saved(_) => saved += 1,
            DownloadOutcome::Skipped { reason } => {
                skipped += 1;
                let label = track.id.as_deref().unwrap_or(&track.name);
                pb.suspend(|| warning!("Skipped cover image for {}: {}", label, reason));
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    success!(
        "Saved {} cover images to {}",
        saved,
        store.dir().display()
    );
    (saved, skipped)
}

/// Fetches audio features for every track, aligned by position.
///
/// Only tracks with a Spotify id are requested; local files and removed
/// tracks get `None` without shifting the others. A failed request degrades
/// to "no features" for every track so the table is still written.
async fn fetch_features(
    client: &Client,
    config: &Config,
    playlist: &Playlist,
    token: &AccessToken,
) -> (Vec<Option<AudioFeatures>>, Option<FeatureCountMismatch>) {
    let ids = playlist.feature_ids();

    let fetched = match spotify::features::get_audio_features(client, config, &ids, token).await {
        Ok(features) => features,
        Err(e) => {
            warning!("Failed to fetch audio features, exporting without them: {}", e);
            return (vec![None; playlist.tracks.len()], None);
        }
    };

    let mismatch = (fetched.len() != ids.len()).then(|| FeatureCountMismatch {
        requested: ids.len(),
        returned: fetched.len(),
    });
    if let Some(m) = mismatch {
        warning!(
            "Audio features count ({}) does not match requested ids ({}); rows are joined by position",
            m.returned,
            m.requested
        );
    }

    let features = playlist.align_features(fetched);

    let missing = features.iter().filter(|f| f.is_none()).count();
    if missing > 0 {
        info!("{} tracks have no audio features", missing);
    }

    (features, mismatch)
}
