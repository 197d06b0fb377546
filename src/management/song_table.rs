use std::{
    io::Write,
    path::{Path, PathBuf},
};

use csv::WriterBuilder;

use crate::{
    Res,
    types::{AudioFeatures, Playlist, SONG_COLUMNS, SongRow, Track},
    utils,
};

/// The exported table of one playlist: one [`SongRow`] per track, in
/// playlist order.
pub struct SongTableManager {
    playlist_id: String,
    rows: Vec<SongRow>,
}

impl SongTableManager {
    /// Joins the playlist's tracks with their audio features by position.
    ///
    /// `features` is aligned with `playlist.tracks` (see
    /// [`Playlist::align_features`]). Tracks without an id get a blank ID cell.
    ///
    /// Row `i` takes its feature columns from `features[i]` only. A `None`
    /// entry, or a missing entry when `features` is shorter than the track
    /// list, leaves that row's feature columns blank. Surplus entries are
    /// ignored.
    pub fn build(playlist: &Playlist, features: &[Option<AudioFeatures>]) -> Self {
        let rows = playlist
            .tracks
            .iter()
            .enumerate()
            .map(|(i, track)| song_row(track, features.get(i).copied().flatten()))
            .collect();

        Self {
            playlist_id: playlist.id.clone(),
            rows,
        }
    }

    pub fn rows(&self) -> &[SongRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SongRow> {
        self.rows
    }

    pub fn count_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn file_name(&self) -> String {
        utils::csv_file_name(&self.playlist_id)
    }

    /// Writes the header row followed by one record per song.
    pub fn write_to<W: Write>(&self, writer: W) -> Res<()> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(SONG_COLUMNS)?;
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Writes the table to `<output_dir>/<playlist_id>_songs.csv`, replacing
    /// any previous export of the same playlist.
    pub async fn persist(&self, output_dir: &Path) -> Res<PathBuf> {
        async_fs::create_dir_all(output_dir).await?;

        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;

        let path = output_dir.join(self.file_name());
        async_fs::write(&path, buffer).await?;
        Ok(path)
    }
}

fn song_row(track: &Track, features: Option<AudioFeatures>) -> SongRow {
    SongRow {
        id: track.id.clone().unwrap_or_default(),
        name: track.name.clone(),
        artist: utils::join_artists(&track.artists),
        cover_url: track.cover_url.clone(),
        danceability: features.map(|f| f.danceability),
        energy: features.map(|f| f.energy),
        loudness: features.map(|f| f.loudness),
        speechiness: features.map(|f| f.speechiness),
        acousticness: features.map(|f| f.acousticness),
        instrumentalness: features.map(|f| f.instrumentalness),
        liveness: features.map(|f| f.liveness),
        valence: features.map(|f| f.valence),
        tempo: features.map(|f| f.tempo),
    }
}
