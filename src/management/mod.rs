mod image;
mod song_table;

pub use image::DownloadOutcome;
pub use image::ImageStore;
pub use song_table::SongTableManager;
