use tabled::Table;

use crate::{
    Error,
    config::Config,
    error, info,
    pipeline::{self, ExportRequest},
    success, utils, warning,
};

pub async fn export(config: &Config, request: &ExportRequest, preview: bool) {
    match pipeline::run(config, request).await {
        Ok(summary) => {
            success!(
                "Exported {} songs ({} with audio features) to {}",
                summary.rows.len(),
                summary.rows_with_features(),
                summary.csv_path.display()
            );

            if summary.images_skipped > 0 {
                info!(
                    "{} cover images saved, {} skipped",
                    summary.images_saved, summary.images_skipped
                );
            }

            if preview && !summary.rows.is_empty() {
                let table = Table::new(utils::song_table_rows(&summary.rows));
                println!("{}", table);
            }
        }
        Err(Error::InvalidPlaylist(reason)) => {
            warning!("Invalid Playlist ID or Access Denied: {}", reason);
        }
        Err(e) => error!("Export failed. Err: {}", e),
    }
}
