//! # CLI Module
//!
//! User-facing command implementations. Commands report progress with the
//! crate's status macros and translate library errors into exit behavior:
//! an invalid playlist is reported and the command returns normally, any
//! other failure terminates with exit code 1.
//!
//! ## Usage
//!
//! ```bash
//! songdata export                                   # default playlist
//! songdata export 37i9dQZF1DXcBWIGoYBM5M --preview  # bare id, show table
//! songdata export https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! songdata export spotify:playlist:37i9dQZF1DXcBWIGoYBM5M --skip-images
//! ```

mod export;

pub use export::export;
