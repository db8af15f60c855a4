//! Catalog of alert sounds offered to clients.
//!
//! The list is the built-in sounds followed by whatever audio files sit in
//! the sounds directory, sorted by file name. It is rebuilt on every call so
//! files dropped into the directory show up for the next client without a
//! restart.

use crate::protocol::SoundOption;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extensions treated as audio.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "oga", "m4a", "aac", "flac", "webm"];

/// Sounds every client can play without fetching anything.
const BUILTIN_SOUNDS: &[(&str, &str)] = &[
    ("Beep", "builtin:beep"),
    ("Bell", "builtin:bell"),
    ("Chime", "builtin:chime"),
    ("Digital", "builtin:digital"),
];

#[derive(Debug, Clone)]
pub struct SoundCatalog {
    builtin: Vec<SoundOption>,
    dir: Option<PathBuf>,
    /// URL path the sounds directory is served under, without trailing slash.
    url_prefix: String,
}

impl SoundCatalog {
    pub fn new(builtin: Vec<SoundOption>, dir: Option<PathBuf>, url_prefix: &str) -> Self {
        Self {
            builtin,
            dir,
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Built-in sounds plus the audio files in `dir`, served under `url_prefix`.
    pub fn with_builtin(dir: impl Into<PathBuf>, url_prefix: &str) -> Self {
        let builtin = BUILTIN_SOUNDS
            .iter()
            .map(|(name, url)| SoundOption::new(*name, *url))
            .collect();
        Self::new(builtin, Some(dir.into()), url_prefix)
    }

    /// Current list: built-ins first, then scanned files by name.
    ///
    /// A missing or unreadable directory yields just the built-ins.
    pub fn list(&self) -> Vec<SoundOption> {
        let mut sounds = self.builtin.clone();
        if let Some(dir) = &self.dir {
            sounds.extend(self.scan(dir));
        }
        sounds
    }

    fn scan(&self, dir: &Path) -> Vec<SoundOption> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Sounds directory not readable");
                return Vec::new();
            }
        };

        let mut files: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_audio_file(name))
            .collect();
        files.sort();

        files
            .into_iter()
            .map(|file| {
                let name = Path::new(&file)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(&file)
                    .to_string();
                let url = format!("{}/{}", self.url_prefix, urlencoding::encode(&file));
                SoundOption { name, url }
            })
            .collect()
    }
}

fn is_audio_file(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
