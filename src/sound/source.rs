//! Sound source selection.
//!
//! Phase-transition cues come from the system sound theme when one exists
//! and fall back to a short click compiled into the binary otherwise, so
//! the cue works on a machine with no sound packages installed.

use std::path::PathBuf;

use super::error::SoundError;

/// Directories to search for system sounds, in order of priority.
const SYSTEM_SOUND_DIRS: &[&str] = &[
    "/usr/share/sounds/freedesktop/stereo",
    "/usr/share/sounds",
    "/System/Library/Sounds",
];

/// Audio file extensions the decoder handles.
const SUPPORTED_EXTENSIONS: &[&str] = &["oga", "ogg", "wav", "aiff", "flac", "mp3"];

/// Sound names to prefer for the transition cue, in order.
const DEFAULT_CUE_NAMES: &[&str] = &["complete", "bell", "message", "Glass", "Ping"];

/// A short 8 kHz mono PCM click, the cue of last resort.
///
/// Layout: RIFF/WAVE header, fmt chunk (16-bit PCM, mono, 8000 Hz), then
/// sixteen alternating full-swing samples.
const EMBEDDED_CLICK: &[u8] = &[
    // RIFF header
    0x52, 0x49, 0x46, 0x46, // "RIFF"
    0x44, 0x00, 0x00, 0x00, // remaining file size (68 bytes)
    0x57, 0x41, 0x56, 0x45, // "WAVE"
    // fmt chunk
    0x66, 0x6D, 0x74, 0x20, // "fmt "
    0x10, 0x00, 0x00, 0x00, // chunk size (16 bytes)
    0x01, 0x00, // audio format (1 = PCM)
    0x01, 0x00, // channels (mono)
    0x40, 0x1F, 0x00, 0x00, // sample rate (8000 Hz)
    0x80, 0x3E, 0x00, 0x00, // byte rate (16000)
    0x02, 0x00, // block align
    0x10, 0x00, // bits per sample
    // data chunk
    0x64, 0x61, 0x74, 0x61, // "data"
    0x20, 0x00, 0x00, 0x00, // data size (32 bytes)
    0x30, 0x75, 0xD0, 0x8A, 0x30, 0x75, 0xD0, 0x8A, // +30000/-30000 square
    0x30, 0x75, 0xD0, 0x8A, 0x30, 0x75, 0xD0, 0x8A,
    0x30, 0x75, 0xD0, 0x8A, 0x30, 0x75, 0xD0, 0x8A,
    0x30, 0x75, 0xD0, 0x8A, 0x30, 0x75, 0xD0, 0x8A,
];

/// Returns the embedded fallback cue.
#[must_use]
pub const fn embedded_click() -> &'static [u8] {
    EMBEDDED_CLICK
}

// ============================================================================
// SoundSource
// ============================================================================

/// Where a cue comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A sound file from one of the system sound directories.
    System {
        /// File stem, e.g. "complete".
        name: String,
        /// Full path to the sound file.
        path: PathBuf,
    },
    /// The click compiled into the binary.
    Embedded,
}

impl SoundSource {
    /// Creates a system sound source.
    #[must_use]
    pub fn system(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::System {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Returns the name of the source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::System { name, .. } => name,
            Self::Embedded => "embedded",
        }
    }

    /// Returns true for a system sound.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }
}

// ============================================================================
// Discovery
// ============================================================================

/// Scans the system sound directories for playable files.
///
/// Returns an empty vector when no directory exists, e.g. in a container.
#[must_use]
pub fn discover_system_sounds() -> Vec<SoundSource> {
    let mut sounds = Vec::new();

    for dir in SYSTEM_SOUND_DIRS {
        let path = PathBuf::from(dir);
        if !path.is_dir() {
            continue;
        }

        if let Ok(entries) = std::fs::read_dir(&path) {
            for entry in entries.flatten() {
                let file_path = entry.path();
                let Some(ext) = file_path.extension() else {
                    continue;
                };
                if !SUPPORTED_EXTENSIONS.contains(&ext.to_string_lossy().to_lowercase().as_str()) {
                    continue;
                }
                if let Some(stem) = file_path.file_stem() {
                    sounds.push(SoundSource::System {
                        name: stem.to_string_lossy().into_owned(),
                        path: file_path,
                    });
                }
            }
        }
    }

    sounds.sort_by(|a, b| a.name().cmp(b.name()));
    sounds
}

/// Picks the cue to play at phase transitions.
///
/// Prefers a well-known theme sound, then any discovered sound, then the
/// embedded click.
#[must_use]
pub fn default_cue() -> SoundSource {
    let sounds = discover_system_sounds();

    for preferred in DEFAULT_CUE_NAMES {
        if let Some(sound) = sounds.iter().find(|s| s.name() == *preferred) {
            return sound.clone();
        }
    }

    sounds.into_iter().next().unwrap_or(SoundSource::Embedded)
}

/// Finds a system sound by name, case-insensitively.
///
/// # Errors
///
/// Returns `SoundError::FileNotFound` if no sound with the given name
/// exists in any system sound directory.
pub fn find_system_sound(name: &str) -> Result<SoundSource, SoundError> {
    discover_system_sounds()
        .into_iter()
        .find(|s| s.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| SoundError::FileNotFound(format!("system sound '{name}' not found")))
}
