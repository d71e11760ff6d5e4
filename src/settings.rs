//! Options that change how a score is read

use serde::{Deserialize, Serialize};

/// Configuration options for reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadSettings {
    /// Reading clipboard content rather than a file
    pub paste_mode: bool,

    /// Skip embedded and linked images
    pub no_images: bool,

    /// Added to every explicit `track` value
    pub track_offset: i32,
}

impl Default for ReadSettings {
    fn default() -> Self {
        Self {
            paste_mode: false,
            no_images: false,
            track_offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: ReadSettings = serde_json::from_str(r#"{"no_images": true}"#).unwrap();
        assert!(s.no_images);
        assert!(!s.paste_mode);
        assert_eq!(s.track_offset, 0);
    }
}
