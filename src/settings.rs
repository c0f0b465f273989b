use std::{fs::File, io::BufReader, path::Path};

use crate::{
    colour::palette::Palette,
    foundation::error::{BlitError, BlitResult},
};

/// Environment variable that forces the plain colour path when set to `1`, `true` or `yes`.
pub const DISABLE_ANIM_ENV: &str = "ANIMBLIT_DISABLE_ANIM";

/// Blitter configuration, usually read from a JSON file.
///
/// ```json
/// { "animation": true, "palette": [[0, 0, 0], [255, 255, 255]] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlitterSettings {
    /// Use the animation buffer when the target provides one.
    pub animation: bool,
    /// Palette entries as `[r, g, b]`; the built-in palette when absent.
    pub palette: Option<Vec<[u8; 3]>>,
}

impl Default for BlitterSettings {
    fn default() -> Self {
        Self {
            animation: true,
            palette: None,
        }
    }
}

impl BlitterSettings {
    pub fn from_json_str(s: &str) -> BlitResult<Self> {
        serde_json::from_str(s).map_err(|e| BlitError::config(format!("parse settings JSON: {e}")))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> BlitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BlitError::config(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            BlitError::config(format!("parse settings JSON '{}': {e}", path.display()))
        })
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let disable = lookup(DISABLE_ANIM_ENV)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        if disable {
            tracing::debug!(var = DISABLE_ANIM_ENV, "animation disabled by environment");
            self.animation = false;
        }
        self
    }

    pub fn build_palette(&self) -> BlitResult<Palette> {
        match &self.palette {
            Some(rgb) => Palette::from_rgb_triplets(rgb),
            None => Ok(Palette::default()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
