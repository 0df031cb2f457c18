use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use mcobj_blocks::MaterialNaming;
use mcobj_chunk::DefaultSide;
use mcobj_mesh::MergePolicy;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Obj,
    Prt,
}

impl OutputFormat {
    pub fn default_output(self) -> &'static str {
        match self {
            OutputFormat::Obj => "a.obj",
            OutputFormat::Prt => "a.prt",
        }
    }
}

/// Conversion defaults, loadable from a TOML run file and overridden by flags.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    pub workers: usize,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub y_min: usize,
    pub default_side: DefaultSide,
    pub merge: MergePolicy,
    pub hide_bottom: bool,
    pub hide_stone: bool,
    pub colors: bool,
    pub naming: MaterialNaming,
    pub absolute_indices: bool,
    pub max_chunks: Option<u64>,
    pub max_faces: Option<u64>,
    /// Block table overlay applied on top of the built-in one.
    pub blocks: Option<PathBuf>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(1, |n| n.get()),
            format: OutputFormat::Obj,
            output: None,
            y_min: 0,
            default_side: DefaultSide::Solid,
            merge: MergePolicy::Greedy,
            hide_bottom: false,
            hide_stone: false,
            colors: true,
            naming: MaterialNaming::Names,
            absolute_indices: false,
            max_chunks: None,
            max_faces: None,
            blocks: None,
        }
    }
}

impl RunSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_output()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let s = RunSettings::from_toml_str("").unwrap();
        assert_eq!(s, RunSettings::default());
        assert_eq!(s.output(), PathBuf::from("a.obj"));
        assert!(s.workers >= 1);
    }

    #[test]
    fn parses_every_field() {
        let s = RunSettings::from_toml_str(
            r#"
            workers = 3
            format = "prt"
            y_min = 12
            default_side = "empty"
            merge = "per-block"
            hide_bottom = true
            hide_stone = true
            colors = false
            naming = "numbers"
            absolute_indices = true
            max_chunks = 400
            max_faces = 2000000
            blocks = "blocks.toml"
            "#,
        )
        .unwrap();
        assert_eq!(s.workers, 3);
        assert_eq!(s.format, OutputFormat::Prt);
        assert_eq!(s.output(), PathBuf::from("a.prt"));
        assert_eq!(s.y_min, 12);
        assert_eq!(s.default_side, DefaultSide::Empty);
        assert_eq!(s.merge, MergePolicy::PerBlock);
        assert!(s.hide_bottom && s.hide_stone && s.absolute_indices);
        assert!(!s.colors);
        assert_eq!(s.naming, MaterialNaming::Numbers);
        assert_eq!(s.max_chunks, Some(400));
        assert_eq!(s.max_faces, Some(2_000_000));
        assert_eq!(s.blocks, Some(PathBuf::from("blocks.toml")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RunSettings::from_toml_str("wokers = 2").is_err());
    }

    #[test]
    fn load_reports_path() {
        let err = RunSettings::load(Path::new("/nonexistent/mcobj.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/mcobj.toml"));
    }
}
