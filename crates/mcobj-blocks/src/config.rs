use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid color {value:?} for block {id}")]
    Color { id: u8, value: String },
}

/// Block table overlay as read from a TOML file.
///
/// ```toml
/// [[blocks]]
/// id = 8
/// name = "Water"
/// color = "#3d6dff3f"
/// transparent = true
///
/// [[blocks]]
/// id = 35
/// name = "Wool"
/// variants = [
///   { data = 0, color = "#dddddd", name = "White_Wool" },
///   { data = 14, color = "#963430" },
/// ]
/// ```
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub id: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub item: Option<bool>,
    #[serde(default)]
    pub transparent: Option<bool>,
    #[serde(default)]
    pub empty: Option<bool>,
    #[serde(default)]
    pub variants: Vec<VariantDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VariantDef {
    pub data: u8,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Parses `#rrggbb` (opaque) or `#rrggbbaa` into packed RGBA.
pub fn parse_color(s: &str) -> Option<u32> {
    let hex = s.strip_prefix('#')?;
    let n = u32::from_str_radix(hex, 16).ok()?;
    match hex.len() {
        6 => Some((n << 8) | 0xff),
        8 => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_with_and_without_alpha() {
        assert_eq!(parse_color("#3d6dff"), Some(0x3d6dffff));
        assert_eq!(parse_color("#3d6dff3f"), Some(0x3d6dff3f));
        assert_eq!(parse_color("3d6dff"), None);
        assert_eq!(parse_color("#3d6d"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn parses_block_defs() {
        let cfg: BlocksConfig = toml::from_str(
            r##"
            [[blocks]]
            id = 8
            color = "#3d6dff3f"
            transparent = true

            [[blocks]]
            id = 35
            variants = [{ data = 14, color = "#963430" }]
            "##,
        )
        .unwrap();
        assert_eq!(cfg.blocks.len(), 2);
        assert_eq!(cfg.blocks[0].transparent, Some(true));
        assert_eq!(cfg.blocks[1].variants[0].data, 14);
    }
}
