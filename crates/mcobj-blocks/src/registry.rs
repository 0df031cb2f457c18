use std::fs;
use std::path::Path;

use crate::builtin;
use crate::config::{BlockDef, BlocksConfig, ConfigError, parse_color};
use crate::material::{MaterialCatalog, UNKNOWN_COLOR};
use crate::types::BlockType;

/// Block type descriptors for all 256 type ids plus the material catalog.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    types: Vec<Option<BlockType>>,
    pub materials: MaterialCatalog,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BlockRegistry {
    /// Registry with no known types; every id classifies as an opaque mass.
    pub fn empty() -> Self {
        Self {
            types: vec![None; 256],
            materials: MaterialCatalog::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        for &(id, name, item, transparent) in builtin::BLOCK_TYPES {
            let ty = if item {
                BlockType::item(id, name)
            } else {
                BlockType::mass(id, name, transparent)
            };
            reg.insert(ty);
        }
        reg.materials = MaterialCatalog::builtin();
        reg
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Builtin table with the TOML overlay applied.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: BlocksConfig = toml::from_str(text)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, ConfigError> {
        let mut reg = Self::builtin();
        for def in cfg.blocks {
            reg.apply(def)?;
        }
        Ok(reg)
    }

    fn apply(&mut self, def: BlockDef) -> Result<(), ConfigError> {
        let id = def.id;
        let prev = self.get(id).cloned();
        let name = def
            .name
            .clone()
            .or_else(|| prev.as_ref().map(|t| t.name.clone()))
            .unwrap_or_else(|| format!("Unknown.{id}"));

        let mut ty = prev.unwrap_or_else(|| BlockType::mass(id, &name, false));
        ty.name = name.clone();
        if let Some(item) = def.item {
            ty.item = item;
            ty.transparent = item;
        }
        if let Some(transparent) = def.transparent {
            ty.transparent = transparent;
        }
        if let Some(empty) = def.empty {
            ty.empty = empty;
            if empty {
                ty.transparent = true;
                ty.item = false;
            }
        }
        self.insert(ty);

        let color = match def.color.as_deref() {
            Some(s) => parse_color(s).ok_or_else(|| ConfigError::Color {
                id,
                value: s.to_string(),
            })?,
            None => self.materials.base(id).color,
        };
        self.materials.set_base(id, color, &name);

        for v in def.variants {
            let vcolor = match v.color.as_deref() {
                Some(s) => parse_color(s).ok_or_else(|| ConfigError::Color {
                    id,
                    value: s.to_string(),
                })?,
                None => color,
            };
            let vname = v.name.unwrap_or_else(|| format!("{}_{}", name, v.data));
            self.materials.set_variant(id, v.data, vcolor, &vname);
        }
        Ok(())
    }

    pub fn insert(&mut self, ty: BlockType) {
        let id = ty.id as usize;
        self.types[id] = Some(ty);
    }

    #[inline]
    pub fn get(&self, id: u8) -> Option<&BlockType> {
        self.types[id as usize].as_ref()
    }

    pub fn name(&self, id: u8) -> &str {
        self.get(id).map(|t| t.name.as_str()).unwrap_or("Unknown")
    }

    pub fn known_types(&self) -> impl Iterator<Item = &BlockType> {
        self.types.iter().flatten()
    }

    pub fn is_unknown_color(&self, id: u8) -> bool {
        self.materials.base(id).color == UNKNOWN_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_classic_ids() {
        let reg = BlockRegistry::builtin();
        assert_eq!(reg.known_types().count(), 27 + 1 + 58);
        let water = reg.get(8).unwrap();
        assert!(water.transparent && !water.item);
        let torch = reg.get(50).unwrap();
        assert!(torch.item && torch.transparent);
        assert!(reg.get(36).is_none());
        assert!(reg.get(95).is_none());
        assert_eq!(reg.name(3), "Dirt");
    }

    #[test]
    fn overlay_sets_flags_and_colors() {
        let reg = BlockRegistry::from_toml_str(
            r##"
            [[blocks]]
            id = 95
            name = "Stained Glass"
            color = "#ffffff80"
            transparent = true

            [[blocks]]
            id = 31
            name = "Tall Grass"
            item = true

            [[blocks]]
            id = 9
            empty = true

            [[blocks]]
            id = 35
            variants = [{ data = 1, color = "#ea7e35" }]
            "##,
        )
        .unwrap();
        let glass = reg.get(95).unwrap();
        assert!(glass.transparent && !glass.item && !glass.empty);
        assert_eq!(reg.materials.base(95).color, 0xffffff80);
        assert!(reg.get(31).unwrap().item);
        assert!(reg.is_unknown_color(31));
        assert!(reg.get(9).unwrap().empty);
        assert_eq!(reg.name(9), "Stationary water");
        assert!(reg.materials.has_variants(35));
        let orange = reg.materials.iter().last().unwrap();
        assert_eq!((orange.block, orange.metadata), (35, Some(1)));
        assert_eq!(orange.name, "Wool_1");
        assert_eq!(orange.color, 0xea7e35ff);
    }

    #[test]
    fn bad_color_is_reported() {
        let err = BlockRegistry::from_toml_str("[[blocks]]\nid = 1\ncolor = \"red\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Color { id: 1, .. }));
    }
}
