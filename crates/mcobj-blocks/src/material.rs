use std::io::{self, Write};

use serde::Deserialize;

use crate::builtin;
use crate::types::BlockId;

pub const UNKNOWN_COLOR: u32 = 0x8000_00ff;

/// A colored material written to the `.mtl` file and referenced by `usemtl`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Material {
    pub block: u8,
    /// `None` for the per-type entry, `Some` for a metadata variant.
    pub metadata: Option<u8>,
    /// Packed RGBA.
    pub color: u32,
    pub name: String,
}

impl Material {
    pub fn block_id(&self) -> BlockId {
        BlockId::new(self.block, self.metadata.unwrap_or(0))
    }

    /// Color components scaled to `0.0..=1.0`, as `[r, g, b, a]`.
    pub fn rgba(&self) -> [f64; 4] {
        let c = self.color;
        [c >> 24, (c >> 16) & 0xff, (c >> 8) & 0xff, c & 0xff].map(|v| v as f64 / 255.0)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialNaming {
    /// `usemtl Stone`
    #[default]
    Names,
    /// `usemtl 1`, or `usemtl 35_14` for types with variants.
    Numbers,
}

/// One material per block type plus any metadata variants, in file order.
#[derive(Clone, Debug)]
pub struct MaterialCatalog {
    base: Vec<Material>,
    variants: Vec<Material>,
    has_variants: [bool; 256],
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialCatalog {
    /// Every type id named `Unknown.<id>` with the fallback color.
    pub fn new() -> Self {
        let base = (0..=255u8)
            .map(|i| Material {
                block: i,
                metadata: None,
                color: UNKNOWN_COLOR,
                name: format!("Unknown.{i}"),
            })
            .collect();
        Self {
            base,
            variants: Vec::new(),
            has_variants: [false; 256],
        }
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for &(id, color, name) in builtin::COLORS {
            catalog.set_base(id, color, name);
        }
        catalog
    }

    pub fn set_base(&mut self, block: u8, color: u32, name: &str) {
        let m = &mut self.base[block as usize];
        m.color = color;
        m.name = name.to_string();
    }

    /// Adds (or replaces) a metadata variant; the type then names materials per variant.
    pub fn set_variant(&mut self, block: u8, metadata: u8, color: u32, name: &str) {
        self.has_variants[block as usize] = true;
        let entry = Material {
            block,
            metadata: Some(metadata),
            color,
            name: name.to_string(),
        };
        match self
            .variants
            .iter_mut()
            .find(|m| m.block == block && m.metadata == Some(metadata))
        {
            Some(existing) => *existing = entry,
            None => self.variants.push(entry),
        }
    }

    pub fn base(&self, block: u8) -> &Material {
        &self.base[block as usize]
    }

    #[inline]
    pub fn has_variants(&self, block: u8) -> bool {
        self.has_variants[block as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.base.iter().chain(self.variants.iter())
    }

    pub fn len(&self) -> usize {
        self.base.len() + self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn name_for(&self, id: BlockId, naming: MaterialNaming) -> String {
        let t = id.type_id();
        match naming {
            MaterialNaming::Numbers => {
                if self.has_variants(t) {
                    format!("{}_{}", t, id.metadata())
                } else {
                    t.to_string()
                }
            }
            MaterialNaming::Names => {
                let found = if self.has_variants(t) {
                    self.variants
                        .iter()
                        .find(|m| m.block == t && m.metadata == Some(id.metadata()))
                } else {
                    None
                };
                sanitize(&found.unwrap_or_else(|| self.base(t)).name)
            }
        }
    }

    /// Writes the `.mtl` body, one stanza per material.
    pub fn write_mtl<W: Write>(&self, w: &mut W, naming: MaterialNaming) -> io::Result<()> {
        for m in self.iter() {
            let [r, g, b, a] = m.rgba();
            writeln!(w, "# {}", m.name)?;
            writeln!(w, "newmtl {}", self.name_for(m.block_id(), naming))?;
            writeln!(w, "Kd {r:.4} {g:.4} {b:.4}")?;
            writeln!(w, "d {a:.4}")?;
            writeln!(w, "illum 1")?;
            writeln!(w)?;
        }
        Ok(())
    }
}

/// Material names are single tokens in OBJ/MTL statements.
fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '"')
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
