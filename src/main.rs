mod convert;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use mcobj_blocks::{BlockRegistry, MaterialNaming};
use mcobj_chunk::DefaultSide;
use mcobj_mesh::MergePolicy;
use mcobj_world::ChunkCoord;

use crate::convert::{Region, convert_world, output_for_world};
use crate::settings::{OutputFormat, RunSettings};

#[derive(Parser, Debug)]
#[command(name = "mcobj", version, about = "Convert Minecraft worlds to OBJ meshes or PRT particle clouds")]
struct Cli {
    /// World directories to convert
    #[arg(required = true)]
    worlds: Vec<PathBuf>,
    /// TOML run file supplying defaults for the flags below
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,
    /// Block table overlay (TOML)
    #[arg(long, value_name = "TOML")]
    blocks: Option<PathBuf>,
    /// Worker threads
    #[arg(long)]
    cpu: Option<usize>,
    /// Output file (default a.obj, or a.prt with --prt)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Skip blocks below this height
    #[arg(short = 'y', long = "y-min")]
    y_min: Option<usize>,
    /// Treat missing neighbour chunks as air, exposing the world's edges
    #[arg(long)]
    sides: bool,
    /// One quad per block face instead of merged wall runs
    #[arg(long = "bf")]
    per_block: bool,
    /// Hide the bottom of the world
    #[arg(long = "hb")]
    hide_bottom: bool,
    /// Omit materials from the OBJ
    #[arg(short = 'g', long = "no-color")]
    no_color: bool,
    /// Centre x in blocks
    #[arg(short = 'x', allow_hyphen_values = true)]
    block_x: Option<i64>,
    /// Centre z in blocks
    #[arg(short = 'z', allow_hyphen_values = true)]
    block_z: Option<i64>,
    /// Centre x in chunks
    #[arg(long, allow_hyphen_values = true)]
    cx: Option<i32>,
    /// Centre z in chunks
    #[arg(long, allow_hyphen_values = true)]
    cz: Option<i32>,
    /// Square of chunks around the centre
    #[arg(short = 's')]
    square: Option<i32>,
    /// Rectangle width (x) in chunks
    #[arg(long)]
    rx: Option<i32>,
    /// Rectangle depth (z) in chunks
    #[arg(long)]
    rz: Option<i32>,
    /// Face limit in thousands
    #[arg(long)]
    fk: Option<u64>,
    /// Write a PRT particle file instead of OBJ
    #[arg(long)]
    prt: bool,
    /// Absolute face indices, all vertices first
    #[arg(long)]
    absolute_indices: bool,
    /// Number materials instead of naming them
    #[arg(long)]
    mtlnum: bool,
    /// Do not draw stone
    #[arg(long)]
    hide_stone: bool,
}

impl Cli {
    /// Run-file defaults with the flags applied on top.
    fn settings(&self) -> Result<RunSettings, settings::SettingsError> {
        let mut s = match &self.config {
            Some(path) => RunSettings::load(path)?,
            None => RunSettings::default(),
        };
        if let Some(n) = self.cpu {
            s.workers = n.max(1);
        }
        if self.prt {
            s.format = OutputFormat::Prt;
        }
        if self.output.is_some() {
            s.output = self.output.clone();
        }
        if let Some(y) = self.y_min {
            s.y_min = y;
        }
        if self.sides {
            s.default_side = DefaultSide::Empty;
        }
        if self.per_block {
            s.merge = MergePolicy::PerBlock;
        }
        s.hide_bottom |= self.hide_bottom;
        s.hide_stone |= self.hide_stone;
        s.absolute_indices |= self.absolute_indices;
        if self.no_color {
            s.colors = false;
        }
        if self.mtlnum {
            s.naming = MaterialNaming::Numbers;
        }
        if let Some(fk) = self.fk {
            s.max_faces = Some(fk.saturating_mul(1000));
        }
        if self.blocks.is_some() {
            s.blocks = self.blocks.clone();
        }
        Ok(s)
    }

    fn region(&self) -> Region {
        let center = match (self.cx, self.cz, self.block_x, self.block_z) {
            (None, None, None, None) => None,
            (cx, cz, bx, bz) => {
                let from_blocks = ChunkCoord::containing_block(bx.unwrap_or(0), bz.unwrap_or(0));
                Some(ChunkCoord::new(cx.unwrap_or(from_blocks.x), cz.unwrap_or(from_blocks.z)))
            }
        };
        Region {
            center,
            square: self.square,
            width: self.rx,
            depth: self.rz,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = match cli.settings() {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let registry = match &settings.blocks {
        Some(path) => match BlockRegistry::load_from_path(path) {
            Ok(r) => r,
            Err(e) => {
                log::error!("{}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => BlockRegistry::builtin(),
    };
    let region = cli.region();
    let output = settings.output();
    let batch = cli.worlds.len() > 1;
    log::info!("mcobj {} (cpu: {})", env!("CARGO_PKG_VERSION"), settings.workers);

    let mut failed = 0usize;
    for world in &cli.worlds {
        let out = output_for_world(&output, world, batch);
        if let Err(e) = convert_world(world, &out, &settings, &registry, &region) {
            log::error!("{}: {e}", world.display());
            failed += 1;
        }
    }

    if failed > 0 {
        log::error!("{failed} of {} worlds failed", cli.worlds.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mcobj").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "--cpu", "3", "--prt", "-y", "20", "--sides", "--bf", "--hb", "-g", "--fk", "50", "--mtlnum", "world",
        ]);
        let s = cli.settings().unwrap();
        assert_eq!(s.workers, 3);
        assert_eq!(s.format, OutputFormat::Prt);
        assert_eq!(s.output(), PathBuf::from("a.prt"));
        assert_eq!(s.y_min, 20);
        assert_eq!(s.default_side, DefaultSide::Empty);
        assert_eq!(s.merge, MergePolicy::PerBlock);
        assert!(s.hide_bottom);
        assert!(!s.colors);
        assert_eq!(s.max_faces, Some(50_000));
        assert_eq!(s.naming, MaterialNaming::Numbers);
    }

    #[test]
    fn block_centre_maps_to_chunks() {
        let cli = parse(&["-x", "-1", "-z", "40", "-s", "10", "w"]);
        let region = cli.region();
        assert_eq!(region.center, Some(ChunkCoord::new(-1, 2)));
        assert_eq!(region.square, Some(10));

        let cli = parse(&["--cx", "5", "w"]);
        assert_eq!(cli.region().center, Some(ChunkCoord::new(5, 0)));
        assert_eq!(parse(&["w"]).region().center, None);
    }

    #[test]
    fn run_file_supplies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        std::fs::write(&path, "workers = 2\ny_min = 30\noutput = \"out.obj\"\n").unwrap();
        let cli = parse(&["--config", path.to_str().unwrap(), "-y", "5", "w"]);
        let s = cli.settings().unwrap();
        assert_eq!(s.workers, 2);
        assert_eq!(s.y_min, 5);
        assert_eq!(s.output(), PathBuf::from("out.obj"));
    }

    #[test]
    fn world_is_required() {
        assert!(Cli::try_parse_from(["mcobj"]).is_err());
    }
}
