use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;

use landmass::params::{OutputSet, QuantizationMode, TerrainParameters};
use landmass::pipeline::generate;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputArg {
    NoiseMap,
    ColourMap,
    Mesh,
    All,
}

impl From<OutputArg> for OutputSet {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::NoiseMap => OutputSet::NoiseMap,
            OutputArg::ColourMap => OutputSet::ColourMap,
            OutputArg::Mesh => OutputSet::Mesh,
            OutputArg::All => OutputSet::All,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "landmass")]
#[command(about = "Generate a procedural landmass and write preview bitmaps")]
struct Args {
    /// JSON parameter file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<i64>,

    /// Width of the map in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Number of colour/elevation bands
    #[arg(short, long)]
    bands: Option<usize>,

    /// Snap mesh heights to their band threshold
    #[arg(long)]
    stepped: bool,

    /// Use the noise and block sliders instead of the default preset
    #[arg(long)]
    no_defaults: bool,

    /// Which artifacts to produce
    #[arg(short, long, value_enum, default_value = "all")]
    output: OutputArg,

    /// Directory for the PNG previews
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Print the effective parameters as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => TerrainParameters::from_json_file(path)?,
        None => TerrainParameters::default(),
    };
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    if let Some(width) = args.width {
        params.width = width;
    }
    if let Some(height) = args.height {
        params.height = height;
    }
    if let Some(bands) = args.bands {
        params.region_band_count = bands;
    }
    if args.stepped {
        params.quantization_mode = QuantizationMode::Stepped;
    }
    if args.no_defaults {
        params.use_defaults = false;
    }

    if args.dump_config {
        println!("{}", params.to_json_string()?);
        return Ok(());
    }

    let outputs = OutputSet::from(args.output);
    println!("Generating landmass with seed: {}", params.seed);
    println!("Map size: {}x{}", params.width, params.height);

    let artifacts = generate(&params, outputs)?;
    std::fs::create_dir_all(&args.out_dir)?;

    if let Some(img) = &artifacts.noise_bitmap {
        let path = args.out_dir.join("noise_map.png");
        img.save(&path)?;
        info!("wrote {}", path.display());
    }
    if let Some(img) = &artifacts.colour_bitmap {
        let path = args.out_dir.join("colour_map.png");
        img.save(&path)?;
        info!("wrote {}", path.display());
    }
    if let Some(regions) = &artifacts.regions {
        println!("Regions: {:?}", regions.thresholds());
    }
    if let Some(mesh) = &artifacts.mesh {
        println!(
            "Mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        if let Some((lo, hi)) = mesh.bounds() {
            println!("Mesh height range: {:.3} to {:.3}", lo.y, hi.y);
        }
    }

    Ok(())
}
