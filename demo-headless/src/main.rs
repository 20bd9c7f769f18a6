use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use texgen_core::noise::{self, DumpSink, TracingSink};
use texgen_core::texture::Dimension;
use texgen_core::transform::{cloud_exp_curve, normalize, resample, threshold, value_range};
use texgen_core::{Extent, NoiseSpec, SeededRandom, Texture, Texture2D, TextureError, D2, D3};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Characters from empty to dense
const PREVIEW_RAMP: &[u8] = b" .:-=+*#%@";

/// Columns of the ASCII preview
const PREVIEW_COLUMNS: usize = 64;

/// What to generate
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// 2D cloud coverage mask (normalized, cloud curve applied)
    Clouds,
    /// 2D terrain heightmap (normalized)
    Terrain,
    /// 2D Perlin-ordered layer (normalized)
    Perlin,
    /// 3D cloud density volume (middle slice previewed)
    Volume,
}

/// Procedural texture generation demo
#[derive(Parser, Debug)]
#[command(name = "texgen-demo")]
#[command(about = "Generate octave noise textures and print statistics", long_about = None)]
struct Args {
    /// Texture to generate
    #[arg(short, long, value_enum, default_value_t = Mode::Clouds)]
    mode: Mode,

    /// Base resolution along every axis (preset value if omitted)
    #[arg(short, long)]
    size: Option<usize>,

    /// Octaves below the base level (preset value if omitted)
    #[arg(short, long)]
    octaves: Option<u32>,

    /// Root seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Smoothing iterations per octave (preset value if omitted)
    #[arg(long)]
    smooth: Option<u32>,

    /// Zero every value below this cutoff after shaping
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Print an ASCII preview
    #[arg(short, long)]
    preview: bool,

    /// Log every intermediate octave level
    #[arg(long)]
    dump: bool,
}

impl Args {
    fn spec(&self) -> NoiseSpec {
        let mut spec = match self.mode {
            Mode::Clouds => NoiseSpec::cloud_layer(),
            Mode::Terrain => NoiseSpec::terrain(),
            Mode::Perlin => NoiseSpec::perlin_layer(),
            Mode::Volume => NoiseSpec::volume(),
        }
        .with_seed(self.seed);

        if let Some(size) = self.size {
            spec.resolution = Extent::new_3d(size, size, size);
        }
        if let Some(octaves) = self.octaves {
            spec.octaves = octaves;
        }
        if let Some(smooth) = self.smooth {
            spec.smooth_iterations = smooth;
        }
        spec
    }
}

/// Summary statistics of a texture
struct Stats {
    min: f32,
    max: f32,
    mean: f32,
    coverage: f32,
}

impl Stats {
    fn of(data: &[f32]) -> Self {
        let (min, max) = data
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let count = data.len().max(1) as f32;
        let mean = data.iter().sum::<f32>() / count;
        let covered = data.iter().filter(|&&v| v > 0.0).count() as f32;
        Self {
            min,
            max,
            mean,
            coverage: covered / count,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Generation failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Generates with level dumps routed to `sink` when one is given.
fn generate<D: Dimension>(
    spec: &NoiseSpec,
    sink: Option<&mut dyn DumpSink>,
) -> Result<Texture<f32, D>, TextureError> {
    let mut rng = SeededRandom::new(spec.seed);
    noise::generate_with::<D, _>(spec, &mut rng, sink)
}

fn run(args: &Args) -> Result<(), TextureError> {
    let spec = args.spec();
    let mut tracing_sink = TracingSink::new();
    let sink: Option<&mut dyn DumpSink> = if args.dump {
        Some(&mut tracing_sink)
    } else {
        None
    };
    println!("=== Texture Generation Demo ===\n");
    println!(
        "Mode: {:?}, resolution: {}, octaves: {}, bandwidth: {}, seed: {}",
        args.mode, spec.resolution, spec.octaves, spec.bandwidth, spec.seed
    );

    let (data, slice) = match args.mode {
        Mode::Clouds => {
            let mut clouds = generate::<D2>(&spec, sink)?;
            normalize(&mut clouds, 0.0, 1.0);
            cloud_exp_curve(&mut clouds);
            if let Some(cutoff) = args.threshold {
                threshold(&mut clouds, cutoff);
            }
            (clouds.data().to_vec(), clouds)
        }
        Mode::Terrain | Mode::Perlin => {
            let mut terrain = generate::<D2>(&spec, sink)?;
            normalize(&mut terrain, 0.0, 1.0);
            if let Some(cutoff) = args.threshold {
                threshold(&mut terrain, cutoff);
            }
            (terrain.data().to_vec(), terrain)
        }
        Mode::Volume => {
            let mut volume = generate::<D3>(&spec, sink)?;
            normalize(&mut volume, 0.0, 1.0);
            cloud_exp_curve(&mut volume);
            if let Some(cutoff) = args.threshold {
                threshold(&mut volume, cutoff);
            }

            let extent = volume.extent();
            let layer = extent.width * extent.height;
            let z = extent.depth / 2;
            let middle = volume.data()[z * layer..(z + 1) * layer].to_vec();
            let slice = Texture2D::from_data(extent.width, extent.height, 1, middle)?;
            (volume.into_data(), slice)
        }
    };

    let stats = Stats::of(&data);
    info!(texels = data.len(), "Generation complete");
    if args.dump {
        println!("Octave dumps logged: {}", tracing_sink.dumps());
    }
    println!(
        "min: {:.4}  max: {:.4}  mean: {:.4}  coverage: {:.1}%",
        stats.min,
        stats.max,
        stats.mean,
        stats.coverage * 100.0
    );

    if args.preview {
        println!();
        print_preview(&slice);
    }
    Ok(())
}

/// Prints `texture` as ASCII, halving rows to offset character aspect.
fn print_preview(texture: &Texture2D<f32>) {
    let Some((min, max)) = value_range(texture) else {
        return;
    };
    let columns = PREVIEW_COLUMNS.min(texture.width());
    let rows = (columns * texture.height() / texture.width().max(1) / 2).max(1);
    let preview = resample(texture, Extent::new_2d(columns, rows));

    let span = if max > min { max - min } else { 1.0 };
    let last = PREVIEW_RAMP.len() - 1;
    for y in 0..rows {
        let line: String = (0..columns)
            .map(|x| {
                let t = (preview.pixel(x, y)[0] - min) / span;
                let index = ((t * last as f32).round() as usize).min(last);
                char::from(PREVIEW_RAMP[index])
            })
            .collect();
        println!("{line}");
    }
}
