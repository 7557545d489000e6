use clap::{Parser, Subcommand, ValueEnum};
use gp_pressure::{BowersCoefficients, DEFAULT_EATON_EXPONENT};
use gp_well::{
    DepthReference, JsonFileStore, Log, Well, WellError, WellResult, WellStorage,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gp-cli")]
#[command(about = "Geopressure CLI - pore pressure prediction from well logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List wells in a store
    Wells {
        /// Path to the JSON well store
        store: PathBuf,
    },
    /// List logs of a well
    Logs {
        /// Path to the well metadata file (JSON or YAML)
        metadata: PathBuf,
    },
    /// Print pressure measurements of a well
    Points {
        /// Path to the well metadata file (JSON or YAML)
        metadata: PathBuf,
        /// Measurement source
        #[arg(value_enum)]
        source: PressureSource,
        /// Report depths below sea level instead of below kelly bushing
        #[arg(long)]
        sea: bool,
        /// Start depth of the hydrodynamic interval to exclude
        #[arg(long, default_value_t = 0.0)]
        hydrodynamic: f64,
    },
    /// Predict pore pressure with the Eaton method
    Eaton {
        /// Path to the well metadata file (JSON or YAML)
        metadata: PathBuf,
        /// Velocity log name
        #[arg(long, default_value = "Velocity")]
        velocity: String,
        /// Eaton exponent
        #[arg(long, default_value_t = DEFAULT_EATON_EXPONENT)]
        n: f64,
        /// Merge the result into the well and write it back to the store
        #[arg(long)]
        save: bool,
    },
    /// Predict pore pressure with the Bowers method
    Bowers {
        /// Path to the well metadata file (JSON or YAML)
        metadata: PathBuf,
        /// Velocity log name
        #[arg(long, default_value = "Velocity")]
        velocity: String,
        #[arg(long)]
        a: f64,
        #[arg(long)]
        b: f64,
        /// Unloading exponent
        #[arg(long, default_value_t = 1.0)]
        u: f64,
        /// Maximum velocity before unloading (m/s)
        #[arg(long)]
        v_max: f64,
        /// Depth where unloading starts; no unloading when omitted
        #[arg(long)]
        unloading_depth: Option<f64>,
        /// Merge the result into the well and write it back to the store
        #[arg(long)]
        save: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PressureSource {
    Measured,
    Emw,
    Dst,
    Mdt,
    Loading,
    Unloading,
}

fn main() -> WellResult<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Wells { store } => cmd_wells(&store),
        Commands::Logs { metadata } => cmd_logs(&metadata),
        Commands::Points {
            metadata,
            source,
            sea,
            hydrodynamic,
        } => cmd_points(&metadata, source, sea, hydrodynamic),
        Commands::Eaton {
            metadata,
            velocity,
            n,
            save,
        } => cmd_eaton(&metadata, &velocity, n, save),
        Commands::Bowers {
            metadata,
            velocity,
            a,
            b,
            u,
            v_max,
            unloading_depth,
            save,
        } => cmd_bowers(
            &metadata,
            &velocity,
            &BowersCoefficients::new(a, b, u, v_max),
            unloading_depth,
            save,
        ),
    }
}

fn cmd_wells(store: &Path) -> WellResult<()> {
    let wells = JsonFileStore::new(store).list_wells()?;
    if wells.is_empty() {
        println!("No wells found in {}", store.display());
    } else {
        println!("Wells in {}:", store.display());
        for name in wells {
            println!("  {name}");
        }
    }
    Ok(())
}

fn cmd_logs(metadata: &Path) -> WellResult<()> {
    let well = Well::load(metadata)?;
    let units = well.unit_map();
    if !well.is_loaded() {
        println!("{well} has no log table");
        return Ok(());
    }
    println!("Logs in {well}:");
    for name in well.logs() {
        let unit = units.get(&name).map(String::as_str).unwrap_or_default();
        println!("  {name} [{unit}]");
    }
    Ok(())
}

fn cmd_points(
    metadata: &Path,
    source: PressureSource,
    sea: bool,
    hydrodynamic: f64,
) -> WellResult<()> {
    let well = Well::load(metadata)?;
    let reference = if sea {
        DepthReference::Sea
    } else {
        DepthReference::KellyBushing
    };

    let log = match source {
        PressureSource::Measured => well.measured_pressure(reference)?,
        PressureSource::Emw => well.emw(reference)?,
        PressureSource::Dst => well.dst(reference)?,
        PressureSource::Mdt => well.wireline_test(hydrodynamic, reference)?,
        PressureSource::Loading => well.loading_pressure(reference)?,
        PressureSource::Unloading => well.unloading_pressure(reference)?,
    };

    if log.is_empty() {
        println!("No pressure points");
        return Ok(());
    }
    println!("depth_m\tpressure_{}", log.units());
    for (d, p) in log.samples() {
        println!("{d:.1}\t{p:.3}");
    }
    Ok(())
}

fn cmd_eaton(metadata: &Path, velocity: &str, n: f64, save: bool) -> WellResult<()> {
    let mut well = Well::load(metadata)?;
    let vel = well.get_single_log(velocity, DepthReference::KellyBushing)?;
    let pressure = well.eaton(vel.data(), n)?;
    print_summary(&pressure);
    if save {
        save_result(metadata, &mut well, pressure)?;
    }
    Ok(())
}

fn cmd_bowers(
    metadata: &Path,
    velocity: &str,
    coef: &BowersCoefficients,
    unloading_depth: Option<f64>,
    save: bool,
) -> WellResult<()> {
    let mut well = Well::load(metadata)?;
    let vel = well.get_single_log(velocity, DepthReference::KellyBushing)?;
    let transition_index = match unloading_depth {
        Some(depth) => well.depth_index(depth)?,
        None => vel.len(),
    };
    let pressure = well.bowers(vel.data(), transition_index, coef)?;
    print_summary(&pressure);
    if save {
        save_result(metadata, &mut well, pressure)?;
    }
    Ok(())
}

fn print_summary(log: &Log) {
    let valid: Vec<f64> = log.samples().map(|(_, p)| p).collect();
    let missing = log.len() - valid.len();
    println!(
        "{} [{}] ({} samples, {} missing)",
        log.description(),
        log.property_type().code(),
        log.len(),
        missing
    );
    if let (Some(min), Some(max)) = (
        valid.iter().copied().reduce(f64::min),
        valid.iter().copied().reduce(f64::max),
    ) {
        println!("  range: {min:.3} - {max:.3} {}", log.units());
    }
}

fn save_result(metadata: &Path, well: &mut Well, log: Log) -> WellResult<()> {
    let base = metadata.parent().unwrap_or(Path::new("."));
    let store = well
        .metadata()
        .store_path(base)
        .ok_or_else(|| WellError::NoStore {
            well: well.name().to_string(),
        })?;

    well.add_log(&[log])?;
    well.save(&mut JsonFileStore::new(&store))?;
    tracing::info!(well = well.name(), store = %store.display(), "saved well table");
    Ok(())
}
