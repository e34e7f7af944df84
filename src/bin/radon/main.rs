mod cli;

fn main() -> Result<(), Box<dyn Error>> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let Cli { config, interpolation, threads, command } = Cli::parse();

    let mut progress = Progress::new();

    progress.start("Reading configuration");
    let file = read_config_file(&config)?;
    let config = Config {
        interpolation: interpolation.unwrap_or(file.interpolation),
        threads      : threads.or(file.threads),
        ..file
    };
    config.validate()?;
    progress.done_with_message(&format!("Read configuration {config:?}"));

    let angles = config.angles.count;
    let r_size = config.radial_samples;

    match command {
        Command::Project { input, shape: (rows, cols), output } => {
            progress.start("Reading image");
            let image = Image::from_raw_file(&input, rows, cols)?;
            progress.done_with_message(&format!("Read {rows} x {cols} image from {input:?}"));

            progress.start("Projecting");
            let sinogram = config.project(&image)?;
            progress.done_with_message(&format!(
                "Projected {} pixels over {angles} angles, {r_size} radial samples ({:?}, {:?})",
                group_digits(rows * cols), config.method, config.backend,
            ));

            write(&output, |path| sinogram.write_to_raw_file(path))?;
            progress.done_with_message(&format!("Wrote sinogram to {output:?}"));
        }
        Command::Backproject { input, size, output } => {
            let config = Config { image_size: size.or(config.image_size), ..config };
            config.validate()?;

            progress.start("Reading sinogram");
            let sinogram = Sinogram::from_raw_file(&input, r_size, angles)?;
            progress.done_with_message(&format!("Read {r_size} x {angles} sinogram from {input:?}"));

            progress.start("Backprojecting");
            let image = config.backproject(&sinogram)?;
            let n = config.image_size();
            progress.done_with_message(&format!("Backprojected into {} pixels ({:?})", group_digits(n * n), config.backend));

            write(&output, |path| image.write_to_raw_file(path))?;
            progress.done_with_message(&format!("Wrote image to {output:?}"));
        }
    }
    Ok(())
}

/// Create any missing parent directories of `path`, then write it
fn write(path: &Path, writer: impl FnOnce(&Path) -> radon::Result<()>) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(writer(path)?)
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::error::Error;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use radon::{
    Image, Sinogram,
    config::{read_config_file, Config},
    utils::{group_digits, timing::Progress},
};
