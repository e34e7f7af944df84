#[derive(clap::Parser, Debug, Clone)]
#[clap(name = "radon", about = "Parallel-beam Radon transform and its adjoint")]
pub struct Cli {

    /// TOML configuration: angles, radial samples, method, backend
    #[clap(short, long, default_value = "radon-config.toml")]
    pub config: PathBuf,

    /// Override the configured interpolation kernel (name or code 0-5)
    #[clap(short, long)]
    pub interpolation: Option<Interpolation>,

    /// Override the configured number of worker threads
    #[clap(short = 'j', long)]
    pub threads: Option<usize>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {

    /// Forward project a raw image into a sinogram
    Project {
        /// Raw little-endian f64 image, row by row
        #[clap(short, long)]
        input: PathBuf,

        /// Image shape, as `rows,cols`
        #[clap(short, long, value_parser = parse_pair::<usize>)]
        shape: (usize, usize),

        /// Where to write the sinogram (radial samples by angles, row by row)
        #[clap(short, long, default_value = "sinogram.raw")]
        output: PathBuf,
    },

    /// Backproject a raw sinogram into a square image
    Backproject {
        /// Raw little-endian f64 sinogram, radial samples by angles, row by row
        #[clap(short, long)]
        input: PathBuf,

        /// Override the configured image size
        #[clap(short = 'n', long)]
        size: Option<usize>,

        /// Where to write the image
        #[clap(short, long, default_value = "backprojection.raw")]
        output: PathBuf,
    },
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::path::PathBuf;

use radon::{
    Interpolation,
    utils::parse_pair,
};
