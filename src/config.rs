pub mod radon;

pub use radon::{read_config_file, AngleRange, Backend, Config, Method};
