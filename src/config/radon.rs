//! Configuration file parser for forward projection and backprojection

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

use units::{rad_, Angle};

use crate::{
    backprojector::{default_image_size, Backprojector},
    device::{self, HostQueue},
    error::{RadonError, Result},
    image::Image,
    interpolation::Interpolation,
    parallel::Schedule,
    projector::{ForwardProjector, Joseph, PixelDriven},
    sinogram::Sinogram,
};

fn deserialize_uom<'d, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    String::deserialize(deserializer)?
        .parse::<T>()
        .map_err(de::Error::custom)
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// Kernel used by the Joseph forward projector
    #[serde(default)]
    pub interpolation: Interpolation,

    #[serde(default)]
    pub method: Method,

    #[serde(default)]
    pub backend: Backend,

    /// Number of unit-spaced radial samples per projection
    pub radial_samples: usize,

    /// Side of the square backprojected image. Derived from
    /// `radial_samples` if absent.
    #[serde(default)]
    pub image_size: Option<usize>,

    /// Number of worker threads. rayon's default if absent.
    #[serde(default)]
    pub threads: Option<usize>,

    pub angles: AngleRange,
}

/// Forward projection algorithm
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    #[default]
    Joseph,
    PixelDriven,
}

/// Where the transforms run
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Angle loop on the host's worker threads
    #[default]
    Host,
    /// One kernel launch, through a `ComputeQueue`
    Device,
}

/// `count` equally spaced projection angles, starting at `start`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AngleRange {
    #[serde(deserialize_with = "deserialize_uom")]
    pub start: Angle,

    #[serde(deserialize_with = "deserialize_uom")]
    pub stop: Angle,

    pub count: usize,

    /// Whether `stop` itself is the last angle
    #[serde(default)]
    pub endpoint: bool,
}

impl AngleRange {

    /// The angles, in radians
    pub fn radians(&self) -> Vec<f64> {
        let (start, stop) = (rad_(self.start), rad_(self.stop));
        let intervals = if self.endpoint { self.count.saturating_sub(1) } else { self.count };
        let step = if intervals == 0 { 0.0 } else { (stop - start) / intervals as f64 };
        (0..self.count).map(|k| start + k as f64 * step).collect()
    }
}

impl Config {

    /// Reject values which parse, but cannot be used
    pub fn validate(&self) -> Result<()> {
        let fail = |message: &str| Err(RadonError::Config(message.into()));
        if self.radial_samples == 0   { return fail("`radial_samples` must be positive") }
        if self.image_size == Some(0) { return fail("`image_size` must be positive") }
        if self.threads    == Some(0) { return fail("`threads` must be positive") }
        if self.angles.count == 0     { return fail("`angles.count` must be positive") }
        Ok(())
    }

    pub fn schedule(&self) -> Schedule { Schedule::from_threads(self.threads) }

    pub fn radial(&self) -> Vec<f64> { geometry::centred_samples(self.radial_samples) }

    pub fn image_size(&self) -> usize {
        self.image_size.unwrap_or_else(|| default_image_size(self.radial_samples))
    }

    /// Forward project `image` with the configured method and backend
    pub fn project(&self, image: &Image) -> Result<Sinogram> {
        let (angles, radial) = (self.angles.radians(), self.radial());
        match (self.backend, self.method) {
            (Backend::Host, Method::Joseph) =>
                Joseph::new(self.interpolation).with_schedule(self.schedule()).project(image, &angles, &radial),
            (Backend::Host, Method::PixelDriven) =>
                PixelDriven::new(self.schedule()).project(image, &angles, &radial),
            (Backend::Device, Method::Joseph) =>
                device::project(&HostQueue::new(self.threads)?, image, &angles, &radial, self.interpolation),
            (Backend::Device, Method::PixelDriven) =>
                device::project_pixels(&HostQueue::new(self.threads)?, image, &angles, &radial),
        }
    }

    /// Backproject `sinogram` with the configured backend
    pub fn backproject(&self, sinogram: &Sinogram) -> Result<Image> {
        let (angles, n) = (self.angles.radians(), self.image_size());
        match self.backend {
            Backend::Host   => Backprojector::new(self.schedule()).backproject(sinogram, &angles, n),
            Backend::Device => device::backproject(&HostQueue::new(self.threads)?, sinogram, &angles, n),
        }
    }
}

pub fn read_config_file(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&text)?;
    config.validate()?;
    tracing::debug!(?path, ?config, "read configuration");
    Ok(config)
}


#[cfg(test)]
mod tests {
    use super::*;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use float_eq::assert_float_eq;
    use units::{deg, rad};
    use std::f64::consts::PI;

    // ----- Test an example on-disk config file -----------------------------------------
    #[test]
    fn test_config_file() {
        let config = read_config_file("radon-config.toml".as_ref()).unwrap();
        assert_eq!(config.interpolation , Interpolation::Linear);
        assert_eq!(config.method        , Method::Joseph);
        assert_eq!(config.backend       , Backend::Host);
        assert_eq!(config.radial_samples, 367);
        assert_eq!(config.image_size    , Some(256));
        assert_eq!(config.threads       , None);
        assert_eq!(config.angles.count  , 180);
        assert_eq!(config.angles.start  , deg(  0.0));
        assert_eq!(config.angles.stop   , deg(180.0));
        assert_eq!(config.schedule()    , Schedule::Parallel);
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let result = read_config_file("no-such-config.toml".as_ref());
        assert!(matches!(result, Err(RadonError::Io(_))));
    }

    // ----- Some helpers to make the tests more concise ---------------------------------
    // Every config needs these
    const REQUIRED: &str = r#"
        radial_samples = 11
        angles = { start = "0 rad", stop = "3 rad", count = 3 }
    "#;
    //  ---  Parse string as TOML, appending the required fields  -------------------------
    fn parse(input: &str) -> Config {
        parse_carefully(input).unwrap()
    }
    //  ---  Parse string as TOML, with explicit error reporting -------------------------
    fn parse_carefully(input: &str) -> std::result::Result<Config, toml::de::Error> {
        toml::from_str(&format!("{input}\n{REQUIRED}"))
    }
    //  ---  Macro for concise assertions about values of parsed fields -------------------
    macro_rules! check {
        ($text:expr => $($field:ident = $expected:expr);+$(;)?) => {
            let config = parse($text);
            println!("DESERIALIZED: {config:?}");
            $(assert_eq!(config.$field, $expected);)*
        }
    }
    // ----- Test deserializing of individual aspects of the Config type ----------------
    #[test]
    fn config_defaults() {
        check!{"" =>
               interpolation  = Interpolation::Linear;
               method         = Method::Joseph;
               backend        = Backend::Host;
               radial_samples = 11;
               image_size     = None;
               threads        = None;
        }
    }

    #[test]
    fn config_interpolation_by_name_or_code() {
        check!{r#"interpolation = "cubic""#     => interpolation = Interpolation::Cubic   }
        check!{r#"interpolation = "sinc-0.605""# => interpolation = Interpolation::Sinc0605}
        check!{r#"interpolation = "0""#         => interpolation = Interpolation::Siddon  }
    }

    #[test]
    fn config_method_and_backend() {
        check!{r#"
                 method  = "pixel-driven"
                 backend = "device"
                 threads = 4
               "# =>
               method  = Method::PixelDriven;
               backend = Backend::Device;
               threads = Some(4);
        }
    }

    // ----- Make sure that bad input is not accepted -----------------------------------
    #[test]
    fn config_reject_unknown_field() {
        assert!(parse_carefully("unknown_field = 666").is_err());
    }

    #[test]
    fn config_reject_unknown_kernel() {
        assert!(parse_carefully(r#"interpolation = "7""#).is_err());
        assert!(parse_carefully(r#"interpolation = "bilinear""#).is_err());
    }

    #[test]
    fn config_reject_missing_angles() {
        assert!(toml::from_str::<Config>("radial_samples = 3").is_err());
    }

    #[test]
    fn config_reject_angle_without_units() {
        let result = toml::from_str::<Config>(r#"
            radial_samples = 3
            angles = { start = "0", stop = "180 degrees", count = 4 }
        "#);
        assert!(result.is_err());
    }

    #[test]
    fn validation() {
        assert!(parse("").validate().is_ok());
        for bad in ["threads = 0", "image_size = 0"] {
            assert!(matches!(parse(bad).validate(), Err(RadonError::Config(_))), "{bad}");
        }
        let no_radial = toml::from_str::<Config>(r#"
            radial_samples = 0
            angles = { start = "0 rad", stop = "3 rad", count = 3 }
        "#).unwrap();
        assert!(matches!(no_radial.validate(), Err(RadonError::Config(_))));
    }

    // ----- Angles -----------------------------------------------------------------------
    #[test]
    fn angles_with_units() {
        let config: Config = toml::from_str(r#"
            radial_samples = 3
            [angles]
            start = "90 °"
            stop  = "0.5 revolutions"
            count = 2
        "#).unwrap();
        assert_eq!(config.angles.start, deg(90.0));
        assert_float_eq!(config.angles.radians(), vec![PI / 2.0, 3.0 * PI / 4.0], abs_all <= 1e-12);
    }

    #[test]
    fn angles_exclude_stop_by_default() {
        let range = AngleRange { start: deg(0.0), stop: deg(180.0), count: 4, endpoint: false };
        assert_float_eq!(range.radians(), vec![0.0, PI / 4.0, PI / 2.0, 3.0 * PI / 4.0], abs_all <= 1e-12);
    }

    #[test]
    fn angles_including_stop() {
        let range = AngleRange { start: rad(1.0), stop: rad(2.0), count: 3, endpoint: true };
        assert_float_eq!(range.radians(), vec![1.0, 1.5, 2.0], abs_all <= 1e-12);
        let single = AngleRange { count: 1, ..range };
        assert_eq!(single.radians(), vec![1.0]);
    }

    // ----- Dispatch to the transforms ---------------------------------------------------
    #[test]
    fn every_method_and_backend_agree_on_a_centred_point() {
        let mut image = Image::zeros(9, 9);
        image[(4, 4)] = 1.0;
        for (method, backend) in [(Method::Joseph     , Backend::Host  ),
                                  (Method::Joseph     , Backend::Device),
                                  (Method::PixelDriven, Backend::Host  ),
                                  (Method::PixelDriven, Backend::Device)] {
            let config = Config { method, backend, threads: Some(2), ..parse("") };
            let sinogram = config.project(&image).unwrap();
            // Every angle sees the point at r = 0, the central one of 11 bins
            for k in 0..3 {
                assert_float_eq!(sinogram.profile(k).sum(), sinogram[(5, k)], abs <= 1e-9);
                assert!(sinogram[(5, k)] >= 1.0 - 1e-9, "{method:?} {backend:?} angle {k}");
            }
            let backprojection = config.backproject(&sinogram).unwrap();
            assert_eq!(backprojection.shape(), (default_image_size(11), default_image_size(11)));
        }
    }
}
