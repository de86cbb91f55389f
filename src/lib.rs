//! # plotview
//!
//! Bessel function, intensity field, contour field and RGB gradient plots
//! rendered to PNG files, and the loader that scales them back for display.
//!
//! ```no_run
//! use plotview::{image_io, Config, Plotter};
//!
//! let config = Config::default();
//! let path = Plotter::new(&config).bessel(config.get_order())?;
//! let image = image_io::load_scaled(path, config.get_max_image_size())?;
//! # Ok::<(), plotview::Error>(())
//! ```

pub mod bessel;
pub mod config;
pub mod error;
pub mod field;
pub mod image_io;
pub mod optimize;
pub mod plot;
pub mod special;

pub use bessel::BesselCurve;
pub use config::Config;
pub use error::Error;
pub use image_io::{ScaledImage, MAX_IMAGE_SIZE};
pub use plot::{Figure, PlotKind, Plotter};

pub type Result<T> = std::result::Result<T, Error>;
