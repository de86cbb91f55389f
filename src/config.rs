use std::{
    env::{self, VarError},
    path::{Path, PathBuf},
};

use crate::{image_io::MAX_IMAGE_SIZE, plot::Figure};

/// Environment variable overriding the default output directory
pub const OUTPUT_DIR_ENV: &str = "PLOTVIEW_OUTPUT_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PLOTVIEW_OUTPUT_DIR is not a valid unicode path")]
    Env(#[from] VarError),
    #[error("the Bessel function order must be at most {0}")]
    Order(u32),
}
type Result<T> = std::result::Result<T, ConfigError>;

/// Largest supported Bessel function order
pub const MAX_ORDER: u32 = 50;

/// Application settings
#[derive(Debug, Clone)]
pub struct Config {
    output_dir: PathBuf,
    order: u32,
    max_image_size: u32,
    figure: Figure,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            order: 3,
            max_image_size: MAX_IMAGE_SIZE,
            figure: Figure::default(),
        }
    }
}
impl Config {
    /// Default settings with the output directory read from `PLOTVIEW_OUTPUT_DIR`, if set
    pub fn from_env() -> Result<Self> {
        match env::var(OUTPUT_DIR_ENV) {
            Ok(dir) => Ok(Self::default().output_dir(dir)),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
    pub fn output_dir<P: AsRef<Path>>(self, output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            ..self
        }
    }
    pub fn order(self, order: u32) -> Result<Self> {
        if order > MAX_ORDER {
            return Err(ConfigError::Order(MAX_ORDER));
        }
        Ok(Self { order, ..self })
    }
    pub fn max_image_size(self, max_image_size: u32) -> Self {
        Self {
            max_image_size: max_image_size.max(1),
            ..self
        }
    }
    pub fn figure(self, figure: Figure) -> Self {
        Self { figure, ..self }
    }
    pub fn get_output_dir(&self) -> &Path {
        &self.output_dir
    }
    pub fn get_order(&self) -> u32 {
        self.order
    }
    pub fn get_max_image_size(&self) -> u32 {
        self.max_image_size
    }
    pub fn get_figure(&self) -> Figure {
        self.figure
    }
}
