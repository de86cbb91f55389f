use crate::{
    config::ConfigError, image_io::ImageError, optimize::OptimizeError, plot::PlotError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `config` module")]
    Config(#[from] ConfigError),
    #[error("Error in the `optimize` module")]
    Optimize(#[from] OptimizeError),
    #[error("Error in the `plot` module")]
    Plot(#[from] PlotError),
    #[error("Error in the `image_io` module")]
    Image(#[from] ImageError),
}
