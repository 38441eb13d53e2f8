use std::path::PathBuf;

/// Errors raised while setting up or configuring the simulation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Terrain error: {0}")]
    World(#[from] hovercraft_world::Error),

    #[error("Renderer error: {0}")]
    Renderer(#[from] hovercraft_renderer::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
