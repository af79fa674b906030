/// TOML-based server configuration (`triad.toml`).
pub mod toml_config;
