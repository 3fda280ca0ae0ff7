//! Site builder for tissage projects.
//!
//! `init` prepares the output directory with the project's asset
//! directories, `build` then writes one loader shell per configured page.

pub mod config;
pub mod demo;
pub mod environment;
mod error;
pub mod pages;

pub use config::{ResolvedConfig, global_config, set_global_config};
pub use environment::{Environment, init_environment};
pub use error::{Result, SiteError};
pub use pages::{Page, ShellOptions, build_page, build_pages};

/// Copy the asset directories into the output.
pub fn init(config: &ResolvedConfig) -> Result<Environment> {
    init_environment(&config.output_dir, &config.asset_dirs)
}

/// Run [`init`], then generate every configured page. Returns one line per
/// generated page.
pub fn build(config: &ResolvedConfig) -> Result<Vec<String>> {
    init(config)?;
    let options = ShellOptions {
        brand: Some(config.title.clone()),
        wasm_bundle: config.wasm_bundle.clone(),
    };
    build_pages(&config.pages, &config.output_dir, &options)
}
