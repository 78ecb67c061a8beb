use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a textured OBJ mesh with an isometric ray caster
#[derive(Debug, Parser)]
#[command(name = "isotrace")]
#[command(about = "Render a textured OBJ mesh to a 256x256 PNG with an isometric ray caster")]
pub struct Args {
    /// Texture image (any format the image crate decodes; must be RGBA)
    #[arg(long, default_value = "bnuuy.png")]
    pub texture: PathBuf,

    /// Triangulated OBJ mesh with texture coordinates
    #[arg(long, default_value = "bnuuy.obj")]
    pub mesh: PathBuf,

    /// Output PNG path, written only if the render succeeds
    #[arg(short, long, default_value = "a.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
