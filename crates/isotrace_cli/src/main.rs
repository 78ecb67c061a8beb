use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageFormat;
use isotrace_core::load_scene;
use isotrace_renderer::{render, Framebuffer, IsometricCamera};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting isotrace");

    let scene = load_scene(&args.texture, &args.mesh).with_context(|| {
        format!(
            "loading scene from {} and {}",
            args.texture.display(),
            args.mesh.display()
        )
    })?;

    let camera = IsometricCamera::default();
    let image = render(&scene, &camera).context("rendering scene")?;

    write_png(&image, &args.output)?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}

/// Encode the framebuffer as PNG whatever the extension of `path`.
fn write_png(image: &Framebuffer, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_output_is_png_regardless_of_extension() {
        let dir = std::env::temp_dir().join(format!("isotrace_cli_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let image = Framebuffer::from_pixel(3, 2, Rgba([10, 20, 30, 40]));

        for name in ["out", "out.jpg"] {
            let path = dir.join(name);
            write_png(&image, &path).unwrap();

            let bytes = std::fs::read(&path).unwrap();
            assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
            let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
            assert_eq!(decoded, image);
        }

        std::fs::remove_dir_all(&dir).ok();
    }
}
