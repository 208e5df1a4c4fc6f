use std::{error::Error, path::PathBuf, time::Instant};

use cloudnoise::{NoiseField, OctaveParameters, RenderParameters};

// usage: clouds [octaves] [persistence] [output_dir]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let octaves: u32 = args.next().map_or(Ok(1), |s| s.parse())?;
    let persistence: f64 = args.next().map_or(Ok(0.5), |s| s.parse())?;
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "out".to_string()));

    let octave_params = OctaveParameters::new(octaves, persistence)?;
    let render_params = RenderParameters::default();
    let field = NoiseField::default();

    let start = Instant::now();
    let grid = field.render_par(&render_params, &octave_params);
    log::info!(
        "rendered {}x{} clouds in {:?}",
        grid.width(),
        grid.height(),
        start.elapsed()
    );

    let image_buf = image::GrayImage::from_raw(
        grid.width() as u32,
        grid.height() as u32,
        grid.to_intensities(),
    )
    .ok_or("grid does not fit the image buffer")?;

    std::fs::create_dir_all(&out_dir)?;
    let file_name = format!(
        "perlin_2d_vis_{}_octaves_{}_persistence.png",
        octaves, persistence
    );
    let path = out_dir.join(file_name);
    image_buf.save(&path)?;
    log::info!("saved {}", path.display());

    Ok(())
}
