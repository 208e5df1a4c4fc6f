use std::error::Error;

use cloudnoise::{NoiseField, OctaveParameters, RenderParameters};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let repeat = 4;
    let tile_size = 256;
    let image_width = tile_size * 2;
    let image_height = tile_size * 2;

    let field = NoiseField::new(repeat);
    let scale = tile_size as f64 / repeat as f64;
    let params = RenderParameters::new(tile_size, tile_size, scale, 0.5)?;
    let octaves = OctaveParameters::new(4, 0.5)?;
    let tile = field.render(&params, &octaves);
    let intensities = tile.to_intensities();

    let mut image_buf = image::GrayImage::new(image_width as u32, image_height as u32);
    for iy in 0..image_height {
        for ix in 0..image_width {
            let v = intensities[(iy % tile_size) * tile_size + ix % tile_size];
            image_buf.put_pixel(ix as u32, iy as u32, image::Luma([v]));
        }
    }

    std::fs::create_dir_all("out")?;
    image_buf.save("out/tile.png")?;
    log::info!("saved out/tile.png");

    Ok(())
}
