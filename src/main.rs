use prevalence::{image::io::Reader as ImageReader, Palette, DEFAULT_MAX_COLORS, DEFAULT_STRIDE};
use std::error::Error;

const USAGE: &str = "usage: prevalence <image> [stride] [max colors]";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or(USAGE)?;
    let stride = args.next().map(|arg| arg.parse::<usize>()).transpose()?.unwrap_or(DEFAULT_STRIDE);
    let max_colors = args
        .next()
        .map(|arg| arg.parse::<usize>())
        .transpose()?
        .unwrap_or(DEFAULT_MAX_COLORS);

    let img = ImageReader::open(&path)?.decode()?;
    let buf = img.to_rgba8();

    let palette = Palette::from_image(&buf)
        .stride(stride)
        .max_colors(max_colors)
        .parallel(true)
        .generate()?;

    println!("{} pixels sampled from {}", palette.total_sampled(), path);

    for swatch in &palette {
        println!(
            "{}  {:<20} {:<22} {:>6.2}%  {:?}",
            swatch.hex(),
            swatch.css_rgb(),
            swatch.css_hsl(),
            swatch.percentage(),
            swatch.brightness()
        );
    }

    println!();
    print!("{}", palette.to_css_variables());

    Ok(())
}
