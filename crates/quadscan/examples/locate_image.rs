use quadscan::detect;
use quadscan::overlay::{draw_quadrilateral, OverlayStyle};
use quadscan::LocateConfig;

#[cfg(feature = "tracing")]
use quadscan::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use quadscan::core::init_with_level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    init_with_level(log::LevelFilter::Info)?;
    #[cfg(feature = "tracing")]
    init_tracing(false);

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("Usage: locate_image <image_path> [config.json]");
        return Ok(());
    };
    let config = match args.next() {
        Some(cfg) => LocateConfig::load_json(cfg)?,
        None => LocateConfig::default(),
    };

    let img = detect::load_image(&path)?;
    let located = detect::locate_in_image(&img, &config)?;
    println!("mode: {:?}, found: {}", located.mode(), located.is_found());

    if let Some(quad) = located.quad() {
        println!("corners: {:?}", quad.points());
        let drawn = draw_quadrilateral(&img.to_rgb8(), &quad, &OverlayStyle::default());
        drawn.save("located.png")?;
        println!("wrote located.png");
    }
    Ok(())
}
