use std::path::Path;

use fingerprint_texture::pen::PenCommand;
use glam::DVec2;
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// How recorded pen commands are mapped to pixels.
///
/// The pen's origin lands on the image center and y points up.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    pub stroke: [u8; 3],
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            background: [255, 255, 255],
            stroke: [0, 0, 0],
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_stroke(mut self, stroke: [u8; 3]) -> Self {
        self.stroke = stroke;
        self
    }

    fn to_pixel(&self, p: DVec2) -> (i64, i64) {
        let (w, h) = self.image_size;
        let x = (w as f64 / 2.0 + p.x).round() as i64;
        let y = (h as f64 / 2.0 - p.y).round() as i64;
        (x, y)
    }
}

/// Draws every line command into a fresh image. Pixels outside the image are clipped.
pub fn rasterize_commands(commands: &[PenCommand], rc: &RenderConfig) -> RgbImage {
    let (w, h) = rc.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(rc.background));

    let mut cursor = rc.to_pixel(DVec2::ZERO);
    for command in commands {
        let next = rc.to_pixel(command.point());
        if let PenCommand::Line(_) = command {
            draw_line(&mut img, cursor, next, Rgb(rc.stroke));
        }
        cursor = next;
    }

    img
}

/// Rasterizes `commands` and writes them to `path` as PNG.
pub fn render_commands_to_png(
    commands: &[PenCommand],
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let img = rasterize_commands(commands, rc);
    img.save(path)?;
    info!(
        "Wrote {} ({}x{}, {} commands).",
        path.display(),
        rc.image_size.0,
        rc.image_size.1,
        commands.len()
    );
    Ok(())
}

// Bresenham.
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_clipped(img, x, y, color);
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn put_clipped(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && x < i64::from(img.width()) && y < i64::from(img.height()) {
        img.put_pixel(x as u32, y as u32, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: [u8; 3] = [0, 0, 0];

    fn ink_count(img: &RgbImage) -> usize {
        img.pixels().filter(|p| p.0 == INK).count()
    }

    #[test]
    fn origin_maps_to_center_with_y_up() {
        let rc = RenderConfig::new((100, 50));
        assert_eq!(rc.to_pixel(DVec2::ZERO), (50, 25));
        assert_eq!(rc.to_pixel(DVec2::new(10.0, 5.0)), (60, 20));
    }

    #[test]
    fn lines_are_drawn_and_jumps_are_not() {
        let rc = RenderConfig::new((20, 20));
        let commands = [
            PenCommand::Line(DVec2::new(5.0, 0.0)),
            PenCommand::Jump(DVec2::new(-5.0, -5.0)),
        ];
        let img = rasterize_commands(&commands, &rc);
        assert_eq!(ink_count(&img), 6);
        assert_eq!(img.get_pixel(15, 10).0, INK);
        assert_eq!(img.get_pixel(5, 15).0, [255, 255, 255]);
    }

    #[test]
    fn diagonal_line_is_connected() {
        let rc = RenderConfig::new((20, 20));
        let commands = [
            PenCommand::Jump(DVec2::new(-3.0, -3.0)),
            PenCommand::Line(DVec2::new(3.0, 3.0)),
        ];
        let img = rasterize_commands(&commands, &rc);
        assert_eq!(ink_count(&img), 7);
    }

    #[test]
    fn out_of_bounds_strokes_are_clipped() {
        let rc = RenderConfig::new((10, 10)).with_stroke([200, 0, 0]);
        let commands = [
            PenCommand::Jump(DVec2::new(-50.0, 0.0)),
            PenCommand::Line(DVec2::new(50.0, 0.0)),
        ];
        let img = rasterize_commands(&commands, &rc);
        assert_eq!(img.pixels().filter(|p| p.0 == [200, 0, 0]).count(), 10);
    }
}
