use fingerprint_texture::prelude::*;
use fingerprint_texture_examples::{init_tracing, render_commands_to_png, RenderConfig};
use glam::DVec2;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Same seed and pole layout for every falloff, so only the decay differs.
    let config = GeneratorConfig::new(DVec2::new(400.0, 400.0))
        .with_seed(7)
        .with_radius(2.0)
        .with_pole_distance_cutoff(80.0);

    for falloff in Falloff::ALL {
        let mut generator = FingerprintGenerator::new(config.clone())?;
        generator.add_pole(0.0, 0.0, 40.0, falloff);
        generator.add_pole(-50.0, 30.0, 25.0, falloff);
        generator.add_pole(40.0, -45.0, 30.0, falloff);

        let pen = RecordingPen::new().with_transform(Transform::Scale(3.0));
        let mut walker = Walker::new(pen);
        run_to_completion(&mut generator, &mut walker, None, &mut ());

        let rc = RenderConfig::new((1000, 1000));
        let out = format!("fingerprint-falloff-{falloff}.png");
        render_commands_to_png(walker.pen().commands(), &rc, out)?;
    }

    Ok(())
}
