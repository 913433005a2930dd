use fingerprint_texture::prelude::*;
use fingerprint_texture_examples::{init_tracing, render_commands_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Optional seed as the first argument.
    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(3);

    // Smaller canvases and a larger radius give quick previews.
    let config = GeneratorConfig::default().with_seed(seed);
    let mut generator = FingerprintGenerator::new(config)?;
    generator.add_random_poles(20, 0.0, 50.0, Falloff::Logistic);

    let pen = RecordingPen::new().with_transform(Transform::Scale(2.5));
    let mut walker = Walker::new(pen);

    let mut restarts = 0usize;
    let mut sink = FnSink::new(|event| {
        if let TraceEvent::Restarted { .. } = event {
            restarts += 1;
        }
    });
    let result = run_to_completion(&mut generator, &mut walker, None, &mut sink);
    drop(sink);
    tracing::info!("{} segments, {} restarts.", result.segments, restarts);

    let rc = RenderConfig::new((1400, 1400));
    let out = format!("{}.png", generator.file_stem());
    render_commands_to_png(walker.pen().commands(), &rc, out)?;

    Ok(())
}
