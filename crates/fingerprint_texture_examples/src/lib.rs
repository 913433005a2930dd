#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, rasterize_commands, render_commands_to_png, RenderConfig};
