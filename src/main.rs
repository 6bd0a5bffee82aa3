use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use cardscriber::canvas::{BackController, FrontController, Mount};
use cardscriber::config::{CanvasOptions, resolve_or_light};
use cardscriber::draw::Drawing;
use cardscriber::input::{PointerInput, PointerKind};
use cardscriber::util::lerp;

#[derive(Parser, Debug)]
#[command(name = "cardscriber")]
#[command(
    version,
    about = "Stroke capture and replay canvas engine for handwriting flashcards"
)]
struct Cli {
    /// Options file (TOML) with template-author overrides
    #[arg(long, short = 'o', value_name = "FILE")]
    options: Option<PathBuf>,

    /// Pointer-event script (JSON array) to feed the front canvas;
    /// a built-in two-stroke script is used when omitted
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Recorded drawing (JSON) to replay directly, skipping capture
    #[arg(long, value_name = "FILE")]
    drawing: Option<PathBuf>,

    /// Resolve the "auto" color scheme as dark mode
    #[arg(long, action = ArgAction::SetTrue)]
    dark: bool,

    /// Write the front surface to this PNG
    #[arg(long, value_name = "FILE")]
    front_out: Option<PathBuf>,

    /// Write the back surface to this PNG
    #[arg(long, value_name = "FILE")]
    back_out: Option<PathBuf>,

    /// Write the captured drawing to this JSON file
    #[arg(long, value_name = "FILE")]
    dump_drawing: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let options = match &cli.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read options from {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse options from {}", path.display()))?
        }
        None => CanvasOptions::default(),
    };

    let config = options.resolve();
    let scheme = resolve_or_light(&config.scheme_name, cli.dark, &config.schemes);

    let drawing = match &cli.drawing {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read drawing from {}", path.display()))?;
            let drawing: Drawing = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse drawing from {}", path.display()))?;
            log::info!(
                "Replaying recorded drawing with {} strokes",
                drawing.stroke_count()
            );
            drawing
        }
        None => {
            let script = match &cli.script {
                Some(path) => {
                    let text = fs::read_to_string(path)
                        .with_context(|| format!("Failed to read script from {}", path.display()))?;
                    serde_json::from_str(&text)
                        .with_context(|| format!("Failed to parse script from {}", path.display()))?
                }
                None => sample_script(config.front_size as f64),
            };

            let mut front = FrontController::new(
                config.clone(),
                scheme.clone(),
                Some(Mount::square(config.front_size)),
            );
            for event in &script {
                front.handle_input(event);
            }
            log::info!(
                "Captured {} strokes ({} samples dropped)",
                front.drawing().stroke_count(),
                front.dropped_samples()
            );

            if let Some(path) = &cli.front_out {
                write_png(path, |out| front.write_png(out))?;
            }

            front.finish()
        }
    };

    if cli.drawing.is_some() && cli.front_out.is_some() {
        log::warn!("--front-out ignored: replaying a recorded drawing has no front capture");
    }

    if let Some(path) = &cli.dump_drawing {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &drawing)
            .with_context(|| format!("Failed to write drawing to {}", path.display()))?;
    }

    let back = BackController::new(
        &config,
        &scheme,
        &drawing,
        Some(Mount::square(config.back_size)),
    );
    if let Some(path) = &cli.back_out {
        write_png(path, |out| back.write_png(out))?;
    }

    println!(
        "{} strokes replayed at {}x{} (scale {:.3})",
        drawing.stroke_count(),
        config.back_size,
        config.back_size,
        config.replay_scale()
    );

    Ok(())
}

fn write_png<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> std::result::Result<(), cairo::IoError>,
{
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write(&mut file).with_context(|| format!("Failed to write PNG to {}", path.display()))?;
    Ok(())
}

/// Built-in demo script: a pressure-swelling wave and a straight mouse line,
/// sized relative to the front canvas.
fn sample_script(size: f64) -> Vec<PointerInput> {
    let mut events = Vec::new();
    let steps = 24;

    events.push(PointerInput::press(
        PointerKind::Pen,
        0.15 * size,
        0.3 * size,
        Some(0.15),
        0.0,
    ));
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let x = lerp(0.15, 0.85, t) * size;
        let y = (0.3 + 0.4 * t + 0.06 * (t * std::f64::consts::PI * 3.0).sin()) * size;
        let pressure = 0.15 + 0.8 * (t * std::f64::consts::PI).sin();
        events.push(PointerInput::moved(
            PointerKind::Pen,
            x,
            y,
            Some(pressure),
            i as f64 * 8.0,
        ));
    }
    events.push(PointerInput::release(
        PointerKind::Pen,
        0.85 * size,
        0.7 * size,
        Some(0.2),
        steps as f64 * 8.0,
    ));

    let t0 = (steps + 4) as f64 * 8.0;
    events.push(PointerInput::press(
        PointerKind::Mouse,
        0.5 * size,
        0.2 * size,
        None,
        t0,
    ));
    for i in 1..8 {
        events.push(PointerInput::moved(
            PointerKind::Mouse,
            0.5 * size,
            (0.2 + 0.075 * i as f64) * size,
            None,
            t0 + i as f64 * 8.0,
        ));
    }
    events.push(PointerInput::release(
        PointerKind::Mouse,
        0.5 * size,
        0.8 * size,
        None,
        t0 + 64.0,
    ));

    events
}
