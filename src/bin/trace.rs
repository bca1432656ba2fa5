//! Movement-trace companion
//!
//! ```text
//! trace plot    [CSV] [OUT]          static plot (PNG, or SVG by extension)
//! trace animate [CSV] [OUT] [LOOPS]  pen animation as an animated GIF
//! ```
//!
//! CSV defaults to `./result1.csv` and must have `x` and `y` columns.

use std::error::Error;

use spring_study::output::plot_trace;
use spring_study::trace::{load_trace, render_trace_gif, AnimationConfig, DEFAULT_TRACE_PATH};

const USAGE: &str = "usage: trace plot|animate [CSV] [OUT] [LOOPS]";

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mode = args.first().map(String::as_str).ok_or(USAGE)?;
    let csv = args.get(1).map(String::as_str).unwrap_or(DEFAULT_TRACE_PATH);
    let trace = load_trace(csv)?;
    log::info!("loaded {} points from {}", trace.len(), csv);

    match mode {
        "plot" => {
            let out = args.get(2).map(String::as_str).unwrap_or("movement.png");
            plot_trace(&trace, out, None)?;
            println!("Trace plot written to {out}");
        }
        "animate" => {
            let out = args.get(2).map(String::as_str).unwrap_or("movement.gif");
            let loops = match args.get(3) {
                Some(raw) => raw
                    .parse::<usize>()
                    .map_err(|e| format!("invalid loop count `{raw}`: {e}"))?,
                None => 1,
            };
            let summary = render_trace_gif(&trace, &AnimationConfig::default(), out, loops)?;
            println!(
                "Animation written to {out} ({} loop(s), {} points)",
                summary.loops_completed, summary.points_drawn
            );
        }
        other => return Err(format!("unknown mode `{other}`\n{USAGE}").into()),
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run().inspect_err(|error| log::error!("trace failed: {error}"))
}
