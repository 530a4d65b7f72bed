use super::CLAP_ARGS;
use crate::window::{self, DEFAULT_OVERSCAN, LayoutParams, WindowInput};
use anyhow::Result;
use clap::ArgMatches;
use std::fmt::Write;

/// Runs the non-interactive subcommands. Returns `false` when the viewer
/// should start instead.
pub fn handle_subcommands() -> bool {
    let res = match CLAP_ARGS.subcommand() {
        Some(("window", args)) => handle_window_subcommand(args).map(|report| print!("{report}")),
        _ => return false,
    };

    if let Err(e) = res {
        eprintln!("{e:?}");
    }

    true
}

fn handle_window_subcommand(args: &ArgMatches) -> Result<String> {
    let input = WindowInput {
        scroll_offset: args.get_one::<f64>("offset").copied().unwrap_or_default(),
        container_height: args
            .get_one::<f64>("container_height")
            .copied()
            .unwrap_or_default(),
        item_count: args.get_one::<usize>("count").copied().unwrap_or_default(),
        layout: LayoutParams::new(
            args.get_one::<f64>("item_height").copied().unwrap_or_default(),
            args.get_one::<usize>("overscan")
                .copied()
                .unwrap_or(DEFAULT_OVERSCAN),
        )?,
    };

    report(&input)
}

fn report(input: &WindowInput) -> Result<String> {
    let window = window::compute_window(input)?;
    let mut report = String::new();

    match window.range {
        Some(range) => writeln!(
            report,
            "range:         {}..={} ({} items)",
            range.start,
            range.end,
            range.count()
        )?,
        None => writeln!(report, "range:         empty")?,
    }
    writeln!(report, "total height:  {}", window.total_height)?;
    writeln!(report, "render offset: {}", window.render_offset)?;
    writeln!(report, "scroll offset: {}", window.scroll_offset)?;

    Ok(report)
}
