//! hand_mouse — interactive entry point.

use hand_mouse::app::run;
use hand_mouse::config::{AppConfig, Command, USAGE};
use pinch_pointer::LoopExit;

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           Hand Mouse — index to point, pinch to click        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse simulation  (use --features leap for hardware)");
    println!();

    let cfg = match AppConfig::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(cfg)) => cfg,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    println!("  Opening visualizer window…");
    println!();

    match run(cfg) {
        Ok(summary) => {
            let why = match summary.exit {
                LoopExit::SourceExhausted => "input closed",
                LoopExit::StopRequested   => "quit requested",
            };
            println!(
                "  Stopped ({}): {} frames, {} with a hand, {} clicks.",
                why, summary.stats.frames, summary.stats.hand_frames, summary.stats.clicks
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
