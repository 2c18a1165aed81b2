//! air_canvas — interactive entry point.

use air_canvas::app::{run, AppConfig};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Air Canvas — gesture-driven vector sketching          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Mode: mouse simulation (synthetic hand follows the cursor)");
    println!("    hold left  = pinch-draw");
    println!("    hold right = cycle tool");
    println!("    hover CLEAR ~600 ms = wipe canvas   (c = immediate, q = quit)");
    println!();
    println!("  Opening window…");
    println!();

    if let Err(e) = run(AppConfig::default()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
