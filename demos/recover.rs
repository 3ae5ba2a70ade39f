//! Recover an RGBA image from white/black background captures.
//!
//! Usage:
//! ```sh
//! cargo run --example recover -- on_white.png on_black.png out.png
//! ```

use std::env;
use std::path::Path;
use std::process;

use alpha_recovery::recover_file;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <white-capture> <black-capture> <output>", args[0]);
        eprintln!(
            "Example: {} logo_on_white.png logo_on_black.png logo.png",
            args[0]
        );
        process::exit(1);
    }

    let (white, black, output) = (&args[1], &args[2], &args[3]);
    if let Err(e) = recover_file(Path::new(white), Path::new(black), Path::new(output)) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    println!("Recovered image written to {output}");
}
