use std::path::PathBuf;
use std::process;

use clap::Parser;

use alpha_recovery::recover_file;

#[derive(Parser)]
#[command(
    name = "alpha-recover",
    about = "Recover an image's alpha channel from captures over white and black backgrounds",
    version,
    after_help = "Example: alpha-recover logo_on_white.png logo_on_black.png logo.png\n\
                  The two captures must be pixel-identical apart from the background."
)]
struct Cli {
    /// Capture of the image composited over a pure white background
    white: PathBuf,

    /// Capture of the image composited over a pure black background
    black: PathBuf,

    /// Output path for the recovered RGBA image (PNG, WebP or TIFF)
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = recover_file(&cli.white, &cli.black, &cli.output) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    eprintln!("[OK] wrote {}", cli.output.display());
}
