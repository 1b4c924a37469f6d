use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-compressor",
    about = "Downsize an image to a size and dimension budget",
    long_about = "img-compressor takes one image, scales its longer side down to a pixel limit and \
                  re-encodes it in the same format until it fits a megabyte budget. \
                  It reports progress and the before/after sizes, then saves the result \
                  as <name>-compressed.<ext>.",
    version,
    after_help = "EXAMPLES:\n  \
    img-compressor compress photo.jpg\n  \
    img-compressor compress photo.png -m 0.5 -w 800 -o ./out\n  \
    img-compressor -v compress scan.jpg --config compressor.toml"
)]
pub struct Args {
    #[arg(short, long, global = true, help = "Show debug output, including every progress step")]
    pub verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Only print errors")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a single image file",
        long_about = "Compress a single image so that its longer side is at most the given \
                      number of pixels and its size at most the given number of megabytes."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            short = 'm',
            long,
            help = "Max size in MB (default: 1)",
            long_help = "Target upper bound on the output size, in megabytes. \
                         Fractions such as 0.5 are allowed."
        )]
        max_size_mb: Option<String>,

        #[arg(
            short = 'w',
            long,
            help = "Max width or height in pixels (default: 1024, minimum: 128)",
            long_help = "Upper bound on the output's longer side. The aspect ratio is preserved \
                         and smaller images are never enlarged."
        )]
        max_width_or_height: Option<String>,

        #[arg(
            short = 'o',
            long,
            help = "Directory for the compressed file (default: next to the input)"
        )]
        output_dir: Option<PathBuf>,

        #[arg(short = 'c', long, help = "TOML configuration file")]
        config: Option<PathBuf>,

        #[arg(
            long,
            help = "Do not guard against overlapping submissions",
            long_help = "By default a second submission is rejected while one is running. \
                         With this flag both run and the last one to finish wins."
        )]
        allow_concurrent: bool,
    },
}
