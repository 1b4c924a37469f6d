use tracing_subscriber::EnvFilter;

/// Picks the log filter for the command line flags. `RUST_LOG` wins when set.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

pub fn init(verbose: bool, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose, quiet))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
