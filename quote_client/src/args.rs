//! Command-line arguments for the Quote Client.
//!
//! The endpoint and refresh interval are fixed; the only knob is log verbosity.
use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Shows a random quote and refreshes it every 10 seconds", long_about = None)]
pub struct Args {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[clap(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_defaults_to_off() {
        assert!(!Args::parse_from(["quote_client"]).verbose);
        assert!(Args::parse_from(["quote_client", "-v"]).verbose);
        assert!(Args::parse_from(["quote_client", "--verbose"]).verbose);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Args::try_parse_from(["quote_client", "--url", "http://x"]).is_err());
    }
}
