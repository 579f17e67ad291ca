//! Logging init: structured logs on stderr, leaving stdout for results.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset, by `-v` count.
fn default_directives(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn,nozomi=info",
        1 => "warn,nozomi=debug",
        _ => "debug",
    }
}

/// Initialize logging to stderr. `RUST_LOG` overrides the verbosity flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_by_verbosity() {
        assert_eq!(default_directives(0, false), "warn,nozomi=info");
        assert_eq!(default_directives(1, false), "warn,nozomi=debug");
        assert_eq!(default_directives(3, false), "debug");
        assert_eq!(default_directives(2, true), "error");
    }
}
