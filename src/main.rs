//! wordsplit - split stdin lines into words.

use wordsplit::audit::AuditLogger;
use wordsplit::config::Config;
use wordsplit::output::format_words;
use wordsplit::split::split;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_env("WORDSPLIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Load and validate config
    let cwd = std::env::current_dir().ok();
    let settings = match Config::load(cwd.as_deref()).and_then(Config::compile) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("wordsplit: config error: {}", e);
            return ExitCode::from(1);
        }
    };
    debug!(?settings, "loaded settings");

    // Audit logging (if enabled)
    let mut audit = settings
        .audit_path
        .as_deref()
        .and_then(|path| match AuditLogger::open(path) {
            Ok(logger) => Some(logger),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot open audit log");
                None
            }
        });

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = false;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("wordsplit: failed to read input: {}", e);
                return ExitCode::from(1);
            }
        };

        let result = split(&line, &settings.options);

        if let Some(logger) = audit.as_mut()
            && let Err(e) = logger.log_split(&line, settings.options.mode, &result)
        {
            warn!(error = %e, "failed to write audit entry");
        }

        match result {
            Ok(words) => {
                let rendered = match format_words(&words, settings.format) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("wordsplit: failed to format output: {}", e);
                        return ExitCode::from(1);
                    }
                };
                if out.write_all(rendered.as_bytes()).is_err() {
                    return ExitCode::from(1);
                }
            }
            Err(e) => {
                eprintln!("wordsplit: {}", e);
                failed = true;
            }
        }
    }

    if out.flush().is_err() {
        return ExitCode::from(1);
    }

    if failed {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
