mod cli;
mod logging;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io;
use std::process::ExitCode;
use wm_batch::prompt::Prompter;

use crate::cli::Cli;

fn main() -> Result<ExitCode> {
    if shows_usage(std::env::args_os().len()) {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet, cli.json_logs);
    let fail_on_error = cli.fail_on_error;

    let config = if cli.interactive {
        let quiet = cli.quiet;
        match Prompter::new(io::stdin().lock(), io::stdout()).collect()? {
            Some(config) => wm_batch::Config { quiet, ..config },
            None => return Ok(ExitCode::SUCCESS),
        }
    } else {
        cli.into_config()?
    };

    let report = wm_batch::run(config)?;
    Ok(ExitCode::from(exit_status(fail_on_error, report.failed())))
}

fn shows_usage(arg_count: usize) -> bool {
    arg_count <= 1
}

fn exit_status(fail_on_error: bool, failed_files: usize) -> u8 {
    if fail_on_error && failed_files > 0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_only_without_arguments() {
        assert!(shows_usage(1));
        assert!(!shows_usage(2));
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("--watermark"));
    }

    #[test]
    fn failed_files_only_matter_with_fail_on_error() {
        assert_eq!(exit_status(false, 0), 0);
        assert_eq!(exit_status(false, 3), 0);
        assert_eq!(exit_status(true, 0), 0);
        assert_eq!(exit_status(true, 1), 1);
    }
}
