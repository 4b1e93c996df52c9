use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;

#[derive(Parser, Debug)]
#[command(name = "stlview", version, about = "Show an STL mesh with its bounding box")]
pub struct Cli {
    /// Path to a binary or ASCII STL file
    #[arg(value_name = "STL_FILE")]
    pub path: PathBuf,
}

pub const USAGE: &str = "Usage: stlview <path_to_stl_file>";

pub enum Parsed {
    Run(Cli),
    /// `--help` or `--version`; the text goes to stdout and the exit is clean.
    Info(String),
    Usage(String),
}

pub fn parse_args<I, T>(args: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Parsed::Run(cli),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Parsed::Info(err.to_string()),
            _ => {
                log::debug!("argument error: {err}");
                Parsed::Usage(USAGE.to_owned())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_path_runs() {
        match parse_args(["stlview", "part.stl"]) {
            Parsed::Run(cli) => assert_eq!(cli.path, PathBuf::from("part.stl")),
            _ => panic!("expected a run"),
        }
    }

    #[test]
    fn missing_path_is_a_usage_error() {
        assert!(matches!(parse_args(["stlview"]), Parsed::Usage(_)));
    }

    #[test]
    fn extra_argument_is_a_usage_error() {
        assert!(matches!(parse_args(["stlview", "a.stl", "b.stl"]), Parsed::Usage(_)));
    }

    #[test]
    fn help_is_not_an_error() {
        assert!(matches!(parse_args(["stlview", "--help"]), Parsed::Info(_)));
    }
}
