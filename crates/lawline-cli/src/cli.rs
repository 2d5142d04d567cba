use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lawline",
    about = "Lawline: reconstruct and diff legislative versions",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with replay settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the change set between two law states
    Compute(ComputeArgs),
    /// Materialize the law at a timeline step
    Reconstruct(ReconstructArgs),
    /// Word-diff two texts
    Words(WordsArgs),
    /// Check a timeline for structural problems
    Validate(ValidateArgs),
    /// Show one line per timeline step
    Log(LogArgs),
}

#[derive(Args)]
pub struct ComputeArgs {
    /// JSON file with the old law state
    pub old: PathBuf,
    /// JSON file with the new law state
    pub new: PathBuf,
    #[arg(long, default_value = "old")]
    pub base_ref: String,
    #[arg(long, default_value = "new")]
    pub result_ref: String,
}

#[derive(Args)]
pub struct ReconstructArgs {
    /// JSON timeline file
    pub timeline: PathBuf,
    #[arg(short, long)]
    pub step: usize,
    /// Print word diffs against the original version
    #[arg(long)]
    pub accumulated: bool,
}

#[derive(Args)]
pub struct WordsArgs {
    pub old: String,
    pub new: String,
}

#[derive(Args)]
pub struct ValidateArgs {
    pub timeline: PathBuf,
}

#[derive(Args)]
pub struct LogArgs {
    pub timeline: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compute() {
        let cli = Cli::try_parse_from(["lawline", "compute", "bill.json", "act.json"]).unwrap();
        if let Command::Compute(args) = cli.command {
            assert_eq!(args.old, PathBuf::from("bill.json"));
            assert_eq!(args.new, PathBuf::from("act.json"));
            assert_eq!(args.base_ref, "old");
            assert_eq!(args.result_ref, "new");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_compute_refs() {
        let cli = Cli::try_parse_from([
            "lawline", "compute", "a.json", "b.json", "--base-ref", "bill", "--result-ref", "act",
        ])
        .unwrap();
        if let Command::Compute(args) = cli.command {
            assert_eq!(args.base_ref, "bill");
            assert_eq!(args.result_ref, "act");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_reconstruct() {
        let cli = Cli::try_parse_from(["lawline", "reconstruct", "t.json", "--step", "3", "--accumulated"]).unwrap();
        if let Command::Reconstruct(args) = cli.command {
            assert_eq!(args.step, 3);
            assert!(args.accumulated);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn reconstruct_requires_step() {
        assert!(Cli::try_parse_from(["lawline", "reconstruct", "t.json"]).is_err());
    }

    #[test]
    fn parse_words() {
        let cli = Cli::try_parse_from(["lawline", "words", "a b", "a c"]).unwrap();
        if let Command::Words(args) = cli.command {
            assert_eq!(args.old, "a b");
            assert_eq!(args.new, "a c");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_validate_and_log() {
        let cli = Cli::try_parse_from(["lawline", "validate", "t.json"]).unwrap();
        assert!(matches!(cli.command, Command::Validate(_)));
        let cli = Cli::try_parse_from(["lawline", "log", "t.json"]).unwrap();
        assert!(matches!(cli.command, Command::Log(_)));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "lawline", "--verbose", "--format", "json", "--config", "lawline.toml", "log", "t.json",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("lawline.toml")));
    }
}
