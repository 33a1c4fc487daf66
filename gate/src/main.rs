use clap::{Parser, Subcommand};
use gate::{run_evaluate, run_lint_ignore_revs, EvaluateInputs, GateConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "needs-check")]
#[command(about = "Collapse the results of needed GitHub Actions jobs into one verdict")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether the needed jobs add up to a passing result
    Evaluate {
        /// Jobs that may fail (JSON list or comma-separated names)
        #[arg(long, env = "INPUT_ALLOWED-FAILURES", default_value = "")]
        allowed_failures: String,
        /// Jobs that may be skipped (JSON list or comma-separated names)
        #[arg(long, env = "INPUT_ALLOWED-SKIPS", default_value = "")]
        allowed_skips: String,
        /// The `needs` context rendered with `toJSON`
        #[arg(long, env = "INPUT_JOBS")]
        jobs: String,
    },
    /// Check a blame-ignore revision list
    LintIgnoreRevs {
        /// Path to the ignore list
        #[arg(short, long, default_value = ".git-blame-ignore-revs")]
        file: PathBuf,
        /// Also confirm every revision exists in this repository
        #[arg(short, long)]
        repo: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Evaluate {
            allowed_failures,
            allowed_skips,
            jobs,
        } => {
            let inputs = EvaluateInputs::new(jobs)
                .with_allowed_failures(allowed_failures)
                .with_allowed_skips(allowed_skips);
            run_evaluate(
                &GateConfig::from_env(),
                &inputs,
                &mut io::stderr(),
                &mut io::stdout(),
            )?
        }
        Commands::LintIgnoreRevs { file, repo } => {
            run_lint_ignore_revs(&file, repo.as_deref(), &mut io::stdout())?
        }
    };

    Ok(ExitCode::from(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const ACTION_INPUTS: [&str; 3] = ["INPUT_ALLOWED-FAILURES", "INPUT_ALLOWED-SKIPS", "INPUT_JOBS"];

    fn clear_action_inputs() {
        for name in ACTION_INPUTS {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_evaluate_reads_action_inputs_from_env() {
        env::set_var("INPUT_ALLOWED-FAILURES", "nightly");
        env::set_var("INPUT_ALLOWED-SKIPS", r#"["docs"]"#);
        env::set_var("INPUT_JOBS", r#"{"build": {"result": "success"}}"#);

        let cli = Cli::try_parse_from(["needs-check", "evaluate"]);
        clear_action_inputs();

        match cli.unwrap().command {
            Commands::Evaluate {
                allowed_failures,
                allowed_skips,
                jobs,
            } => {
                assert_eq!(allowed_failures, "nightly");
                assert_eq!(allowed_skips, r#"["docs"]"#);
                assert_eq!(jobs, r#"{"build": {"result": "success"}}"#);
            }
            Commands::LintIgnoreRevs { .. } => panic!("expected evaluate"),
        }
    }

    #[test]
    #[serial]
    fn test_flags_override_action_inputs() {
        env::set_var("INPUT_JOBS", "{}");

        let cli = Cli::try_parse_from(["needs-check", "evaluate", "--jobs", "null"]);
        clear_action_inputs();

        match cli.unwrap().command {
            Commands::Evaluate {
                allowed_failures,
                allowed_skips,
                jobs,
            } => {
                assert_eq!(jobs, "null");
                assert!(allowed_failures.is_empty());
                assert!(allowed_skips.is_empty());
            }
            Commands::LintIgnoreRevs { .. } => panic!("expected evaluate"),
        }
    }

    #[test]
    #[serial]
    fn test_jobs_input_is_required() {
        clear_action_inputs();
        assert!(Cli::try_parse_from(["needs-check", "evaluate"]).is_err());
    }
}
