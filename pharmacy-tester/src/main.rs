mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use logic::scenarios::list_scenarios;
use logic::{LogicTester, ScenarioName, ScenarioResult, TesterAssets};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored summary for terminals
    Console,
    /// Machine-readable results
    Json,
    /// Summary for pull requests and wikis
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "pharmacy-tester", version)]
#[command(about = "Scenario runner for the Alia Ali pharmacy storefront logic")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, value_enum, value_delimiter = ',', default_value = "all")]
    scenarios: Vec<ScenarioName>,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Base seed; iteration `i` runs with `seed + i`
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Number of iterations per scenario
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    if args.report == ReportFormat::Console || args.output.is_some() {
        announce_banner();
    }

    let start_time = Instant::now();
    let assets = Arc::new(TesterAssets::load_default()?);
    let results = run_scenarios(&args, assets);
    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "💊 Pharmacy Scenario Tester".bright_cyan().bold());
    println!("{}", "===========================".cyan());
}

fn run_scenarios(args: &Args, assets: Arc<TesterAssets>) -> Vec<ScenarioResult> {
    let tester = LogicTester::new(assets, args.verbose);
    ScenarioName::expand(&args.scenarios)
        .into_iter()
        .filter_map(ScenarioName::scenario)
        .map(|scenario| {
            log::info!("running {} x{}", scenario.name.label(), args.iterations);
            tester.run_scenario(&scenario, args.seed, args.iterations)
        })
        .collect()
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => logic::reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Pharmacy Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        ReportFormat::Console => {
            logic::reports::generate_console_report(
                &mut output_target,
                results,
                start_time.elapsed(),
            )?;
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            scenarios: vec![ScenarioName::All],
            list_scenarios: false,
            seed: 1337,
            iterations: 1,
            report: ReportFormat::Json,
            verbose: false,
            output: None,
        }
    }

    #[test]
    fn args_parse_comma_separated_scenarios() {
        let args = Args::try_parse_from([
            "pharmacy-tester",
            "--scenarios",
            "browse,triage",
            "--report",
            "markdown",
            "--seed",
            "5",
        ])
        .unwrap();
        assert_eq!(args.scenarios, vec![ScenarioName::Browse, ScenarioName::Triage]);
        assert_eq!(args.report, ReportFormat::Markdown);
        assert_eq!(args.seed, 5);
        assert_eq!(args.iterations, 10);
    }

    #[test]
    fn unknown_scenarios_are_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["pharmacy-tester", "--scenarios", "smoke"]).is_err());
    }

    #[test]
    fn run_scenarios_covers_all_six() {
        let args = base_args();
        let assets = Arc::new(TesterAssets::load_default().unwrap());
        let results = run_scenarios(&args, assets);
        assert_eq!(results.len(), 6);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn reports_go_to_the_output_file() {
        let path = std::env::temp_dir().join(format!(
            "pharmacy-tester-report-{}.json",
            std::process::id()
        ));
        let mut args = base_args();
        args.output = Some(path.clone());
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "[]");
        let _ = std::fs::remove_file(path);
    }
}
