use anyhow::{Context, Result, bail};
use clap::Parser;
use common::config;
use common::privilege::privileged;
use judge::client::ScoreboardClient;
use judge::orchestrator;
use judge::types::Rule;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use util::case_range;
use util::homework::{self, Homework};
use util::submission::Submission;

#[derive(Parser, Debug)]
#[command(version, about = "Judge a homework submission and report it to the scoreboard")]
struct Args {
    /// Change the working directory before judging
    #[arg(short = 'C', long)]
    chdir: Option<PathBuf>,
    /// The homework to judge
    #[arg(long)]
    homework: Option<String>,
    /// Base URL of the scoreboard service
    #[arg(long)]
    server: Option<String>,
    /// Run each case this many times and keep the median. Must be odd.
    #[arg(long, default_value_t = 1)]
    median_of: usize,
    /// Include only the given cases. Range-expandable: --include 'case[01-03]'
    #[arg(short = 'i', long = "include")]
    include: Vec<String>,
    /// Exclude the given cases. Range-expandable.
    #[arg(short = 'x', long = "exclude")]
    exclude: Vec<String>,
    /// Submit as this user. Privileged option.
    #[arg(long = "as")]
    as_user: Option<String>,
    /// Judge with a local rule file instead of querying the service. Privileged option.
    #[arg(long)]
    rule: Option<PathBuf>,
    /// Skip compiling and judge the given binary. Privileged option.
    #[arg(long)]
    bin: Option<String>,
    /// Pass --debug through to the runner
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = common::logger::init_logging("judge.log", false);

    if let Some(dir) = &args.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to chdir to {}", dir.display()))?;
    }

    if args.median_of % 2 == 0 {
        bail!("refusing to pick a median from an even number of runs");
    }

    let current_user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
    let user = args.as_user.clone().unwrap_or_else(|| current_user.clone());
    if user != current_user && !privileged() {
        bail!("cannot run as another user when not privileged");
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("Cleaning up...");
                cancel.cancel();
            }
        });
    }

    let server = args.server.clone().unwrap_or_else(config::scoreboard_url);
    let client = ScoreboardClient::new(server);

    let hw: Homework = if let Some(rule_file) = &args.rule {
        if !privileged() {
            bail!("cannot specify a rule file when not privileged");
        }
        homework::load_homework(rule_file)?
    } else {
        let name = args
            .homework
            .clone()
            .context("--homework is required when no rule file is given")?;
        client
            .query_homework(&name)
            .await
            .with_context(|| format!("failed to get homework {name}"))?
    };

    let cases = select_cases(&hw, &args)?;

    let mut rule = Rule::from_homework(&hw, args.median_of, args.debug);
    if let Some(bin) = &args.bin {
        if privileged() {
            rule.skip_compile = true;
            rule.target = bin.clone();
        } else {
            eprintln!("Cannot skip compiling when not privileged");
        }
    }

    let results = orchestrator::judge(&rule, &cases, cancel.clone()).await?;
    if results.is_empty() {
        return Ok(());
    }
    cancel.cancel();

    let message = client
        .submit(&Submission {
            user,
            homework: hw.name.clone(),
            results,
        })
        .await
        .context("failed to submit results to scoreboard")?;
    println!("Scoreboard: {message}");
    Ok(())
}

/// Applies the include/exclude filters to the homework's case list.
///
/// Include wins over exclude; an include list with no exclude list selects
/// only the included cases.
fn select_cases(hw: &Homework, args: &Args) -> Result<Vec<String>> {
    let include = case_range::expand_all(&args.include)?;
    let exclude = case_range::expand_all(&args.exclude)?;
    let mut cases = Vec::with_capacity(hw.cases.len());
    for case in &hw.cases {
        let mut keep = !exclude.contains(case);
        if !include.is_empty() && exclude.is_empty() {
            keep = false;
        }
        if include.contains(case) {
            keep = true;
        }
        if keep {
            cases.push(case.clone());
        } else {
            eprintln!("Excluded {case}");
        }
    }
    Ok(cases)
}
