//! employee_bench - Row-by-row insert benchmark
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│ Generator │───▶│  Store   │───▶│  Report  │
//! │  (YAML)  │    │ (seeded)  │    │ (1 conn) │    │ (stdout) │
//! └──────────┘    └───────────┘    └──────────┘    └──────────┘
//! ```
//!
//! stdout carries only results; logs go to stderr and the log file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use employee_bench::bench::report::{self, SuiteReporter};
use employee_bench::bench::runner::run_and_report;
use employee_bench::bench::{Clock, MonotonicClock, Operation, run_suite};
use employee_bench::config::AppConfig;
use employee_bench::db::Database;
use employee_bench::employee::EmployeeGenerator;
use employee_bench::error::BenchError;
use employee_bench::logging::init_logging;
use employee_bench::store::{ColumnSet, EmployeeStore, MemoryStore, PgEmployeeStore};

#[derive(Parser, Debug)]
#[command(name = "employee_bench", version, about = "Time row-by-row inserts of synthetic employees")]
struct Cli {
    /// Config environment; loads config/<ENV>.yaml
    #[arg(long, short = 'e', default_value = "dev")]
    env: String,

    /// PRNG seed. A random seed is drawn and logged when omitted.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Create the PostGIS extension and the employees table before running
    #[arg(long, global = true, conflicts_with = "dry_run")]
    init_schema: bool,

    /// Use an in-memory table instead of PostgreSQL
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(flatten)]
    db: DbArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug)]
struct DbArgs {
    #[arg(long, global = true)]
    db_host: Option<String>,

    #[arg(long, global = true)]
    db_port: Option<u16>,

    #[arg(long, global = true)]
    db_name: Option<String>,

    #[arg(long, global = true)]
    db_user: Option<String>,

    /// Full postgres:// URL; wins over the discrete fields
    #[arg(long, global = true)]
    db_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Time single-record full-row inserts (default)
    Insert(InsertArgs),
    /// Time create/read/update/delete for each column set
    Suite(SuiteArgs),
}

#[derive(Args, Debug)]
struct InsertArgs {
    /// Timed repetitions
    #[arg(long, short = 'r')]
    repetitions: Option<usize>,

    /// Inserts per repetition
    #[arg(long, short = 'm')]
    inserts: Option<usize>,

    /// Records generated per insert; one of them is inserted
    #[arg(long, short = 'n')]
    batch_size: Option<usize>,
}

#[derive(Args, Debug)]
struct SuiteArgs {
    /// Timed repetitions per step
    #[arg(long, short = 'r')]
    repetitions: Option<usize>,

    /// Statements timed per repetition
    #[arg(long, short = 'k')]
    sample_size: Option<usize>,

    /// Records generated to sample from
    #[arg(long, short = 'p')]
    pool_size: Option<usize>,

    /// CSV file for per-repetition samples
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Column sets to run, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    sets: Vec<ColumnSet>,

    /// Operations to run, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    operations: Vec<Operation>,
}

impl Cli {
    /// CLI flags win over YAML and environment.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        let db = &mut config.database;
        if let Some(host) = &self.db.db_host {
            db.host.clone_from(host);
        }
        if let Some(port) = self.db.db_port {
            db.port = port;
        }
        if let Some(name) = &self.db.db_name {
            db.name.clone_from(name);
        }
        if let Some(user) = &self.db.db_user {
            db.user.clone_from(user);
        }
        if let Some(url) = &self.db.db_url {
            db.url = Some(url.clone());
        }

        match &self.command {
            Some(Command::Insert(args)) => {
                let insert = &mut config.insert;
                insert.repetitions = args.repetitions.unwrap_or(insert.repetitions);
                insert.inserts_per_repetition =
                    args.inserts.unwrap_or(insert.inserts_per_repetition);
                insert.batch_size = args.batch_size.unwrap_or(insert.batch_size);
            }
            Some(Command::Suite(args)) => {
                let suite = &mut config.suite;
                suite.repetitions = args.repetitions.unwrap_or(suite.repetitions);
                suite.sample_size = args.sample_size.unwrap_or(suite.sample_size);
                suite.pool_size = args.pool_size.unwrap_or(suite.pool_size);
                if let Some(output) = &args.output {
                    suite.output_csv = output.display().to_string();
                }
            }
            None => {}
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut app_config = match AppConfig::load(&cli.env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut app_config);

    let _log_guard = init_logging(&app_config);
    tracing::info!("Starting employee_bench in {} mode", cli.env);

    match run(&cli, &app_config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<BenchError>()
                .map(BenchError::code)
                .unwrap_or("FATAL");
            tracing::error!(code, "{:#}", e);
            if e
                .downcast_ref::<BenchError>()
                .is_some_and(BenchError::is_database_error)
            {
                tracing::error!("Check the database section of config/{}.yaml", cli.env);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "PRNG seeded (pass --seed {} to replay this run)", seed);

    let mut generator = EmployeeGenerator::new(StdRng::seed_from_u64(seed));
    let clock = MonotonicClock::new();

    if cli.dry_run {
        tracing::warn!("Dry run: timing against an in-memory table, not PostgreSQL");
        let mut store = MemoryStore::new();
        return execute(cli, config, &mut store, &mut generator, &clock).await;
    }

    let mut db = Database::connect(&config.database).await?;
    db.health_check().await?;
    match db.server_version().await {
        Ok(version) => tracing::info!("Server: {}", version),
        Err(e) => tracing::warn!("Could not read server version: {}", e),
    }
    if cli.init_schema {
        db.init_schema().await?;
    }

    let mut store = PgEmployeeStore::new(db.into_connection());
    let outcome = execute(cli, config, &mut store, &mut generator, &clock).await;
    if let Err(e) = store.close().await {
        tracing::warn!("Error closing connection: {}", e);
    }
    outcome
}

async fn execute<S: EmployeeStore>(
    cli: &Cli,
    config: &AppConfig,
    store: &mut S,
    generator: &mut EmployeeGenerator<StdRng>,
    clock: &MonotonicClock,
) -> anyhow::Result<()> {
    match &cli.command {
        None | Some(Command::Insert(_)) => {
            let summary = run_and_report(
                store,
                generator,
                clock,
                &config.insert,
                &mut std::io::stdout(),
            )
            .await
            .context("insert benchmark aborted")?;

            if summary.is_empty() {
                tracing::warn!(
                    "No repetitions ran; the average insertion time is undefined and was not reported"
                );
            } else {
                tracing::info!(
                    repetitions = summary.len(),
                    total_secs = summary.total(),
                    min_secs = summary.min().unwrap_or_default(),
                    max_secs = summary.max().unwrap_or_default(),
                    p50_secs = summary.percentile(50.0).unwrap_or_default(),
                    p99_secs = summary.percentile(99.0).unwrap_or_default(),
                    "Insert benchmark complete"
                );
            }
        }
        Some(Command::Suite(args)) => {
            let sets = if args.sets.is_empty() {
                ColumnSet::ALL.to_vec()
            } else {
                args.sets.clone()
            };
            let operations = if args.operations.is_empty() {
                Operation::ALL.to_vec()
            } else {
                args.operations.clone()
            };
            let csv_path = Path::new(&config.suite.output_csv);

            let start = clock.now();
            let mut reporter = SuiteReporter::new(std::io::stdout(), &config.suite);
            let outcome = run_suite(
                store,
                generator,
                clock,
                &sets,
                &operations,
                &config.suite,
                |entry| reporter.report(entry),
            )
            .await;

            let result = match outcome {
                Ok(result) => result,
                Err(e) => {
                    if !reporter.completed().is_empty() {
                        let partial = reporter.partial_result(clock.seconds_since(start));
                        match report::save_suite_csv(csv_path, &partial) {
                            Ok(()) => tracing::warn!(
                                "Saved {} completed steps before the failure",
                                partial.entries.len()
                            ),
                            Err(io) => tracing::warn!("Could not save partial timings: {}", io),
                        }
                    }
                    return Err(e).context("suite aborted");
                }
            };

            println!("This whole suite took {:.3} seconds to run", result.wall_seconds);

            report::save_suite_csv(csv_path, &result)
                .with_context(|| format!("writing {}", config.suite.output_csv))?;
        }
    }
    Ok(())
}
