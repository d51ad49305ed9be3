use anyhow::Context as _;
use clap::Parser;
use thekogans_make::{Definition, Definitions, build_context};
use thekogans_make_core::{Context, ProjectAttributesBuilder};
use thekogans_make_util::Version;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Evaluate thekogans_make descriptor conditions and templates
#[derive(Parser)]
#[clap(version)]
struct Opts {
    #[clap(subcommand)]
    subcmd: SubCommand,

    /// Define a global symbol, NAME[:TYPE]=VALUE
    #[clap(short = 'D', long = "define", global = true)]
    global: Vec<Definition>,

    /// Define a local symbol, NAME[:TYPE]=VALUE
    #[clap(short = 'L', long = "local", global = true)]
    local: Vec<Definition>,

    /// Define an environment symbol, NAME[:TYPE]=VALUE
    #[clap(short = 'E', long = "environment", global = true)]
    environment: Vec<Definition>,

    #[clap(flatten)]
    project: ProjectArgs,

    /// Log more; repeat for trace output. RUST_LOG takes precedence.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Built-in attributes of the project the expressions are evaluated for.
#[derive(Parser)]
struct ProjectArgs {
    #[clap(long, global = true, default_value = "")]
    organization: String,

    #[clap(long, global = true, default_value = "")]
    project: String,

    #[clap(long, global = true, default_value = "library")]
    project_type: String,

    #[clap(long, global = true, default_value = "0.0.0")]
    project_version: Version,

    #[clap(long, global = true, default_value = "Hierarchical")]
    naming_convention: String,

    #[clap(long, global = true, default_value = "Debug")]
    config: String,

    #[clap(long = "type", global = true, default_value = "Static")]
    build_type: String,
}

#[derive(Parser)]
enum SubCommand {
    Eval(Eval),
    Expand(Expand),
    Functions(Functions),
}

/// Evaluate a condition and print true or false
#[derive(Parser)]
struct Eval {
    expression: String,

    /// Exit with status 1 when the condition is false
    #[clap(long)]
    exit_code: bool,
}

/// Expand a template and print the result
#[derive(Parser)]
struct Expand {
    format: String,
}

/// List the functions callable as $(name ...)
#[derive(Parser)]
struct Functions {}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    init_tracing(opts.verbose);

    let attributes = ProjectAttributesBuilder::default()
        .organization(opts.project.organization)
        .project(opts.project.project)
        .project_type(opts.project.project_type)
        .version(opts.project.project_version)
        .naming_convention(opts.project.naming_convention)
        .build_config(opts.project.config)
        .build_type(opts.project.build_type)
        .build()
        .context("invalid project attributes")?;
    debug!(?attributes, "project");

    let definitions = Definitions {
        environment: opts.environment,
        global: opts.global,
        local: opts.local,
    };
    let context = build_context(&attributes, &definitions);

    match opts.subcmd {
        SubCommand::Eval(eval) => {
            let result = context.eval(&eval.expression)?;
            println!("{result}");
            if eval.exit_code && !result {
                std::process::exit(1);
            }
        }
        SubCommand::Expand(expand) => {
            println!("{}", context.expand(&expand.format)?);
        }
        SubCommand::Functions(_functions) => {
            for name in context.functions().names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}
