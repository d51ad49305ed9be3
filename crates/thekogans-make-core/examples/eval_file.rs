use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use thekogans_make_core::{FunctionRegistry, ProjectContext};

/// Evaluate every line of a file as a condition, or expand it with `--expand`. Blank lines and
/// lines starting with `#` are skipped.
#[derive(Parser)]
struct Opts {
    file: PathBuf,

    #[clap(long)]
    expand: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let context = ProjectContext::new(Arc::new(FunctionRegistry::with_builtins()), Arc::default());

    for (number, line) in BufReader::new(File::open(&opts.file)?).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let result = if opts.expand {
            context.expand(line)
        } else {
            context.eval(line).map(|b| b.to_string())
        };
        match result {
            Ok(result) => println!("{}: {result}", number + 1),
            Err(e) => println!("{}: error: {e:#}", number + 1),
        }
    }
    Ok(())
}
