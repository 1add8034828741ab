//! Black-box signature fuzzer CLI.
//!
//! Probes a registered callable with every combination from the probe pool
//! and reports which argument type shapes succeed.
//!
//! ```text
//! sigprobe fuzz demo add_one
//! sigprobe fuzz demo Counter.increment --print-failures
//! sigprobe fuzz demo divide --json
//! sigprobe list demo
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sigprobe_engine::{fuzz_target, SweepOptions};
use sigprobe_pool::catalog;
use sigprobe_registry::Registry;
use sigprobe_report::{render, RenderOptions};

mod demo;

#[derive(Debug, Parser)]
#[command(
    name = "sigprobe",
    version,
    about = "Probe which argument type shapes a callable accepts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fuzz a registered function or single-level class method.
    Fuzz {
        /// Registered module holding the target.
        module: String,
        /// Target symbol: `function` or `Class.method`.
        target: String,
        /// Also render the failing combinations.
        #[arg(long, default_value_t = false)]
        print_failures: bool,
        /// Emit the raw result record as JSON instead of the table.
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Probe independent combinations in parallel (free functions and
        /// constructors only; method sweeps always run sequentially).
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Upper bound on attempted combinations per sweep.
        #[arg(long, value_name = "N", default_value_t = 1_000_000)]
        max_combinations: u64,
    },
    /// List the callables registered in a module.
    List {
        /// Registered module to describe.
        module: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut registry = Registry::new();
    registry.register(demo::demo_module());

    match cli.command {
        Command::Fuzz {
            module,
            target,
            print_failures,
            json,
            parallel,
            max_combinations,
        } => {
            // Probe panics are an expected outcome class; keep their
            // backtraces off the console.
            std::panic::set_hook(Box::new(|_| {}));

            let options = SweepOptions {
                max_combinations,
                parallel,
            };
            let pool = catalog::default_pool();
            let report = fuzz_target(&registry, &module, &target, &pool, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!(
                    "{}",
                    render(
                        &report,
                        &RenderOptions {
                            show_failures: print_failures,
                        }
                    )
                );
            }
        }
        Command::List { module } => {
            let scope = registry
                .module(&module)
                .ok_or_else(|| anyhow::anyhow!("module '{module}' is not registered"))?;

            let mut functions: Vec<_> = scope.functions().collect();
            functions.sort_by_key(|f| f.name().to_string());
            for function in functions {
                println!("{}/{}", function.name(), function.arity());
            }

            let mut classes: Vec<_> = scope.classes().collect();
            classes.sort_by_key(|c| c.name().to_string());
            for class in classes {
                println!("{}(new/{})", class.name(), class.constructor_arity());
                let mut methods: Vec<_> = class.method_names().collect();
                methods.sort_unstable();
                for method in methods {
                    println!("  {}.{}", class.name(), method);
                }
            }
        }
    }

    Ok(())
}
