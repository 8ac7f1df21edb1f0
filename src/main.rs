// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The `ll` binary: argument parsing, tracing subscriber setup, and exit
//! code mapping around the library's parse/eval/format pipeline.

use littlelisp::cli::{self, Action, Evaluator, RunConfig};
use littlelisp::error::InterpError;
use littlelisp::{context, eval, heap::Heap, printer, reader, selftest};

fn init_tracing(trace_gc: bool, trace_eval: bool) {
    let mut filter = "warn".to_string();
    if trace_gc {
        filter.push_str(",littlelisp::gc=debug");
    }
    if trace_eval {
        filter.push_str(",littlelisp::eval=trace");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_target(false)
        .without_time()
        .init();
}

fn load_expression(cfg: &RunConfig) -> Result<String, InterpError> {
    if !cfg.file_mode {
        return Ok(cfg.positional.clone());
    }
    std::fs::read_to_string(&cfg.positional).map_err(|source| InterpError::Io {
        path: cfg.positional.clone(),
        source,
    })
}

fn run(cfg: &RunConfig) -> Result<i32, InterpError> {
    let source = load_expression(cfg)?;
    let mut heap = Heap::new();
    let ctx = context::reset_global_ctx(&mut heap)?;
    let expr = reader::parse(&mut heap, &source)?;
    let result = match cfg.evaluator {
        Evaluator::Classic => eval::classic::eval(&mut heap, ctx, expr)?,
        Evaluator::Cps => eval::cps::eval(&mut heap, ctx, expr)?,
    };
    if cfg.result_as_exit_code {
        Ok(heap.as_int(result) as i32)
    } else {
        println!("{}", printer::format(&heap, result));
        Ok(0)
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("help: ll -h");
        std::process::exit(1);
    }

    match cli::parse_args(args) {
        Ok(Action::Help) => {
            print!("{}", cli::USAGE);
            std::process::exit(0);
        }
        Ok(Action::SelfTest) => {
            init_tracing(false, false);
            if let Err(message) = selftest::run_all() {
                eprintln!("{message}");
            } else {
                println!("tests passed");
            }
            std::process::exit(1);
        }
        Ok(Action::Run(cfg)) => {
            init_tracing(cfg.trace_gc, cfg.trace_eval);
            match run(&cfg) {
                Ok(code) => std::process::exit(code),
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            }
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
