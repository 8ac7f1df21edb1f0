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

//! Command line parsing.
//!
//! Flags are bundled short options (`-pc`, `-gv`, ...), not `--long` flags,
//! and a later flag always wins over an earlier, conflicting one within the
//! same invocation (`-pc` ends up in classic mode, `-cp` in CPS mode). A
//! `clap`-style declarative parser doesn't preserve that "last one wins"
//! ordering for a combined group, so this is a small hand-rolled scan that
//! mirrors the reference flag loop character for character.

use crate::error::{InterpError, Result};

pub const USAGE: &str = "little-lisp\n\
usage: ll -flags \"expression or filename\"\n\
  -t  run the self-test suite and exit\n\
  -h  print this help and exit\n\
  -g  trace garbage collection\n\
  -v  trace evaluation steps\n\
  -p  use the continuation-passing evaluator (default)\n\
  -c  use the classic evaluator\n\
  -r  print the result as a process exit code\n\
  -o  print the result as an s-expression (default)\n\
  -i  treat the positional argument as an expression (default)\n\
  -f  treat the positional argument as a file name\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluator {
    Classic,
    Cps,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub evaluator: Evaluator,
    pub trace_gc: bool,
    pub trace_eval: bool,
    pub result_as_exit_code: bool,
    pub file_mode: bool,
    pub positional: String,
}

#[derive(Debug, Clone)]
pub enum Action {
    Help,
    SelfTest,
    Run(RunConfig),
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Action> {
    let mut evaluator = Evaluator::Cps;
    let mut trace_gc = false;
    let mut trace_eval = false;
    let mut result_as_exit_code = false;
    let mut file_mode = false;
    let mut positional: Option<String> = None;

    for arg in args {
        if let Some(flags) = arg.strip_prefix('-') {
            for flag in flags.chars() {
                match flag {
                    't' => return Ok(Action::SelfTest),
                    'h' => return Ok(Action::Help),
                    'g' => trace_gc = true,
                    'v' => trace_eval = true,
                    'p' => evaluator = Evaluator::Cps,
                    'c' => evaluator = Evaluator::Classic,
                    'r' => result_as_exit_code = true,
                    'o' => result_as_exit_code = false,
                    'i' => file_mode = false,
                    'f' => file_mode = true,
                    other => {
                        return Err(InterpError::Usage(format!("unknown flag '-{other}'")));
                    }
                }
            }
        } else if positional.is_none() {
            positional = Some(arg);
        } else {
            return Err(InterpError::Usage(
                "expected exactly one expression or filename".to_string(),
            ));
        }
    }

    let positional =
        positional.ok_or_else(|| InterpError::Usage("missing expression or filename".to_string()))?;

    Ok(Action::Run(RunConfig {
        evaluator,
        trace_gc,
        trace_eval,
        result_as_exit_code,
        file_mode,
        positional,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn later_flag_wins_in_a_combined_group() {
        let Action::Run(cfg) = parse_args(args(&["-pc", "(+ 1 2)"])).unwrap() else {
            panic!("expected Run")
        };
        assert_eq!(cfg.evaluator, Evaluator::Classic);

        let Action::Run(cfg) = parse_args(args(&["-cp", "(+ 1 2)"])).unwrap() else {
            panic!("expected Run")
        };
        assert_eq!(cfg.evaluator, Evaluator::Cps);
    }

    #[test]
    fn later_flag_wins_across_separate_groups() {
        let Action::Run(cfg) = parse_args(args(&["-c", "-p", "(+ 1 2)"])).unwrap() else {
            panic!("expected Run")
        };
        assert_eq!(cfg.evaluator, Evaluator::Cps);
    }

    #[test]
    fn default_evaluator_is_cps() {
        let Action::Run(cfg) = parse_args(args(&["(+ 1 2)"])).unwrap() else {
            panic!("expected Run")
        };
        assert_eq!(cfg.evaluator, Evaluator::Cps);
    }

    #[test]
    fn later_flag_wins_for_file_vs_immediate_mode() {
        let Action::Run(cfg) = parse_args(args(&["-fi", "path"])).unwrap() else {
            panic!("expected Run")
        };
        assert!(!cfg.file_mode);

        let Action::Run(cfg) = parse_args(args(&["-if", "path"])).unwrap() else {
            panic!("expected Run")
        };
        assert!(cfg.file_mode);
    }

    #[test]
    fn default_mode_is_immediate_not_file() {
        let Action::Run(cfg) = parse_args(args(&["(+ 1 2)"])).unwrap() else {
            panic!("expected Run")
        };
        assert!(!cfg.file_mode);
    }

    #[test]
    fn later_flag_wins_for_exit_code_vs_stdout() {
        let Action::Run(cfg) = parse_args(args(&["-ro", "(+ 1 2)"])).unwrap() else {
            panic!("expected Run")
        };
        assert!(!cfg.result_as_exit_code);

        let Action::Run(cfg) = parse_args(args(&["-or", "(+ 1 2)"])).unwrap() else {
            panic!("expected Run")
        };
        assert!(cfg.result_as_exit_code);
    }

    #[test]
    fn default_output_is_stdout_not_exit_code() {
        let Action::Run(cfg) = parse_args(args(&["(+ 1 2)"])).unwrap() else {
            panic!("expected Run")
        };
        assert!(!cfg.result_as_exit_code);
    }

    #[test]
    fn t_and_h_short_circuit_immediately() {
        assert!(matches!(
            parse_args(args(&["-ht", "whatever"])).unwrap(),
            Action::Help
        ));
        assert!(matches!(
            parse_args(args(&["-th", "whatever"])).unwrap(),
            Action::SelfTest
        ));
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        assert!(matches!(
            parse_args(args(&["-z", "x"])),
            Err(InterpError::Usage(_))
        ));
    }

    #[test]
    fn missing_positional_is_a_usage_error() {
        assert!(matches!(parse_args(args(&["-p"])), Err(InterpError::Usage(_))));
    }

    #[test]
    fn two_positionals_is_a_usage_error() {
        assert!(matches!(
            parse_args(args(&["a", "b"])),
            Err(InterpError::Usage(_))
        ));
    }
}
