//! Argument parsing for the `dbpf-recompress` binary.
//!
//! The surface is deliberately small: one positional archive path, plus
//! `-v` (raise verbosity), `-j N` (override worker count), and `-h`/`--help`.
//! Short options are not aggregated — there's only ever one at a time on the
//! command line in practice, so the aggregation machinery a bigger CLI needs
//! would just be dead weight here.

use anyhow::anyhow;

use crate::cli::constants::{display_level, set_display_level, PROGRAM_NAME};

/// Parsed command-line state.
#[derive(Debug, Clone)]
pub struct Args {
    /// Path to the DBPF archive to recompress.
    pub input_path: String,
    /// Explicit worker count from `-j`; `None` lets the driver pick.
    pub nb_workers: Option<usize>,
    /// Set when `-h`/`--help` was given; the caller should print usage and
    /// exit 0 without touching any files.
    pub exit_early: bool,
}

/// Parse `std::env::args()` (skipping argv\[0\]).
pub fn parse() -> anyhow::Result<Args> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_from(&argv)
}

/// Parse an explicit argument list (argv\[1..\]). Exposed separately so tests
/// don't have to touch `std::env`.
pub fn parse_from(argv: &[String]) -> anyhow::Result<Args> {
    let mut input_path: Option<String> = None;
    let mut nb_workers: Option<usize> = None;
    let mut exit_early = false;

    let mut i = 0;
    while i < argv.len() {
        let arg = argv[i].as_str();
        match arg {
            "-h" | "--help" => {
                print_usage();
                exit_early = true;
                break;
            }
            "-v" | "--verbose" => {
                set_display_level(display_level().saturating_add(1));
            }
            "-j" => {
                i += 1;
                let value = argv
                    .get(i)
                    .ok_or_else(|| anyhow!("-j requires a numeric argument"))?;
                nb_workers = Some(parse_worker_count(value)?);
            }
            _ if arg.starts_with("-j") && arg.len() > 2 => {
                nb_workers = Some(parse_worker_count(&arg[2..])?);
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(anyhow!("unrecognised option: {}", arg));
            }
            _ => {
                if input_path.is_some() {
                    return Err(anyhow!("unexpected extra argument: {}", arg));
                }
                input_path = Some(arg.to_owned());
            }
        }
        i += 1;
    }

    if exit_early {
        return Ok(Args { input_path: String::new(), nb_workers, exit_early });
    }

    let input_path = input_path.ok_or_else(|| anyhow!("missing archive path"))?;
    Ok(Args { input_path, nb_workers, exit_early })
}

fn parse_worker_count(s: &str) -> anyhow::Result<usize> {
    let n: usize = s
        .parse()
        .map_err(|_| anyhow!("-j: expected a positive integer, got {}", s))?;
    if n == 0 {
        return Err(anyhow!("-j: worker count must be at least 1"));
    }
    Ok(n)
}

fn print_usage() {
    eprintln!("Usage: {} [-v] [-j N] <archive.package>", PROGRAM_NAME);
    eprintln!();
    eprintln!("Decompresses and recompresses every entry in a DBPF archive,");
    eprintln!("writing the result to ./test.package.");
    eprintln!();
    eprintln!("  -j N    use N worker threads (default: available parallelism)");
    eprintln!("  -v      increase verbosity (repeatable)");
    eprintln!("  -h      print this message and exit");
}
