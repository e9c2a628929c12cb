//! Command-line front end: read one near-JSON document, print the repaired
//! result, and surface the diagnostic trail on stderr.

use crate::{Options, Outcome, RepairReport, repair};
use std::env;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS] [INPUT]\n\
         \n\
         INPUT: optional input file. When omitted, reads from stdin.\n\
         \n\
         Repairs near-JSON text. On success prints the canonical JSON; when\n\
         the text stays unparseable prints the best-effort repaired text and\n\
         exits non-zero. The diagnostic trail goes to stderr.\n\
         \n\
         Options:\n\
           -o, --output FILE    Write output to FILE (default stdout)\n\
               --in-place       Overwrite INPUT file with the result\n\
               --max-passes N   Transform passes before giving up (default 6)\n\
               --no-comments    Keep comments instead of stripping them\n\
               --no-literals    Keep True/False/NULL casing untouched\n\
               --json           Print the full report as one JSON document\n\
           -q, --quiet          Suppress the diagnostic trail\n\
           -h, --help           Show this help\n",
        prog = program
    );
}

struct CliMode {
    input: Option<String>,
    output: Option<String>,
    in_place: bool,
    quiet: bool,
    json: bool,
}

fn parse_args(args: Vec<String>, program: &str) -> Result<(Options, CliMode), ExitCode> {
    let mut opts = Options::default();
    let mut mode = CliMode {
        input: None,
        output: None,
        in_place: false,
        quiet: false,
        json: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(program);
                return Err(ExitCode::SUCCESS);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing FILE for --output");
                    return Err(ExitCode::from(2));
                }
                mode.output = Some(args[i].clone());
            }
            "--in-place" => {
                mode.in_place = true;
            }
            "--max-passes" => {
                i += 1;
                let parsed = args.get(i).and_then(|a| a.parse::<usize>().ok());
                match parsed {
                    Some(n) => opts.max_passes = n,
                    None => {
                        eprintln!("Missing or invalid N for --max-passes");
                        return Err(ExitCode::from(2));
                    }
                }
            }
            "--no-comments" => {
                opts.strip_comments = false;
            }
            "--no-literals" => {
                opts.normalize_literals = false;
            }
            "--json" => {
                mode.json = true;
            }
            "-q" | "--quiet" => {
                mode.quiet = true;
            }
            other => {
                if other.starts_with('-') && other != "-" {
                    eprintln!("Unknown option: {other}");
                    return Err(ExitCode::from(2));
                }
                if mode.input.is_some() {
                    eprintln!("Multiple INPUT files given");
                    return Err(ExitCode::from(2));
                }
                mode.input = Some(other.to_string());
            }
        }
        i += 1;
    }

    if mode.in_place && mode.input.is_none() {
        eprintln!("--in-place requires INPUT file");
        return Err(ExitCode::from(2));
    }
    Ok((opts, mode))
}

/// Entry point for the `jsonmend` binary.
pub fn run() -> ExitCode {
    let mut argv: Vec<String> = env::args().collect();
    let program = if argv.is_empty() {
        "jsonmend".to_string()
    } else {
        argv.remove(0)
    };
    let (opts, mode) = match parse_args(argv, &program) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };

    match run_repair(&opts, &mode) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run_repair(opts: &Options, mode: &CliMode) -> io::Result<ExitCode> {
    let content = match &mode.input {
        Some(path) if path != "-" => fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let report = repair(&content, opts);

    if !mode.json && !mode.quiet {
        for line in report.diagnostic_lines() {
            eprintln!("{line}");
        }
    }

    let (payload, code) = render(&report, mode.json);

    if mode.in_place {
        let path = mode.input.as_ref().expect("checked in parse_args");
        fs::write(path, payload)?;
    } else if let Some(path) = &mode.output {
        fs::write(path, payload)?;
    } else {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        out.write_all(payload.as_bytes())?;
        out.flush()?;
    }
    Ok(code)
}

fn render(report: &RepairReport, as_json: bool) -> (String, ExitCode) {
    let code = if report.outcome.is_parsed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    };
    if as_json {
        let rendered =
            serde_json::to_string_pretty(report).expect("report serialization cannot fail");
        return (format!("{rendered}\n"), code);
    }
    match &report.outcome {
        Outcome::Parsed(canonical) => (format!("{canonical}\n"), code),
        Outcome::Unresolved(error) => {
            eprintln!("last parse error: {error}");
            (format!("{}\n", report.repaired), code)
        }
    }
}
