//! Report the short options and positional arguments given on the command line.

use std::io::Write;

use optscan::{Error, OptionSpec, ParsedOption, Scanner};

fn option_spec() -> Result<OptionSpec, Error> {
    OptionSpec::new()
        .flag('h', "print this help message")?
        .required('o', "name the output file", "filename")?
        .flag('v', "enable verbose mode")
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    // No environment variables are consulted.
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

/// Report the scanned options in order, then the positionals.  Returns the exit status.
fn report<O: Write, E: Write>(
    program: &str,
    spec: &OptionSpec,
    events: &[Result<ParsedOption, Error>],
    positionals: Option<Vec<&str>>,
    out: &mut O,
    err: &mut E,
) -> std::io::Result<i32> {
    for event in events {
        let problem = match event {
            Ok(ParsedOption::Flag('h')) => {
                log::debug!("-h: printing help");
                write!(out, "{}", spec.help(program))?;
                continue;
            }
            Ok(ParsedOption::Argument('o', output)) => {
                log::debug!("-o: output file {:?}", output);
                writeln!(out, "Output file: {}", output)?;
                continue;
            }
            Ok(ParsedOption::Flag('v')) => {
                log::debug!("-v: verbose mode");
                writeln!(out, "Verbose mode enabled")?;
                continue;
            }
            Ok(option) => Error::UnknownOption(option.flag()),
            Err(error) => error.clone(),
        };
        log::debug!("stopping: {}", problem);
        writeln!(err, "{}: {}", program, problem)?;
        writeln!(err, "{}", spec.usage(program))?;
        out.flush()?;
        return Ok(1);
    }
    let positionals = positionals.unwrap_or_default();
    log::debug!("{} positional argument(s)", positionals.len());
    for positional in positionals {
        writeln!(out, "Non-option argument: {}", positional)?;
    }
    out.flush()?;
    Ok(0)
}

fn main() {
    let mut args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    let program = args.next().unwrap_or_else(|| "optscan".to_string());
    let args: Vec<String> = args.collect();
    let spec = match option_spec() {
        Ok(spec) => spec,
        Err(err) => {
            eprintln!("{}: {}", program, err);
            std::process::exit(1);
        }
    };
    let mut scanner = Scanner::new(&spec, &args);
    let events: Vec<Result<ParsedOption, Error>> = scanner.by_ref().collect();
    init_logging(
        events
            .iter()
            .any(|event| matches!(event, Ok(ParsedOption::Flag('v')))),
    );
    log::debug!(
        "scanned {} option(s) from {} argument(s)",
        events.len(),
        args.len()
    );
    let status = {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        report(
            &program,
            &spec,
            &events,
            scanner.positionals(),
            &mut stdout.lock(),
            &mut stderr.lock(),
        )
    };
    match status {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{}: could not write report: {}", program, err);
            std::process::exit(1);
        }
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
