//! optscan scans short command-line options the way getopt does, without getopt's global state.
//!
//! An [OptionSpec] names the recognized option characters and whether each one requires an
//! argument.  [scan] walks an argument list (without the program name) and returns the options in
//! the order they were encountered plus the residual positional arguments.  [Scanner] yields the
//! same options one at a time for callers that act as they go.
//!
//! ```
//! use optscan::{scan, OptionSpec, ParsedOption};
//!
//! let spec = OptionSpec::from_optstring("ho:v").unwrap();
//! let result = scan(&["-o", "out.txt", "-v", "extra"], &spec).unwrap();
//! assert_eq!(
//!     vec![
//!         ParsedOption::Argument('o', "out.txt".to_string()),
//!         ParsedOption::Flag('v'),
//!     ],
//!     result.options
//! );
//! assert_eq!(vec!["extra".to_string()], result.positionals);
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

mod command_line;
mod option_spec;
mod scanner;

pub use command_line::{parse_argument, CommandLine};
pub use option_spec::{HasArg, OptionDef, OptionSpec, ParsingStyle};
pub use scanner::{Cursor, Scanner, Step};

/////////////////////////////////////////////// Error //////////////////////////////////////////////

/// An error from building an [OptionSpec] or from scanning with one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The option requires an argument and the argument list ended first.
    MissingArgument(char),
    /// The option is not in the spec.  The scanner reports unknown options as
    /// [ParsedOption::Unknown]; this variant is for callers that treat them as failures.
    UnknownOption(char),
    /// The option character appears twice in one spec.
    DuplicateOption(char),
    /// The character cannot name an option.
    InvalidOptionChar(char),
    /// An option's argument could not be converted to the type the caller wanted.
    InvalidArgument {
        flag: char,
        argument: String,
        reason: String,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingArgument(flag) => {
                write!(f, "option requires an argument -- '{}'", flag)
            }
            Error::UnknownOption(flag) => write!(f, "invalid option -- '{}'", flag),
            Error::DuplicateOption(flag) => {
                write!(f, "option -{} is specified more than once", flag)
            }
            Error::InvalidOptionChar(flag) => {
                write!(f, "{:?} cannot be used as an option character", flag)
            }
            Error::InvalidArgument {
                flag,
                argument,
                reason,
            } => write!(f, "invalid argument {:?} for -{}: {}", argument, flag, reason),
        }
    }
}

impl std::error::Error for Error {}

/////////////////////////////////////////// ParsedOption ///////////////////////////////////////////

/// One option as encountered on the command line.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ParsedOption {
    /// A recognized flag that takes no argument.
    Flag(char),
    /// A recognized option and its argument.
    Argument(char, String),
    /// An option character the spec does not recognize.  Option scanning stops here.
    Unknown(char),
}

impl ParsedOption {
    pub fn flag(&self) -> char {
        match self {
            ParsedOption::Flag(flag) => *flag,
            ParsedOption::Argument(flag, _) => *flag,
            ParsedOption::Unknown(flag) => *flag,
        }
    }

    pub fn argument(&self) -> Option<&str> {
        match self {
            ParsedOption::Argument(_, argument) => Some(argument),
            _ => None,
        }
    }

    fn canonical(&self) -> Vec<String> {
        match self {
            ParsedOption::Flag(flag) | ParsedOption::Unknown(flag) => vec![format!("-{}", flag)],
            ParsedOption::Argument(flag, argument) => {
                vec![format!("-{}", flag), argument.clone()]
            }
        }
    }
}

//////////////////////////////////////////// ParseResult ///////////////////////////////////////////

/// The outcome of scanning one argument list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParseResult {
    /// Options in the order they were encountered.
    pub options: Vec<ParsedOption>,
    /// Positional arguments in their original relative order.
    pub positionals: Vec<String>,
}

impl ParseResult {
    /// True unless scanning stopped at an unknown option.
    pub fn is_success(&self) -> bool {
        self.unknown().is_none()
    }

    /// The unknown option that stopped scanning, if any.
    pub fn unknown(&self) -> Option<char> {
        self.options.iter().find_map(|option| match option {
            ParsedOption::Unknown(flag) => Some(*flag),
            _ => None,
        })
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.options
            .iter()
            .any(|option| !matches!(option, ParsedOption::Unknown(_)) && option.flag() == flag)
    }

    /// The last argument given to `flag`.
    pub fn argument(&self, flag: char) -> Option<&str> {
        self.arguments(flag).last().copied()
    }

    /// Every argument given to `flag`, in order.
    pub fn arguments(&self, flag: char) -> Vec<&str> {
        self.options
            .iter()
            .filter(|option| option.flag() == flag)
            .filter_map(ParsedOption::argument)
            .collect()
    }

    /// Turn an unknown option into [Error::UnknownOption].
    pub fn into_strict(self) -> Result<Self, Error> {
        match self.unknown() {
            Some(flag) => Err(Error::UnknownOption(flag)),
            None => Ok(self),
        }
    }

    /// The argument list in canonical form: one token per option, arguments in their own token,
    /// and a `--` only when some positional would otherwise scan as an option.
    ///
    /// Scanning the canonical form with the spec that produced `self` reproduces `self`.
    pub fn canonical_args(&self) -> Result<Vec<String>, Error> {
        if let Some(flag) = self.unknown() {
            return Err(Error::UnknownOption(flag));
        }
        let mut args: Vec<String> = self.options.iter().flat_map(|o| o.canonical()).collect();
        if self
            .positionals
            .iter()
            .any(|p| p.len() > 1 && p.starts_with('-'))
        {
            args.push("--".to_string());
        }
        args.extend(self.positionals.iter().cloned());
        Ok(args)
    }
}

/////////////////////////////////////////////// scan ///////////////////////////////////////////////

/// Scan `args` (without the program name) against `spec`.
///
/// Unknown options are data, not errors: the result ends its options with
/// [ParsedOption::Unknown] and every token after the unknown option's token is positional.  The
/// only error is [Error::MissingArgument].
pub fn scan<S: AsRef<str>>(args: &[S], spec: &OptionSpec) -> Result<ParseResult, Error> {
    let mut scanner = Scanner::new(spec, args);
    let mut options = Vec::new();
    for option in scanner.by_ref() {
        options.push(option?);
    }
    let positionals = scanner
        .positionals()
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect();
    Ok(ParseResult {
        options,
        positionals,
    })
}

/// Scan against a getopt optstring such as `"ho:v"`.
pub fn scan_optstring<S: AsRef<str>>(args: &[S], optstring: &str) -> Result<ParseResult, Error> {
    let spec = OptionSpec::from_str(optstring)?;
    scan(args, &spec)
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> OptionSpec {
        OptionSpec::from_optstring("ho:v").unwrap()
    }

    fn flag(c: char) -> ParsedOption {
        ParsedOption::Flag(c)
    }

    fn arg(c: char, s: &str) -> ParsedOption {
        ParsedOption::Argument(c, s.to_string())
    }

    fn result(options: Vec<ParsedOption>, positionals: &[&str]) -> ParseResult {
        ParseResult {
            options,
            positionals: positionals.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty() {
        let args: [&str; 0] = [];
        assert_eq!(Ok(ParseResult::default()), scan(&args, &spec()));
    }

    #[test]
    fn help() {
        assert_eq!(Ok(result(vec![flag('h')], &[])), scan(&["-h"], &spec()));
    }

    #[test]
    fn output_verbose_extra() {
        assert_eq!(
            Ok(result(vec![arg('o', "out.txt"), flag('v')], &["extra"])),
            scan(&["-o", "out.txt", "-v", "extra"], &spec())
        );
    }

    #[test]
    fn attached_equals_separate() {
        let attached = scan(&["-oout.txt"], &spec());
        assert_eq!(Ok(result(vec![arg('o', "out.txt")], &[])), attached);
        assert_eq!(attached, scan(&["-o", "out.txt"], &spec()));
    }

    #[test]
    fn missing_argument() {
        assert_eq!(Err(Error::MissingArgument('o')), scan(&["-o"], &spec()));
        assert_eq!(Err(Error::MissingArgument('o')), scan(&["-h", "-v", "-o"], &spec()));
        assert_eq!(Err(Error::MissingArgument('o')), scan(&["-ho"], &spec()));
    }

    #[test]
    fn unknown_halts() {
        assert_eq!(
            Ok(result(vec![ParsedOption::Unknown('x')], &[])),
            scan(&["-x"], &spec())
        );
        assert_eq!(
            Ok(result(
                vec![flag('v'), ParsedOption::Unknown('x')],
                &["-h", "-o", "file"]
            )),
            scan(&["-v", "-x", "-h", "-o", "file"], &spec())
        );
    }

    #[test]
    fn unknown_in_cluster_discards_rest_of_token() {
        assert_eq!(
            Ok(result(vec![flag('h'), ParsedOption::Unknown('x')], &["-v"])),
            scan(&["-hxv", "-v"], &spec())
        );
    }

    #[test]
    fn unknown_does_not_need_an_argument() {
        // -o lands after the unknown option and is positional.
        assert_eq!(
            Ok(result(vec![ParsedOption::Unknown('x')], &["-o"])),
            scan(&["-x", "-o"], &spec())
        );
    }

    #[test]
    fn stops_at_first_positional() {
        assert_eq!(
            Ok(result(vec![flag('h')], &["file", "-v", "-o"])),
            scan(&["-h", "file", "-v", "-o"], &spec())
        );
    }

    #[test]
    fn double_dash_is_consumed() {
        assert_eq!(
            Ok(result(vec![flag('v')], &["-h", "--"])),
            scan(&["-v", "--", "-h", "--"], &spec())
        );
        assert_eq!(Ok(result(vec![], &[])), scan(&["--"], &spec()));
    }

    #[test]
    fn lone_dash_is_positional() {
        assert_eq!(
            Ok(result(vec![flag('v')], &["-", "-h"])),
            scan(&["-v", "-", "-h"], &spec())
        );
    }

    #[test]
    fn argument_swallows_next_token() {
        assert_eq!(
            Ok(result(vec![arg('o', "--")], &["x"])),
            scan(&["-o", "--", "x"], &spec())
        );
        assert_eq!(
            Ok(result(vec![arg('o', "-v")], &[])),
            scan(&["-o", "-v"], &spec())
        );
        assert_eq!(Ok(result(vec![arg('o', "")], &[])), scan(&["-o", ""], &spec()));
    }

    #[test]
    fn clusters() {
        assert_eq!(
            Ok(result(vec![flag('h'), flag('v')], &[])),
            scan(&["-hv"], &spec())
        );
        assert_eq!(
            Ok(result(vec![flag('v'), arg('o', "file")], &["x"])),
            scan(&["-vofile", "x"], &spec())
        );
        assert_eq!(
            Ok(result(vec![flag('v'), arg('o', "hv")], &[])),
            scan(&["-vohv"], &spec())
        );
        assert_eq!(
            Ok(result(vec![flag('v'), arg('o', "file")], &[])),
            scan(&["-vo", "file"], &spec())
        );
    }

    #[test]
    fn repeated_options_keep_order() {
        let got = scan(&["-o", "a", "-v", "-ob", "-v"], &spec()).unwrap();
        assert_eq!(
            result(vec![arg('o', "a"), flag('v'), arg('o', "b"), flag('v')], &[]),
            got
        );
        assert_eq!(vec!["a", "b"], got.arguments('o'));
        assert_eq!(Some("b"), got.argument('o'));
        assert!(got.has_flag('v'));
        assert!(!got.has_flag('h'));
    }

    #[test]
    fn non_ascii() {
        let spec = OptionSpec::from_optstring("éo:").unwrap();
        assert_eq!(
            Ok(result(vec![flag('é'), arg('o', "ü")], &[])),
            scan(&["-éoü"], &spec)
        );
        assert_eq!(
            Ok(result(vec![ParsedOption::Unknown('ß')], &[])),
            scan(&["-ß"], &spec)
        );
    }

    #[test]
    fn owned_arguments() {
        let args: Vec<String> = vec!["-v".to_string(), "x".to_string()];
        assert_eq!(Ok(result(vec![flag('v')], &["x"])), scan(&args, &spec()));
    }

    #[test]
    fn permute() {
        let spec = spec().with_style(ParsingStyle::Permute);
        assert_eq!(
            Ok(result(vec![flag('h'), flag('v')], &["a", "b"])),
            scan(&["a", "-h", "b", "-v"], &spec)
        );
        assert_eq!(
            Ok(result(vec![flag('h')], &["a", "-v", "c"])),
            scan(&["a", "-h", "--", "-v", "c"], &spec)
        );
        assert_eq!(
            Ok(result(vec![flag('h'), ParsedOption::Unknown('x')], &["a", "-v"])),
            scan(&["a", "-h", "-x", "-v"], &spec)
        );
        assert_eq!(Err(Error::MissingArgument('o')), scan(&["a", "-o"], &spec));
    }

    #[test]
    fn idempotent() {
        let args = ["-hv", "-o", "x", "y", "-z"];
        assert_eq!(scan(&args, &spec()), scan(&args, &spec()));
    }

    #[test]
    fn success_indicator() {
        let ok = scan(&["-h", "x"], &spec()).unwrap();
        assert!(ok.is_success());
        assert_eq!(None, ok.unknown());
        assert_eq!(Ok(ok.clone()), ok.into_strict());
        let unknown = scan(&["-h", "-x", "y"], &spec()).unwrap();
        assert!(!unknown.is_success());
        assert_eq!(Some('x'), unknown.unknown());
        assert!(!unknown.has_flag('x'));
        assert_eq!(Err(Error::UnknownOption('x')), unknown.into_strict());
    }

    #[test]
    fn canonical_args() {
        let got = scan(&["-hvofile", "x"], &spec()).unwrap();
        assert_eq!(
            Ok(vec!["-h", "-v", "-o", "file", "x"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()),
            got.canonical_args()
        );
        let got = scan(&["--", "-h", "x"], &spec()).unwrap();
        let canonical = got.canonical_args().unwrap();
        assert_eq!(vec!["--", "-h", "x"], canonical);
        assert_eq!(Ok(got), scan(&canonical, &spec()));
        let got = scan(&["-x"], &spec()).unwrap();
        assert_eq!(Err(Error::UnknownOption('x')), got.canonical_args());
    }

    #[test]
    fn optstring_shortcut() {
        assert_eq!(
            Ok(result(vec![flag('a'), arg('b', "c")], &[])),
            scan_optstring(&["-ab", "c"], "ab:")
        );
        assert_eq!(
            Err(Error::DuplicateOption('a')),
            scan_optstring(&["-a"], "aa")
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(
            "option requires an argument -- 'o'",
            Error::MissingArgument('o').to_string()
        );
        assert_eq!("invalid option -- 'x'", Error::UnknownOption('x').to_string());
        assert_eq!(
            "option -h is specified more than once",
            Error::DuplicateOption('h').to_string()
        );
        assert_eq!(
            "':' cannot be used as an option character",
            Error::InvalidOptionChar(':').to_string()
        );
        assert_eq!(
            "invalid argument \"abc\" for -n: bad number",
            Error::InvalidArgument {
                flag: 'n',
                argument: "abc".to_string(),
                reason: "bad number".to_string(),
            }
            .to_string()
        );
    }
}
