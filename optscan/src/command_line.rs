use std::str::FromStr;

use super::{scan, Error, OptionSpec, ParsedOption};

//////////////////////////////////////////// CommandLine ///////////////////////////////////////////

/// A struct that fills itself from short options.
///
/// Implementors describe their options once in `option_spec` and fold each parsed option into
/// `self` in `apply`.  `canonical_command_line` is the inverse: the arguments that, when scanned,
/// reproduce `self`.
pub trait CommandLine: Sized + Default {
    fn option_spec() -> Result<OptionSpec, Error>;
    fn apply(&mut self, option: &ParsedOption) -> Result<(), Error>;
    fn canonical_command_line(&self) -> Vec<String>;

    fn from_command_line() -> Result<(Self, Vec<String>), Error> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_arguments(&args)
    }

    /// Build `Self` from `args`, returning it with the positional arguments.
    ///
    /// Unknown options are errors here, unlike [scan].
    fn from_arguments<S: AsRef<str>>(args: &[S]) -> Result<(Self, Vec<String>), Error> {
        let spec = Self::option_spec()?;
        let result = scan(args, &spec)?.into_strict()?;
        let mut command_line = Self::default();
        for option in result.options.iter() {
            command_line.apply(option)?;
        }
        Ok((command_line, result.positionals))
    }
}

////////////////////////////////////////// argument utils //////////////////////////////////////////

pub fn parse_argument<T>(flag: char, argument: &str) -> Result<T, Error>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    argument
        .parse::<T>()
        .map_err(|err| Error::InvalidArgument {
            flag,
            argument: argument.to_string(),
            reason: err.to_string(),
        })
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
