use super::{Error, HasArg, OptionSpec, ParsedOption, ParsingStyle};

////////////////////////////////////////////// Cursor //////////////////////////////////////////////

/// A position within an argument list.
///
/// `offset` is non-zero only while walking a cluster such as `-hv`, and then it is the byte
/// offset of the next option character within `args[index]`.  Cursors are only produced by
/// [Cursor::start] and [Cursor::step], so `offset` always lands on a character boundary inside
/// the token.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    index: usize,
    offset: usize,
}

/// The outcome of advancing a [Cursor] by one event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Step {
    /// An option was recognized; scanning resumes at the cursor.
    Parsed(ParsedOption, Cursor),
    /// The token at the index is positional and was set aside.  Only produced by
    /// [ParsingStyle::Permute].
    Skipped(usize, Cursor),
    /// An unrecognized option character.  Option scanning is over and positional arguments begin
    /// at the index.
    Halted(char, usize),
    /// Option scanning is over and positional arguments begin at the index.
    Done(usize),
}

impl Cursor {
    pub fn start() -> Self {
        Self::default()
    }

    /// The index of the token the cursor points at.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compute the next event without changing anything.
    pub fn step<S: AsRef<str>>(self, spec: &OptionSpec, args: &[S]) -> Result<Step, Error> {
        let Some(arg) = args.get(self.index) else {
            return Ok(Step::Done(args.len()));
        };
        let token: &str = arg.as_ref();
        let mut offset = self.offset;
        if offset == 0 {
            if token == "--" {
                return Ok(Step::Done(self.index + 1));
            }
            if !is_option_token(token) {
                return match spec.style() {
                    ParsingStyle::StopAtFirstFree => Ok(Step::Done(self.index)),
                    ParsingStyle::Permute => {
                        Ok(Step::Skipped(self.index, Cursor::at_token(self.index + 1)))
                    }
                };
            }
            offset = 1;
        }
        // Option tokens are longer than "-" and cluster offsets stop short of the end, so a
        // character is always present.
        let Some(flag) = token[offset..].chars().next() else {
            return Ok(Step::Done(self.index));
        };
        let after = offset + flag.len_utf8();
        let Some(def) = spec.get(flag) else {
            return Ok(Step::Halted(flag, self.index + 1));
        };
        match def.has_arg {
            HasArg::No => {
                let next = if after < token.len() {
                    Cursor {
                        index: self.index,
                        offset: after,
                    }
                } else {
                    Cursor::at_token(self.index + 1)
                };
                Ok(Step::Parsed(ParsedOption::Flag(flag), next))
            }
            HasArg::Yes if after < token.len() => Ok(Step::Parsed(
                ParsedOption::Argument(flag, token[after..].to_string()),
                Cursor::at_token(self.index + 1),
            )),
            HasArg::Yes => match args.get(self.index + 1) {
                Some(argument) => Ok(Step::Parsed(
                    ParsedOption::Argument(flag, argument.as_ref().to_string()),
                    Cursor::at_token(self.index + 2),
                )),
                None => Err(Error::MissingArgument(flag)),
            },
        }
    }

    fn at_token(index: usize) -> Self {
        Self { index, offset: 0 }
    }
}

// A lone "-" conventionally names stdin and is positional.
fn is_option_token(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

////////////////////////////////////////////// Scanner /////////////////////////////////////////////

/// Scanner walks an argument list one option at a time.
///
/// Each call to `next` yields the next option in encounter order.  The iterator ends when option
/// scanning ends; an unknown option is yielded and then ends it, and so does an error.  Once it
/// has ended normally, [Scanner::positionals] returns the residual arguments.
#[derive(Clone, Debug)]
pub struct Scanner<'a, S> {
    spec: &'a OptionSpec,
    args: &'a [S],
    cursor: Cursor,
    skipped: Vec<usize>,
    rest: Option<usize>,
    failed: bool,
}

impl<'a, S: AsRef<str>> Scanner<'a, S> {
    pub fn new(spec: &'a OptionSpec, args: &'a [S]) -> Self {
        Self {
            spec,
            args,
            cursor: Cursor::start(),
            skipped: Vec::new(),
            rest: None,
            failed: false,
        }
    }

    /// The residual positional arguments in their original relative order.
    ///
    /// Returns `None` while options remain to be scanned, and after an error.
    pub fn positionals(&self) -> Option<Vec<&'a str>> {
        if self.failed {
            return None;
        }
        let rest = self.rest?;
        let args: &'a [S] = self.args;
        let mut positionals: Vec<&'a str> =
            self.skipped.iter().map(|idx| args[*idx].as_ref()).collect();
        positionals.extend(args[rest..].iter().map(|arg| arg.as_ref()));
        Some(positionals)
    }
}

impl<'a, S: AsRef<str>> Iterator for Scanner<'a, S> {
    type Item = Result<ParsedOption, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_some() {
            return None;
        }
        loop {
            match self.cursor.step(self.spec, self.args) {
                Ok(Step::Parsed(option, cursor)) => {
                    self.cursor = cursor;
                    return Some(Ok(option));
                }
                Ok(Step::Skipped(idx, cursor)) => {
                    self.skipped.push(idx);
                    self.cursor = cursor;
                }
                Ok(Step::Halted(flag, rest)) => {
                    self.rest = Some(rest);
                    return Some(Ok(ParsedOption::Unknown(flag)));
                }
                Ok(Step::Done(rest)) => {
                    self.rest = Some(rest);
                    return None;
                }
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<'a, S: AsRef<str>> std::iter::FusedIterator for Scanner<'a, S> {}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
