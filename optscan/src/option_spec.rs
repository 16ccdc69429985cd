use std::str::FromStr;

use super::Error;

////////////////////////////////////////////// HasArg //////////////////////////////////////////////

/// Whether an option consumes an argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HasArg {
    /// The option is a plain flag.
    No,
    /// The option requires an argument, attached (`-ofile`) or in the next token (`-o file`).
    Yes,
}

/////////////////////////////////////////// ParsingStyle ///////////////////////////////////////////

/// How the scanner treats the first token that is not an option.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ParsingStyle {
    /// Option scanning ends at the first non-option token.  This is POSIX getopt.
    #[default]
    StopAtFirstFree,
    /// Non-option tokens are set aside and scanning continues.  This is GNU getopt.
    Permute,
}

///////////////////////////////////////////// OptionDef ////////////////////////////////////////////

/// A single recognized short option.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionDef {
    pub flag: char,
    pub has_arg: HasArg,
    pub desc: String,
    pub hint: String,
}

impl OptionDef {
    fn usage_fragment(&self) -> String {
        match self.has_arg {
            HasArg::No => format!("-{}", self.flag),
            HasArg::Yes => format!("-{} {}", self.flag, self.hint),
        }
    }
}

//////////////////////////////////////////// OptionSpec ////////////////////////////////////////////

/// The ordered set of options a scanner recognizes.
///
/// Option characters are unique within a spec; every constructor enforces this and reports a
/// violation as [Error::DuplicateOption].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OptionSpec {
    defs: Vec<OptionDef>,
    style: ParsingStyle,
}

impl OptionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a getopt optstring such as `"ho:v"`.
    ///
    /// A character followed by `:` requires an argument.  A leading `+` asks for
    /// [ParsingStyle::StopAtFirstFree] and a leading `:` is accepted for compatibility; errors are
    /// always returned to the caller, so getopt's silent mode has nothing to change.
    pub fn from_optstring(optstring: &str) -> Result<Self, Error> {
        let mut spec = Self::new();
        let mut chars = optstring.chars().peekable();
        if chars.next_if_eq(&'+').is_some() {
            spec.style = ParsingStyle::StopAtFirstFree;
        }
        chars.next_if_eq(&':');
        while let Some(flag) = chars.next() {
            let has_arg = if chars.next_if_eq(&':').is_some() {
                HasArg::Yes
            } else {
                HasArg::No
            };
            spec.push(OptionDef {
                flag,
                has_arg,
                desc: String::new(),
                hint: "arg".to_string(),
            })?;
        }
        Ok(spec)
    }

    /// Add a flag that takes no argument.
    pub fn flag(mut self, flag: char, desc: &str) -> Result<Self, Error> {
        self.push(OptionDef {
            flag,
            has_arg: HasArg::No,
            desc: desc.to_string(),
            hint: String::new(),
        })?;
        Ok(self)
    }

    /// Add an option that requires an argument.  `hint` names the argument in usage text.
    pub fn required(mut self, flag: char, desc: &str, hint: &str) -> Result<Self, Error> {
        self.push(OptionDef {
            flag,
            has_arg: HasArg::Yes,
            desc: desc.to_string(),
            hint: hint.to_string(),
        })?;
        Ok(self)
    }

    pub fn with_style(mut self, style: ParsingStyle) -> Self {
        self.style = style;
        self
    }

    pub fn push(&mut self, def: OptionDef) -> Result<(), Error> {
        if !valid_option_char(def.flag) {
            return Err(Error::InvalidOptionChar(def.flag));
        }
        if self.get(def.flag).is_some() {
            return Err(Error::DuplicateOption(def.flag));
        }
        self.defs.push(def);
        Ok(())
    }

    pub fn get(&self, flag: char) -> Option<&OptionDef> {
        self.defs.iter().find(|def| def.flag == flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn style(&self) -> ParsingStyle {
        self.style
    }

    /// Render the spec back into getopt's optstring form.
    pub fn optstring(&self) -> String {
        let mut optstring = String::with_capacity(self.defs.len() * 2);
        for def in self.defs.iter() {
            optstring.push(def.flag);
            if def.has_arg == HasArg::Yes {
                optstring.push(':');
            }
        }
        optstring
    }

    /// The one-line synopsis, e.g. `Usage: prog [-h] [-o filename] [-v]`.
    pub fn usage(&self, program: &str) -> String {
        let mut usage = format!("Usage: {}", program);
        for def in self.defs.iter() {
            usage += &format!(" [{}]", def.usage_fragment());
        }
        usage
    }

    /// The synopsis followed by one line per option.
    pub fn help(&self, program: &str) -> String {
        let mut help = self.usage(program);
        help.push('\n');
        if self.defs.is_empty() {
            return help;
        }
        let width = self
            .defs
            .iter()
            .map(|def| def.usage_fragment().chars().count())
            .max()
            .unwrap_or(0);
        help += "\nOptions:\n";
        for def in self.defs.iter() {
            let line = format!("    {:<width$}    {}", def.usage_fragment(), def.desc);
            help += line.trim_end();
            help.push('\n');
        }
        help
    }
}

impl FromStr for OptionSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_optstring(s)
    }
}

// '-' would be indistinguishable from the "--" terminator and ':' is optstring syntax.
fn valid_option_char(c: char) -> bool {
    c != '-' && c != ':' && !c.is_whitespace() && !c.is_control()
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
