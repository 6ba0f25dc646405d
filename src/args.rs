use std::error::Error;

use crate::clip::ClipId;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a string value for a flag
    pub fn extract_value(
        &mut self,
        flag: &str,
    ) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide a value after {} for {}", flag, self.command_name)
                .into()
        })
    }

    /// Extract a non-negative number for a flag
    pub fn extract_number(
        &mut self,
        flag: &str,
    ) -> Result<usize, Box<dyn Error>> {
        let raw = self.extract_value(flag)?;
        raw.parse().map_err(|_| {
            format!("{} for {} must be a number, got {raw}", flag, self.command_name)
                .into()
        })
    }

    /// Check if there are remaining arguments
    pub fn has_more(&self) -> bool {
        self.iter.len() > 0
    }

    /// Get next positional argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    /// Collect remaining args
    pub fn collect_remaining(self) -> Vec<String> {
        self.iter.collect()
    }
}

/// Parse a clip id given on the command line.
pub fn parse_id(raw: &str) -> Result<ClipId, Box<dyn Error>> {
    match raw.trim().parse::<ClipId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("Invalid clip id: {raw}").into()),
    }
}

/// Flags shared by the listing and display commands
#[derive(Default, Debug)]
pub struct CommonFlags {
    pub archived: bool,
    pub sort_key: Option<String>,
    pub relative_time: bool,
    pub plain: bool,
    pub full: bool,
    pub lines: Option<usize>,
    pub positional: Vec<String>,
}

impl CommonFlags {
    pub fn parse(args: Vec<String>, command_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut flags = Self::default();
        let mut parser = ArgParser::new(args, command_name);
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "-a" | "--archived" => flags.archived = true,
                "--sort" => flags.sort_key = Some(parser.extract_value("--sort")?),
                "-r" | "--relative" => flags.relative_time = true,
                "--plain" => flags.plain = true,
                "--full" => flags.full = true,
                "-n" | "--lines" => flags.lines = Some(parser.extract_number("--lines")?),
                other if other.starts_with("--") => {
                    return Err(format!("Unknown flag for {command_name}: {other}").into());
                }
                _ => flags.positional.push(arg),
            }
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_arg_parser_extract_value() {
        let mut parser = ArgParser::new(strings(&["--sort", "createdAtAsc"]), "test");
        let flag = parser.next().unwrap();
        assert_eq!(flag, "--sort");
        let value = parser.extract_value("--sort").unwrap();
        assert_eq!(value, "createdAtAsc");
        assert!(!parser.has_more());
    }

    #[test]
    fn test_arg_parser_extract_number() {
        let mut parser = ArgParser::new(strings(&["3", "x"]), "show");
        assert_eq!(parser.extract_number("--lines").unwrap(), 3);
        let err = parser.extract_number("--lines").unwrap_err();
        assert!(err.to_string().contains("must be a number"));
        assert!(parser.extract_value("--lines").is_err());
    }

    #[test]
    fn test_arg_parser_collect_remaining() {
        let parser = ArgParser::new(strings(&["1", "2", "3"]), "test");
        assert_eq!(parser.collect_remaining(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
        assert!(parse_id("abc").is_err());
    }

    #[test]
    fn test_common_flags() {
        let flags = CommonFlags::parse(
            strings(&["--archived", "--sort", "updatedAtAsc", "-r", "-n", "4", "7"]),
            "list",
        )
        .unwrap();
        assert!(flags.archived);
        assert_eq!(flags.sort_key.as_deref(), Some("updatedAtAsc"));
        assert!(flags.relative_time);
        assert_eq!(flags.lines, Some(4));
        assert_eq!(flags.positional, vec!["7"]);

        assert!(CommonFlags::parse(strings(&["--bogus"]), "list").is_err());
    }
}
