//! Interactive commands read from stdin

use blinc_slider::Key;

/// A line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    GoTo(i64),
    /// Jump through a pagination indicator (1-based on the command line)
    Indicator(usize),
    Key(Key),
    Autoplay,
    Stop,
    Resize(u16),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    ///
    /// Returns `None` for blank lines and anything unrecognized.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let head = parts.next()?;
        let arg = parts.next();

        let command = match head {
            "n" | "next" => Command::Next,
            "p" | "prev" => Command::Prev,
            "g" | "goto" => Command::GoTo(arg?.parse().ok()?),
            "i" | "dot" => {
                let position: usize = arg?.parse().ok()?;
                Command::Indicator(position.checked_sub(1)?)
            }
            "<" => Command::Key(Key::ArrowLeft),
            ">" => Command::Key(Key::ArrowRight),
            "a" | "autoplay" => Command::Autoplay,
            "s" | "stop" => Command::Stop,
            "r" | "resize" => Command::Resize(arg?.parse().ok()?),
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

pub const HELP: &str = "\
commands:
  n, next        next slide
  p, prev        previous slide
  g <index>      go to slide (0-based, clamped)
  i <n>          activate pagination dot n (1-based)
  <, >           arrow keys
  a, autoplay    (re)start autoplay
  s, stop        stop autoplay
  r <columns>    resize the viewport
  q, quit        exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("n"), Some(Command::Next));
        assert_eq!(Command::parse("  prev "), Some(Command::Prev));
        assert_eq!(Command::parse("g -3"), Some(Command::GoTo(-3)));
        assert_eq!(Command::parse("i 2"), Some(Command::Indicator(1)));
        assert_eq!(Command::parse(">"), Some(Command::Key(Key::ArrowRight)));
        assert_eq!(Command::parse("r 72"), Some(Command::Resize(72)));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("g"), None);
        assert_eq!(Command::parse("g two"), None);
        assert_eq!(Command::parse("i 0"), None);
        assert_eq!(Command::parse("jump"), None);
    }
}
