use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Ask a yes/no question; anything but `y`/`yes` (or EOF) means no.
pub fn confirm(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> Result<bool> {
    write!(output, "{question} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

pub fn open_in_browser(url: &str) -> Result<()> {
    open::that(url).with_context(|| format!("failed to open {url} in a browser"))
}

pub fn print_summary(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(reply: &str) -> (bool, String) {
        let mut input = reply.as_bytes();
        let mut output = Vec::new();
        let yes = confirm(&mut input, &mut output, "Open pull request?").unwrap();
        (yes, String::from_utf8(output).unwrap())
    }

    #[test]
    fn accepts_yes_in_any_case() {
        for reply in ["y\n", "Y\n", "yes\n", " YES \r\n"] {
            assert!(ask(reply).0, "{reply:?}");
        }
    }

    #[test]
    fn defaults_to_no() {
        for reply in ["\n", "n\n", "nope\n", "yess\n"] {
            assert!(!ask(reply).0, "{reply:?}");
        }
    }

    #[test]
    fn eof_means_no() {
        let (yes, prompt) = ask("");
        assert!(!yes);
        assert_eq!(prompt, "Open pull request? [y/N] \n");
    }
}
