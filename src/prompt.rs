//! Interactive questions asked when a flag is missing.

use crate::install::InstallScope;
use crate::models::Tier;
use std::io::{self, BufRead, Write};

fn read_choice(input: &mut impl BufRead) -> String {
    let mut line = String::new();
    input.read_line(&mut line).ok();
    line.trim().to_string()
}

/// Ask where to install. Anything but "2" picks the project scope.
pub fn ask_scope(input: &mut impl BufRead, out: &mut impl Write) -> InstallScope {
    writeln!(out, "Where should OctoAgents be installed?").ok();
    writeln!(out, "  1) project  ./.opencode (default)").ok();
    writeln!(out, "  2) global   ~/.config/opencode").ok();
    write!(out, "Choice [1]: ").ok();
    out.flush().ok();

    match read_choice(input).as_str() {
        "2" | "global" => InstallScope::Global,
        _ => InstallScope::Project,
    }
}

/// Ask which provider to use when none was detected.
pub fn ask_provider(input: &mut impl BufRead, out: &mut impl Write) -> Tier {
    writeln!(out, "No model provider detected.").ok();
    writeln!(out, "  1) bailian  Model Studio Coding Plan (needs DASHSCOPE_API_KEY)").ok();
    writeln!(out, "  2) copilot  GitHub Copilot").ok();
    writeln!(out, "  3) free     OpenCode free models (default)").ok();
    write!(out, "Choice [3]: ").ok();
    out.flush().ok();

    match read_choice(input).as_str() {
        "1" | "bailian" => Tier::Bailian,
        "2" | "copilot" => Tier::Copilot,
        _ => Tier::Free,
    }
}

pub fn ask_scope_stdin() -> InstallScope {
    ask_scope(&mut io::stdin().lock(), &mut io::stdout())
}

pub fn ask_provider_stdin() -> Tier {
    ask_provider(&mut io::stdin().lock(), &mut io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_scope_choices() {
        let mut out = Vec::new();
        assert_eq!(ask_scope(&mut Cursor::new("2\n"), &mut out), InstallScope::Global);
        assert_eq!(ask_scope(&mut Cursor::new("1\n"), &mut out), InstallScope::Project);
        assert_eq!(ask_scope(&mut Cursor::new("\n"), &mut out), InstallScope::Project);
        assert_eq!(ask_scope(&mut Cursor::new(""), &mut out), InstallScope::Project);
        assert!(String::from_utf8(out).unwrap().contains("global"));
    }

    #[test]
    fn test_provider_choices() {
        let mut out = Vec::new();
        assert_eq!(ask_provider(&mut Cursor::new("1\n"), &mut out), Tier::Bailian);
        assert_eq!(ask_provider(&mut Cursor::new(" 2 \n"), &mut out), Tier::Copilot);
        assert_eq!(ask_provider(&mut Cursor::new("x\n"), &mut out), Tier::Free);
    }
}
