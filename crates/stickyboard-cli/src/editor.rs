//! Terminal interaction: $EDITOR sessions and yes/no prompts

use std::env;
use std::io::{self, BufRead, Write};
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};

/// Editors tried, in order, when neither $EDITOR nor $VISUAL is set
const FALLBACK_EDITORS: [&str; 4] = ["nano", "vim", "vi", "notepad"];

/// Let the user rewrite `initial` in their editor and return the result
pub fn edit_text(initial: &str) -> Result<String> {
    let (program, args) = editor_command()?;

    let mut buffer = tempfile::Builder::new()
        .prefix("stickyboard-")
        .suffix(".md")
        .tempfile()
        .context("Failed to create a scratch file for the editor")?;
    buffer
        .write_all(initial.as_bytes())
        .and_then(|_| buffer.flush())
        .context("Failed to fill the scratch file")?;

    let status = Command::new(&program)
        .args(&args)
        .arg(buffer.path())
        .status()
        .with_context(|| format!("Could not launch editor '{}'", program))?;
    if !status.success() {
        bail!("Editor '{}' exited with {}; widget left unchanged", program, status);
    }

    std::fs::read_to_string(buffer.path()).context("Failed to read back the edited text")
}

/// Program and leading arguments of the editor to run (`code --wait` works)
fn editor_command() -> Result<(String, Vec<String>)> {
    let configured = ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.trim().is_empty());

    if let Some(line) = configured {
        return split_command(&line).ok_or_else(|| anyhow!("Editor command is empty"));
    }

    FALLBACK_EDITORS
        .iter()
        .find(|name| on_path(name))
        .map(|name| (name.to_string(), Vec::new()))
        .ok_or_else(|| anyhow!("No editor found. Set $EDITOR, for example: export EDITOR=nano"))
}

fn split_command(line: &str) -> Option<(String, Vec<String>)> {
    let mut parts = line.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

fn on_path(program: &str) -> bool {
    env::var_os("PATH").map_or(false, |paths| {
        env::split_paths(&paths).any(|dir| dir.join(program).is_file())
    })
}

/// Ask a yes/no question on the terminal; anything but yes means no
///
/// Without a TTY on stdin nobody can answer, so the answer is no.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }
    ask(prompt, io::stdin().lock(), io::stdout())
}

fn ask(prompt: &str, mut input: impl BufRead, mut out: impl Write) -> Result<bool> {
    write!(out, "{} [y/N] ", prompt)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
