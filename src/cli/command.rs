//! Shell-line parsing: tokenizer and the command table.

use crate::error::ApiError;

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Mkdir { name: String },
    Cd { path: String },
    Ls { path: Option<String> },
    Cat { path: String },
    Touch { name: String },
    Echo { text: String, path: String },
    Mv { source: String, destination: String },
    Cp { source: String, destination: String },
    Rm { path: String },
    Grep { pattern: String, path: String },
    Save,
    Load,
    Log,
    Help,
    Exit,
}

/// Split a line into words.
///
/// Whitespace separates words. A double- or single-quoted span is part of
/// the current word; inside double quotes `\n`, `\t`, `\\` and `\"` are
/// escapes. `""` on its own yields an empty word.
pub fn tokenize(line: &str) -> Result<Vec<String>, ApiError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some('n') => current.push('\n'),
                            Some('t') => current.push('\t'),
                            Some('\\') => current.push('\\'),
                            Some('"') => current.push('"'),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err(unterminated('"')),
                        },
                        Some(other) => current.push(other),
                        None => return Err(unterminated('"')),
                    }
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(other) => current.push(other),
                        None => return Err(unterminated('\'')),
                    }
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn unterminated(quote: char) -> ApiError {
    ApiError::InputError(format!("Unterminated {} quote", quote))
}

/// Parse one shell line. Blank lines parse to `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ApiError> {
    let words = tokenize(line)?;
    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.as_str() {
        "mkdir" => {
            let [name] = exact::<1>(args, "mkdir <name>")?;
            ShellCommand::Mkdir { name }
        }
        "cd" => {
            let [path] = exact::<1>(args, "cd <path>")?;
            ShellCommand::Cd { path }
        }
        "ls" => match args {
            [] => ShellCommand::Ls { path: None },
            [path] => ShellCommand::Ls {
                path: Some(path.clone()),
            },
            _ => return Err(usage("ls [path]")),
        },
        "cat" => {
            let [path] = exact::<1>(args, "cat <path>")?;
            ShellCommand::Cat { path }
        }
        "touch" => {
            let [name] = exact::<1>(args, "touch <name>")?;
            ShellCommand::Touch { name }
        }
        "echo" => {
            let Some((path, text)) = args.split_last() else {
                return Err(usage("echo <text...> <path>"));
            };
            ShellCommand::Echo {
                text: text.join(" "),
                path: path.clone(),
            }
        }
        "mv" => {
            let [source, destination] = exact::<2>(args, "mv <source> <destination>")?;
            ShellCommand::Mv {
                source,
                destination,
            }
        }
        "cp" => {
            let [source, destination] = exact::<2>(args, "cp <source> <destination>")?;
            ShellCommand::Cp {
                source,
                destination,
            }
        }
        "rm" => {
            let [path] = exact::<1>(args, "rm <path>")?;
            ShellCommand::Rm { path }
        }
        "grep" => {
            let [pattern, path] = exact::<2>(args, "grep <pattern> <path>")?;
            ShellCommand::Grep { pattern, path }
        }
        "save" => no_args(args, "save", ShellCommand::Save)?,
        "load" => no_args(args, "load", ShellCommand::Load)?,
        "log" => no_args(args, "log", ShellCommand::Log)?,
        "help" => ShellCommand::Help,
        "exit" => ShellCommand::Exit,
        other => {
            return Err(ApiError::InputError(format!(
                "Unknown command '{}'. Type \"help\" for a list of commands.",
                other
            )))
        }
    };
    Ok(Some(command))
}

fn exact<const N: usize>(args: &[String], usage_text: &str) -> Result<[String; N], ApiError> {
    <[String; N]>::try_from(args.to_vec()).map_err(|_| usage(usage_text))
}

fn no_args(args: &[String], usage_text: &str, command: ShellCommand) -> Result<ShellCommand, ApiError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(usage(usage_text))
    }
}

fn usage(text: &str) -> ApiError {
    ApiError::InputError(format!("Usage: {}", text))
}
