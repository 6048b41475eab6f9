//! Single-line rendering of an argument vector.
//!
//! Arguments are handed to the child process as a vector, so no quoting is
//! needed to run it. The rendered line is what gets logged, and it follows the
//! MSVC runtime parsing rules so it can be pasted into a Windows shell as well
//! as a POSIX one for the common cases (paths with spaces, embedded quotes).

/// Escape each argument and join them with single spaces.
pub fn escape_and_concatenate<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().map(|arg| escape_single_arg(arg.as_ref())).collect::<Vec<_>>().join(" ")
}

/// Escape one argument.
///
/// - arguments containing a space, tab or newline are wrapped in quotes,
///   unless they are already wrapped
/// - a quote inside the argument becomes `\"`, and the backslashes before it
///   are doubled
/// - trailing backslashes are doubled when the argument ends up quoted, so
///   they do not escape the closing quote
pub fn escape_single_arg(arg: &str) -> String {
    let already_quoted = is_surrounded_with_quotes(arg);
    let needs_quotes = !already_quoted && contains_whitespace(arg);
    let quoted = needs_quotes || already_quoted;

    let mut escaped = String::with_capacity(arg.len() + 2);
    if needs_quotes {
        escaped.push('"');
    }

    let mut chars = arg.chars().peekable();
    loop {
        let mut backslashes = 0;
        while chars.next_if_eq(&'\\').is_some() {
            backslashes += 1;
        }

        match chars.next() {
            None => {
                let count = if quoted { backslashes * 2 } else { backslashes };
                escaped.extend(std::iter::repeat_n('\\', count));
                break;
            }
            Some('"') => {
                escaped.extend(std::iter::repeat_n('\\', backslashes * 2 + 1));
                escaped.push('"');
            }
            Some(c) => {
                escaped.extend(std::iter::repeat_n('\\', backslashes));
                escaped.push(c);
            }
        }
    }

    if needs_quotes {
        escaped.push('"');
    }
    escaped
}

fn is_surrounded_with_quotes(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('"') && arg.ends_with('"')
}

fn contains_whitespace(arg: &str) -> bool {
    arg.contains([' ', '\t', '\n'])
}
