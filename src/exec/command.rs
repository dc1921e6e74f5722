// src/exec/command.rs

//! Building the literal command line for a task.

/// Placeholder replaced by the (quoted) file path.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Accepted alias of [`FILE_PLACEHOLDER`].
pub const FILES_PLACEHOLDER: &str = "{files}";

/// The command line to hand to the shell.
///
/// Generated commands already embed the file and are used verbatim.
pub fn command_line(template: &str, file: &str, is_function_generated: bool) -> String {
    if is_function_generated {
        template.to_string()
    } else {
        interpolate(template, file)
    }
}

/// Substitute `file` for every placeholder in `template`, or append it as
/// the last argument when there is no placeholder.
///
/// The path is shell-quoted; paths made only of safe characters are left
/// as they are.
pub fn interpolate(template: &str, file: &str) -> String {
    let quoted = shell_words::quote(file);

    let mut out = String::with_capacity(template.len() + quoted.len());
    let mut rest = template;
    let mut substituted = false;

    while let Some(idx) = rest.find('{') {
        let (head, tail) = rest.split_at(idx);
        out.push_str(head);

        let token = [FILES_PLACEHOLDER, FILE_PLACEHOLDER]
            .into_iter()
            .find(|t| tail.starts_with(t));

        match token {
            Some(t) => {
                out.push_str(&quoted);
                rest = &tail[t.len()..];
                substituted = true;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    if substituted {
        out
    } else {
        format!("{template} {quoted}")
    }
}
