//! Prompt file loader.

use std::path::Path;

/// Load a prompt file, optionally dropping comment lines.
///
/// A comment line is any line whose trimmed form starts with `#`. Remaining
/// lines keep their original line endings.
///
/// Returns `None` when the path is not a regular file, when the file is
/// empty, or when it cannot be read as UTF-8 text. Read failures are logged.
///
/// # Example
/// ```no_run
/// use promptreg_prompt::load_prompt_file;
///
/// if let Some(text) = load_prompt_file("prompts/cv_enhancer/cv_enhancer_prompt_v1.txt", true) {
///     println!("{} characters", text.len());
/// }
/// ```
pub fn load_prompt_file(path: impl AsRef<Path>, ignore_comments: bool) -> Option<String> {
    let path = path.as_ref();

    let metadata = match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => {
            tracing::debug!("File not found at path: {:?}", path);
            return None;
        }
    };

    if metadata.len() == 0 {
        tracing::debug!("File exists but is empty: {:?}", path);
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::error!("Failed to read file {:?}: {}", path, e);
            return None;
        }
    };

    let content = if ignore_comments {
        strip_comment_lines(&content)
    } else {
        content
    };

    tracing::debug!("Loaded {:?} ({} characters)", path, content.chars().count());
    Some(content)
}

fn strip_comment_lines(content: &str) -> String {
    content
        .split_inclusive('\n')
        .filter(|line| !line.trim().starts_with('#'))
        .collect()
}
