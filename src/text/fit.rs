use crate::foundation::error::{GridError, GridResult};
use crate::text::shaper::{FontRole, TextShaper, TextStyle};

/// Appended to shortened text.
pub const ELLIPSIS: &str = "...";

/// Largest size on the ladder `start, start - step, ...` whose measured width fits
/// `max_width`, never going below `min`.
pub fn fit_font_size(
    shaper: &mut dyn TextShaper,
    text: &str,
    role: FontRole,
    max_width: f64,
    start: f32,
    min: f32,
    step: f32,
) -> GridResult<f32> {
    if !(step.is_finite() && step > 0.0) {
        return Err(GridError::validation("font size step must be finite and > 0"));
    }
    if !(min.is_finite() && start.is_finite() && min > 0.0 && min <= start) {
        return Err(GridError::validation(
            "font size ladder must satisfy 0 < min <= start",
        ));
    }

    let mut size = start;
    while size > min && shaper.measure(text, TextStyle::new(role, size))? > max_width {
        size = (size - step).max(min);
    }
    Ok(size)
}

/// `text` unchanged if it fits, otherwise the longest char prefix (trailing whitespace
/// trimmed) that fits with [`ELLIPSIS`] appended. Falls back to a bare [`ELLIPSIS`].
pub fn truncate_with_ellipsis(
    shaper: &mut dyn TextShaper,
    text: &str,
    style: TextStyle,
    max_width: f64,
) -> GridResult<String> {
    if shaper.measure(text, style)? <= max_width {
        return Ok(text.to_string());
    }

    let ends: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    for &end in ends.iter().rev() {
        let head = text[..end].trim_end();
        if head.is_empty() {
            break;
        }
        let candidate = format!("{head}{ELLIPSIS}");
        if shaper.measure(&candidate, style)? <= max_width {
            return Ok(candidate);
        }
    }
    Ok(ELLIPSIS.to_string())
}

/// Greedy word wrap into at most `max_lines` lines.
///
/// Words past the last allowed line are folded into it. Any line still wider than `max_width`
/// (the folded last line, or a single overlong word) is cut with [`truncate_with_ellipsis`].
/// Always returns at least one line.
pub fn wrap_lines(
    shaper: &mut dyn TextShaper,
    text: &str,
    style: TextStyle,
    max_width: f64,
    max_lines: u32,
) -> GridResult<Vec<String>> {
    let max_lines = max_lines.max(1) as usize;

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if shaper.measure(&candidate, style)? <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        let folded = lines[max_lines - 1..].join(" ");
        lines.truncate(max_lines - 1);
        lines.push(folded);
    }

    lines
        .into_iter()
        .map(|line| truncate_with_ellipsis(shaper, &line, style, max_width))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
