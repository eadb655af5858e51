//! Plain aligned tables for `--format table`.

const MIN_COLUMN: usize = 6;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render string rows under `headers`, shrinking the widest columns first
/// when `max_width` is set.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths = column_widths(headers, rows);
    if let Some(max_width) = options.max_width {
        shrink_to(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);

    let divider = "-".repeat(header_line.chars().count());
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);

    for row in rows {
        let cells = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let text = clip(row.get(index).map_or("-", String::as_str), *width);
                let right = is_numeric(&text);
                let padded = pad(&text, *width, right);
                if options.color {
                    paint(&padded, &text)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>();
        lines.push(cells.join(GAP));
    }

    lines.join("\n")
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN])
                .max()
                .unwrap_or(MIN_COLUMN)
        })
        .collect()
}

fn shrink_to(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

/// Colour a padded cell by the meaning of its text.
fn paint(padded: &str, text: &str) -> String {
    let code = match text.to_ascii_lowercase().as_str() {
        "allow" | "true" | "completed" | "approved" | "acknowledged" | "sent" => "32",
        "current" | "pending" | "pending_approval" | "sent_to_vendor" | "upcoming" => "33",
        "deny" | "false" | "cancelled" | "failed" | "not_reachable" | "already_terminal" => "31",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> TableOptions {
        TableOptions {
            max_width: None,
            color: false,
        }
    }

    #[test]
    fn columns_align_across_rows() {
        let headers = ["to", "decision"];
        let rows = vec![
            vec!["APPROVED".to_string(), "allow".to_string()],
            vec!["CANCELLED".to_string(), "deny".to_string()],
        ];
        let table = render_rows(&headers, &rows, plain());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2].find("allow"), lines[3].find("deny"));
    }

    #[test]
    fn numbers_are_right_aligned() {
        let rows = vec![vec!["7".to_string()], vec!["1200".to_string()]];
        let table = render_rows(&["total"], &rows, plain());
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[2].ends_with('7'));
        assert!(lines[2].starts_with(' '));
    }

    #[test]
    fn narrow_terminal_truncates_wide_columns() {
        let rows = vec![vec!["x".repeat(80), "short".to_string()]];
        let table = render_rows(
            &["description", "user"],
            &rows,
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );
        assert!(table.lines().all(|line| line.chars().count() <= 40));
        assert!(table.contains('…'));
    }

    #[test]
    fn colour_wraps_known_words() {
        let rows = vec![vec!["deny".to_string()]];
        let table = render_rows(
            &["decision"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[31m"));
    }
}
