/// Minimal HTML-subset parser for report text
///
/// The report strings use the same legacy markup the original client fed to
/// its HTML formatter: `<b>`, `</b>`, and `<br>`. Nothing else is
/// interpreted; unknown tags pass through as literal text.

/// A run of text with a single style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
}

/// Parse markup into lines of styled segments.
/// `<br>` starts a new line; `<b>`/`</b>` toggle bold for following text.
pub fn parse(markup: &str) -> Vec<Vec<Segment>> {
    let mut lines: Vec<Vec<Segment>> = vec![Vec::new()];
    let mut buf = String::new();
    let mut bold = false;
    let mut rest = markup;

    fn flush(buf: &mut String, lines: &mut [Vec<Segment>], bold: bool) {
        if !buf.is_empty() {
            let line = lines.last_mut().expect("lines is never empty");
            line.push(Segment {
                text: std::mem::take(buf),
                bold,
            });
        }
    }

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<b>") {
            flush(&mut buf, &mut lines, bold);
            bold = true;
            rest = after;
        } else if let Some(after) = rest.strip_prefix("</b>") {
            flush(&mut buf, &mut lines, bold);
            bold = false;
            rest = after;
        } else if let Some(after) = rest.strip_prefix("<br>") {
            flush(&mut buf, &mut lines, bold);
            lines.push(Vec::new());
            rest = after;
        } else {
            // Consume literal text up to the next tag candidate. The first
            // character is always taken so an unrecognized '<' cannot loop.
            let first = rest.chars().next().map(char::len_utf8).unwrap_or(1);
            match rest[first..].find('<') {
                Some(i) => {
                    let end = first + i;
                    buf.push_str(&rest[..end]);
                    rest = &rest[end..];
                }
                None => {
                    buf.push_str(rest);
                    rest = "";
                }
            }
        }
    }
    flush(&mut buf, &mut lines, bold);

    lines
}

/// Strip markup down to plain text, one line per `<br>`.
pub fn plain_text(markup: &str) -> String {
    parse(markup)
        .iter()
        .map(|line| {
            line.iter()
                .map(|seg| seg.text.as_str())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, bold: bool) -> Segment {
        Segment {
            text: text.to_string(),
            bold,
        }
    }

    #[test]
    fn bold_runs_are_split_out() {
        let lines = parse("<b>Disease:</b> Leaf_Blight");
        assert_eq!(
            lines,
            vec![vec![seg("Disease:", true), seg(" Leaf_Blight", false)]]
        );
    }

    #[test]
    fn br_starts_a_new_line() {
        let lines = parse("first<br>second");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec![seg("first", false)]);
        assert_eq!(lines[1], vec![seg("second", false)]);
    }

    #[test]
    fn consecutive_br_produces_an_empty_line() {
        let lines = parse("a<br><br>b");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn unknown_tags_are_literal_text() {
        let lines = parse("1 <i>2</i> 3");
        assert_eq!(lines, vec![vec![seg("1 <i>2</i> 3", false)]]);
    }

    #[test]
    fn plain_text_strips_markup() {
        assert_eq!(
            plain_text("🌿 <b>Prediction:</b><br><b>Disease:</b> Spot"),
            "🌿 Prediction:\nDisease: Spot"
        );
    }

    #[test]
    fn lone_angle_bracket_is_kept() {
        let lines = parse("a < b");
        assert_eq!(lines, vec![vec![seg("a < b", false)]]);
    }
}
