/// Report rendering widgets
pub mod markup;

use iced::font::Weight;
use iced::widget::{column, row, text};
use iced::{Element, Font};

/// Bold variant of the default font, used for `<b>` segments
pub const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

/// Render report markup as rows of styled text.
/// Empty lines (from `<br><br>`) become blank spacer rows.
pub fn markup_view<'a, Message: 'a>(source: &str) -> Element<'a, Message> {
    let mut lines = column![].spacing(2);

    for segments in markup::parse(source) {
        if segments.is_empty() {
            lines = lines.push(text(" "));
            continue;
        }

        let mut line = row![];
        for segment in segments {
            let mut fragment = text(segment.text).size(16);
            if segment.bold {
                fragment = fragment.font(BOLD);
            }
            line = line.push(fragment);
        }
        lines = lines.push(line);
    }

    lines.into()
}
