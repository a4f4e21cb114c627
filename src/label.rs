//! Structured node labels rendered to Graphviz HTML-like markup.
//!
//! Labels are built from typed lines (text plus emphasis/size/color) and only
//! translated to the backend's `<TABLE>`/`<FONT>` dialect at serialization
//! time, so the org data never carries markup.

/// One line of a label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLine {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub point_size: f32,
    pub color: Option<String>,
}

impl LabelLine {
    pub fn new(text: impl Into<String>, point_size: f32) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            point_size,
            color: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub lines: Vec<LabelLine>,
    pub cell_padding: u8,
}

impl Label {
    pub fn new(lines: Vec<LabelLine>) -> Self {
        Self {
            lines,
            cell_padding: 2,
        }
    }

    pub fn cell_padding(mut self, padding: u8) -> Self {
        self.cell_padding = padding;
        self
    }

    /// Markup for the backend's `label=<...>` attribute.
    ///
    /// Multi-line labels become a borderless single-column table, one row per
    /// line. A single line is emitted as bare `<FONT>` markup, which is what
    /// legend entries use.
    pub fn to_html(&self) -> String {
        if self.lines.len() == 1 {
            return line_html(&self.lines[0]);
        }
        let mut html = format!(
            "<TABLE BORDER=\"0\" CELLPADDING=\"{}\" CELLSPACING=\"0\">",
            self.cell_padding
        );
        for line in &self.lines {
            html.push_str("<TR><TD>");
            html.push_str(&line_html(line));
            html.push_str("</TD></TR>");
        }
        html.push_str("</TABLE>");
        html
    }
}

fn line_html(line: &LabelLine) -> String {
    let mut inner = format!(
        "<FONT POINT-SIZE=\"{}\"{}>{}</FONT>",
        format_point_size(line.point_size),
        match &line.color {
            Some(color) => format!(" COLOR=\"{color}\""),
            None => String::new(),
        },
        escape_html(&line.text)
    );
    if line.italic {
        inner = format!("<I>{inner}</I>");
    }
    if line.bold {
        inner = format!("<B>{inner}</B>");
    }
    inner
}

fn format_point_size(size: f32) -> String {
    if size.fract() == 0.0 {
        format!("{}", size as i64)
    } else {
        format!("{size}")
    }
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_is_bare_font_markup() {
        let label = Label::new(vec![LabelLine::new("Legend entry", 8.0)]);
        assert_eq!(
            label.to_html(),
            "<FONT POINT-SIZE=\"8\">Legend entry</FONT>"
        );
    }

    #[test]
    fn multi_line_becomes_table_rows() {
        let label = Label::new(vec![
            LabelLine::new("Interim Dean", 14.0).bold(),
            LabelLine::new("Amy Jiang", 12.0),
        ])
        .cell_padding(4);
        let html = label.to_html();
        assert!(html.starts_with("<TABLE BORDER=\"0\" CELLPADDING=\"4\""));
        assert!(html.contains("<TR><TD><B><FONT POINT-SIZE=\"14\">Interim Dean</FONT></B></TD></TR>"));
        assert!(html.contains("<TR><TD><FONT POINT-SIZE=\"12\">Amy Jiang</FONT></TD></TR>"));
        assert!(html.ends_with("</TABLE>"));
    }

    #[test]
    fn text_is_escaped() {
        let label = Label::new(vec![LabelLine::new("Head of Collections & Scholarship", 9.0)]);
        assert!(label.to_html().contains("Collections &amp; Scholarship"));
    }

    #[test]
    fn italic_wraps_inside_bold() {
        let line = LabelLine::new("(Vacant)", 9.0).bold().italic();
        assert_eq!(
            line_html(&line),
            "<B><I><FONT POINT-SIZE=\"9\">(Vacant)</FONT></I></B>"
        );
    }

    #[test]
    fn colored_line_carries_color_attribute() {
        let line = LabelLine::new("note", 8.0).color("#8B6B5E");
        assert!(line_html(&line).contains("COLOR=\"#8B6B5E\""));
    }
}
