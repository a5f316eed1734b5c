//! Slide text composition.
//!
//! Builds the paragraphs that go into the title, the body and the trailing
//! "Next Action" box. Where they end up is decided by the caller.

use crate::ooxml::pptx::writer::Paragraph;

pub const TITLE_FONT_PT: f64 = 32.0;
pub const BODY_FONT_PT: f64 = 14.0;

/// Title used when none was given.
pub const PENDING_TITLE: &str = "(title pending)";

/// Text of one paper slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideContent {
    pub title: String,
    pub link: String,
    pub reason: String,
    pub usage: String,
    pub rel_label: String,
    pub app_label: String,
}

impl Default for SlideContent {
    fn default() -> Self {
        Self {
            title: String::new(),
            link: String::new(),
            reason: String::new(),
            usage: String::new(),
            rel_label: "Relevance".to_string(),
            app_label: "Application".to_string(),
        }
    }
}

impl SlideContent {
    pub fn title_text(&self) -> &str {
        if self.title.is_empty() {
            PENDING_TITLE
        } else {
            &self.title
        }
    }

    /// One paragraph per line of the title; only the first is sized.
    pub fn title_paragraphs(&self) -> Vec<Paragraph> {
        self.title_text()
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                let paragraph = Paragraph::new(line);
                if i == 0 {
                    paragraph.with_font_size(TITLE_FONT_PT)
                } else {
                    paragraph
                }
            })
            .collect()
    }

    /// Body text, one string per paragraph.
    ///
    /// The link line always comes first; labelled lines only appear when
    /// their value is non-empty.
    pub fn body_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);
        if self.link.is_empty() {
            lines.push("Link: (n/a)".to_string());
        } else {
            lines.push(format!("Link: {}", self.link));
        }

        for (label, value) in [
            (&self.rel_label, &self.reason),
            (&self.app_label, &self.usage),
        ] {
            if !value.is_empty() {
                lines.push(format!("{}: {}", label, value));
            }
        }
        lines
    }

    pub fn body_paragraphs(&self) -> Vec<Paragraph> {
        self.body_lines()
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let paragraph = Paragraph::new(line).with_font_size(BODY_FONT_PT);
                if i == 0 {
                    paragraph
                } else {
                    paragraph.with_level(1)
                }
            })
            .collect()
    }
}

/// Paragraphs of the "Next Action" box: a heading and one empty bullet.
pub fn next_action_paragraphs() -> Vec<Paragraph> {
    vec![
        Paragraph::new("Next Action:"),
        Paragraph::new("• ").with_level(1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(link: &str, reason: &str, usage: &str) -> SlideContent {
        SlideContent {
            title: "Paper".to_string(),
            link: link.to_string(),
            reason: reason.to_string(),
            usage: usage.to_string(),
            ..SlideContent::default()
        }
    }

    #[test]
    fn test_empty_reason_is_omitted() {
        let lines = content("https://x", "", "Z").body_lines();
        assert_eq!(lines, vec!["Link: https://x", "Application: Z"]);
    }

    #[test]
    fn test_all_lines_with_custom_labels() {
        let mut c = content("", "fits", "use it");
        c.rel_label = "Why".to_string();
        c.app_label = "How".to_string();
        assert_eq!(c.body_lines(), vec!["Link: (n/a)", "Why: fits", "How: use it"]);
    }

    #[test]
    fn test_body_paragraph_levels_and_sizes() {
        let paragraphs = content("l", "r", "u").body_paragraphs();
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].level, 0);
        assert!(paragraphs[1..].iter().all(|p| p.level == 1));
        assert!(paragraphs.iter().all(|p| p.font_size == Some(BODY_FONT_PT)));
    }

    #[test]
    fn test_title_fallback() {
        let mut c = content("", "", "");
        assert_eq!(c.title_text(), "Paper");
        c.title.clear();
        assert_eq!(c.title_paragraphs(), vec![Paragraph::new(PENDING_TITLE).with_font_size(32.0)]);
    }

    #[test]
    fn test_multiline_title_splits_into_paragraphs() {
        let c = SlideContent {
            title: "Deep Learning\nA Survey".to_string(),
            ..SlideContent::default()
        };
        assert_eq!(
            c.title_paragraphs(),
            vec![
                Paragraph::new("Deep Learning").with_font_size(32.0),
                Paragraph::new("A Survey"),
            ]
        );
    }

    #[test]
    fn test_next_action() {
        let paragraphs = next_action_paragraphs();
        assert_eq!(paragraphs[0].text, "Next Action:");
        assert_eq!(paragraphs[1].text, "• ");
        assert_eq!(paragraphs[1].level, 1);
        assert_eq!(paragraphs[1].font_size, None);
    }
}
