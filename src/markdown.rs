// src/markdown.rs

use pulldown_cmark::{Event, Parser, TagEnd};

/// Renders Markdown and strips the markup, keeping only the visible text.
/// Mirrors what the clipboard and export paths need: `**bold**` becomes
/// `bold`, fenced code keeps its contents, block boundaries become newlines.
pub fn markdown_to_plain(text: &str) -> String {
    let mut out = String::new();

    for event in Parser::new(text) {
        match event {
            Event::Text(t) => out.push_str(&t),
            Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::CodeBlock) => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Event::Rule => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_emphasis_markup() {
        assert_eq!(markdown_to_plain("**bold** and _italic_"), "bold and italic");
    }

    #[test]
    fn test_keeps_inline_code_text() {
        assert_eq!(markdown_to_plain("run `cargo build` now"), "run cargo build now");
    }

    #[test]
    fn test_strips_heading_markers() {
        assert_eq!(markdown_to_plain("# Title\n\nbody"), "Title\nbody");
    }

    #[test]
    fn test_keeps_fenced_code_contents() {
        let input = "```\nlet x = 1;\n```";
        assert_eq!(markdown_to_plain(input), "let x = 1;");
    }

    #[test]
    fn test_list_items_become_lines() {
        assert_eq!(markdown_to_plain("- first\n- second"), "first\nsecond");
    }

    #[test]
    fn test_plain_text_is_a_fixed_point() {
        let plain = "just a sentence";
        let once = markdown_to_plain(plain);
        let twice = markdown_to_plain(&once);
        assert_eq!(once, plain);
        assert_eq!(twice, once);
    }
}
