//! Markdown image reference extractor.
//!
//! Line-oriented: each line is matched against the inline image pattern, and
//! every match becomes an [`ImageReference`]. Fenced code blocks can be skipped
//! with [`ScanConfig::skip_code_blocks`].

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::ScanConfig;
use crate::report::{ImageReference, MissingAltFinding};

/// Markdown parsing state for code block tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkdownState {
    Prose,
    FencedBlock {
        fence_char: char,
        opening_fence_len: usize,
    },
}

fn parse_fence(trimmed_line: &str) -> Option<(char, usize)> {
    let fence_char = match trimmed_line.as_bytes().first() {
        Some(b'`') => '`',
        Some(b'~') => '~',
        _ => return None,
    };

    let fence_len = trimmed_line
        .chars()
        .take_while(|&c| c == fence_char)
        .count();
    if fence_len >= 3 {
        Some((fence_char, fence_len))
    } else {
        None
    }
}

/// Inline image syntax: `![alt](target)`. The alt text cannot cross a `]`,
/// and the target may hold one level of balanced parentheses (`a_(1).png`).
static IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"!\[([^\]]*)\]\(((?:[^()]|\([^()]*\))*)\)") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid image regex: {err}"),
    }
});

/// An HTML `<img ...>` tag. HTML images are not checked.
static HTML_IMG_TAG: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"(?i)<img\b[^>]*>") {
    Ok(regex) => regex,
    Err(err) => panic!("Invalid img tag regex: {err}"),
});

/// Blank out `<img>` tags with spaces so markdown beside them still matches
/// at its original byte offsets.
fn mask_html_images(line: &str) -> Cow<'_, str> {
    HTML_IMG_TAG.replace_all(line, |caps: &Captures<'_>| " ".repeat(caps[0].len()))
}

/// Extract every inline image reference from markdown content, in line order.
#[must_use]
pub fn extract_image_references(
    content: &str,
    path: &Path,
    config: &ScanConfig,
) -> Vec<ImageReference> {
    let mut references = Vec::new();
    let mut state = MarkdownState::Prose;

    for (line_num, line) in content.lines().enumerate() {
        let line_number = line_num + 1; // 1-indexed

        // ``` and ~~~ fences per CommonMark
        if config.skip_code_blocks {
            if let Some((fence_char, fence_len)) = parse_fence(line.trim_start()) {
                match state {
                    MarkdownState::Prose => {
                        state = MarkdownState::FencedBlock {
                            fence_char,
                            opening_fence_len: fence_len,
                        };
                        continue;
                    }
                    MarkdownState::FencedBlock {
                        fence_char: open_fence_char,
                        opening_fence_len,
                    } => {
                        // Closing fence: same char, at least as long as the opener
                        if fence_char == open_fence_char && fence_len >= opening_fence_len {
                            state = MarkdownState::Prose;
                            continue;
                        }
                    }
                }
            }

            if let MarkdownState::FencedBlock { .. } = state {
                continue;
            }
        }

        let line = mask_html_images(line);
        for caps in IMAGE_PATTERN.captures_iter(&line) {
            let (Some(whole), Some(alt), Some(target)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            references.push(ImageReference {
                file: path.to_owned(),
                line: line_number,
                column: whole.start() + 1, // 1-indexed
                raw: whole.as_str().to_owned(),
                alt: alt.as_str().to_owned(),
                target: target.as_str().to_owned(),
            });
        }
    }

    references
}

/// Scan markdown content and keep only the references missing alt text.
///
/// Findings come back in ascending line order, left to right within a line.
#[must_use]
pub fn scan_markdown_content(
    content: &str,
    path: &Path,
    config: &ScanConfig,
) -> Vec<MissingAltFinding> {
    let mut findings: Vec<MissingAltFinding> = extract_image_references(content, path, config)
        .into_iter()
        .filter(ImageReference::is_missing_alt)
        .filter(|r| !(config.skip_remote && r.is_remote()))
        .map(MissingAltFinding)
        .collect();
    findings.sort_by_key(|f| (f.0.line, f.0.column));
    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str) -> Vec<MissingAltFinding> {
        scan_markdown_content(content, Path::new("test.md"), &ScanConfig::default())
    }

    fn scan_skipping_code(content: &str) -> Vec<MissingAltFinding> {
        let mut config = ScanConfig::default();
        config.skip_code_blocks = true;
        scan_markdown_content(content, Path::new("test.md"), &config)
    }

    #[test]
    fn test_empty_alt_is_reported() {
        let findings = scan("![](img.png)");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line(), 1);
        assert_eq!(findings[0].raw(), "![](img.png)");
    }

    #[test]
    fn test_present_alt_is_not_reported() {
        assert!(scan("![A mountain](img.png)").is_empty());
    }

    #[test]
    fn test_whitespace_alt_is_reported() {
        let findings = scan("Intro ![   ](img.png) outro");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].raw(), "![   ](img.png)");
        assert_eq!(findings[0].0.column, 7);
    }

    #[test]
    fn test_two_images_one_line_one_missing() {
        let findings = scan("text\n![ok](a.png) and ![](b.png)\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line(), 2);
        assert_eq!(findings[0].raw(), "![](b.png)");
    }

    #[test]
    fn test_two_missing_on_one_line_reported_separately() {
        let findings = scan("![](a.png)![](b.png)");
        let raws: Vec<&str> = findings.iter().map(MissingAltFinding::raw).collect();
        assert_eq!(raws, vec!["![](a.png)", "![](b.png)"]);
        assert!(findings.iter().all(|f| f.line() == 1));
    }

    #[test]
    fn test_line_numbers_are_physical_lines() {
        let findings = scan("# Title\n\n![](x.jpg)\n\n![cat](y.jpg)\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line(), 3);
        assert_eq!(findings[0].raw(), "![](x.jpg)");
    }

    #[test]
    fn test_crlf_line_endings() {
        let findings = scan("# Title\r\n![](x.jpg)\r\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line(), 2);
        assert_eq!(findings[0].raw(), "![](x.jpg)");
    }

    #[test]
    fn test_title_is_part_of_target() {
        let refs = extract_image_references(
            r#"![](img.png "A title")"#,
            Path::new("test.md"),
            &ScanConfig::default(),
        );
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].target, r#"img.png "A title""#);
        assert!(refs[0].is_missing_alt());
    }

    #[test]
    fn test_html_img_tag_not_checked() {
        assert!(scan(r#"<img src="a.png">"#).is_empty());
        assert!(scan(r#"<IMG SRC="a.png" alt="![](nested.png)">"#).is_empty());
    }

    #[test]
    fn test_markdown_beside_html_img_is_reported() {
        let findings = scan(r#"<img src="a.png" alt="a"> ![](b.png)"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].raw(), "![](b.png)");
        assert_eq!(findings[0].0.column, 27);
    }

    #[test]
    fn test_alt_does_not_cross_closing_bracket() {
        let findings = scan("![logo][ref] and ![](x.png)\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line(), 1);
        assert_eq!(findings[0].raw(), "![](x.png)");

        let findings = scan("See [docs] then ![](y.png)");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].raw(), "![](y.png)");
    }

    #[test]
    fn test_target_with_parentheses() {
        let findings = scan("![](a_(1).png) and ![](b.png)");
        let raws: Vec<&str> = findings.iter().map(MissingAltFinding::raw).collect();
        assert_eq!(raws, vec!["![](a_(1).png)", "![](b.png)"]);
        assert_eq!(findings[0].0.target, "a_(1).png");
    }

    #[test]
    fn test_reference_style_not_matched() {
        assert!(scan("![][logo]\n\n[logo]: logo.png").is_empty());
    }

    #[test]
    fn test_plain_link_not_matched() {
        assert!(scan("[](https://example.com)").is_empty());
    }

    #[test]
    fn test_fenced_block_scanned_by_default() {
        let findings = scan("```\n![](x.png)\n```\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line(), 2);
    }

    #[test]
    fn test_fenced_block_skipped_when_configured() {
        let content = "```markdown\n![](inside.png)\n```\n![](outside.png)\n";
        let findings = scan_skipping_code(content);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line(), 4);
    }

    #[test]
    fn test_tilde_fence_skipped() {
        assert!(scan_skipping_code("~~~\n![](inside.png)\n~~~\n").is_empty());
    }

    #[test]
    fn test_mismatched_fence_does_not_close_block() {
        // A ~~~ line must not close a ``` block.
        let content = "```\n~~~\n![](inside.png)\n```\n";
        assert!(scan_skipping_code(content).is_empty());
    }

    #[test]
    fn test_skip_remote_option() {
        let content = "![](https://example.com/a.png)\n![](local.png)\n";
        assert_eq!(scan(content).len(), 2);

        let mut config = ScanConfig::default();
        config.skip_remote = true;
        let findings = scan_markdown_content(content, Path::new("test.md"), &config);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].raw(), "![](local.png)");
    }

    #[test]
    fn test_no_images() {
        assert!(scan("# Heading\n\nJust prose.\n").is_empty());
        assert!(scan("").is_empty());
    }
}
