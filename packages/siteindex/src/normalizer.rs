//! Turns raw page text into a titled document via the AI service.
//!
//! Normalization never fails: if the organize call errors, the raw
//! text is indexed verbatim and the URL stands in for the title. Bad
//! organization must never cost a page its place in the index.

use tracing::warn;

use crate::traits::Ai;

/// Organized text ready for embedding and storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDocument {
    /// First non-empty line of the organized text, or the page URL on fallback.
    pub title: String,

    /// Organized text, or the raw text verbatim on fallback.
    pub content: String,
}

/// Organize raw page text, falling back to the raw text on any AI failure.
pub async fn organize_document<A: Ai + ?Sized>(
    ai: &A,
    raw_text: &str,
    url: &str,
) -> NormalizedDocument {
    match ai.organize(raw_text, url).await {
        Ok(organized) => {
            let title = organized
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or(url)
                .to_string();

            NormalizedDocument {
                title,
                content: organized,
            }
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Organize failed, indexing raw text");
            NormalizedDocument {
                title: url.to_string(),
                content: raw_text.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAi;

    #[tokio::test]
    async fn title_is_first_nonempty_line() {
        let ai = MockAi::new().with_organized(
            "https://a.test/",
            "\n  Visitor Guide  \nOpening hours and prices.",
        );

        let doc = organize_document(&ai, "raw text here", "https://a.test/").await;

        assert_eq!(doc.title, "Visitor Guide");
        assert!(doc.content.contains("Opening hours"));
    }

    #[tokio::test]
    async fn falls_back_to_raw_text_on_failure() {
        let ai = MockAi::new().with_organize_failure();
        let raw = "the exact raw text, untouched";

        let doc = organize_document(&ai, raw, "https://a.test/page").await;

        assert_eq!(doc.content, raw);
        assert_eq!(doc.title, "https://a.test/page");
    }

    #[tokio::test]
    async fn blank_organized_text_titles_as_url() {
        let ai = MockAi::new().with_organized("https://a.test/", "   \n  \n");

        let doc = organize_document(&ai, "raw", "https://a.test/").await;

        assert_eq!(doc.title, "https://a.test/");
    }
}
