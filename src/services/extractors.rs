// src/services/extractors.rs

//! Turning source pages into joke texts.
//!
//! Two page shapes are supported:
//! - [`SeparatorExtractor`]: the page text is one long stream of jokes
//!   separated by a marker such as `* * *`.
//! - [`BreakExtractor`]: jokes are runs of paragraphs, with an element
//!   (usually an illustration) between consecutive jokes.
//!
//! Both run every candidate through the same [`ContentFilter`].

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{ExtractorConfig, FilterConfig};

/// Elements whose text is never part of a joke.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Turns raw page content into candidate jokes, in page order.
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> Vec<String>;
}

/// Length and blacklist check shared by all extractors.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    min_length: usize,
    blacklist: Vec<String>,
}

impl ContentFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            min_length: config.min_length,
            blacklist: config.blacklist.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Keep an entry iff it is longer than the minimum and mentions no
    /// blacklisted term.
    pub fn accepts(&self, entry: &str) -> bool {
        if entry.chars().count() <= self.min_length {
            return false;
        }
        let lowered = entry.to_lowercase();
        !self.blacklist.iter().any(|term| lowered.contains(term.as_str()))
    }
}

/// Splits the document text on a separator pattern.
pub struct SeparatorExtractor {
    separator: Regex,
    filter: ContentFilter,
}

impl SeparatorExtractor {
    pub fn new(pattern: &str, filter: ContentFilter) -> Result<Self> {
        Ok(Self {
            separator: Regex::new(pattern)?,
            filter,
        })
    }
}

impl Extractor for SeparatorExtractor {
    fn extract(&self, html: &str) -> Vec<String> {
        let text = document_text(&Html::parse_document(html));
        self.separator
            .split(&text)
            .map(str::trim)
            .filter(|entry| self.filter.accepts(entry))
            .map(String::from)
            .collect()
    }
}

/// Groups entry elements between break elements.
pub struct BreakExtractor {
    candidates: Selector,
    breaks: Selector,
    filter: ContentFilter,
}

impl BreakExtractor {
    pub fn new(entry_selector: &str, break_selector: &str, filter: ContentFilter) -> Result<Self> {
        let combined = format!("{entry_selector}, {break_selector}");
        Ok(Self {
            candidates: parse_selector(&combined)?,
            breaks: parse_selector(break_selector)?,
            filter,
        })
    }

    fn flush(&self, current: &mut Vec<String>, out: &mut Vec<String>) {
        if current.is_empty() {
            return;
        }
        let entry = current.join("\n");
        current.clear();
        if self.filter.accepts(&entry) {
            out.push(entry);
        }
    }
}

impl Extractor for BreakExtractor {
    fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut entries = Vec::new();
        let mut current = Vec::new();

        for element in document.select(&self.candidates) {
            if self.breaks.matches(&element) {
                self.flush(&mut current, &mut entries);
                continue;
            }
            let text = element_text(element);
            if !text.is_empty() {
                current.push(text);
            }
        }
        self.flush(&mut current, &mut entries);

        entries
    }
}

/// Compile the extractor a source is configured with.
pub fn build_extractor(
    config: &ExtractorConfig,
    filter: ContentFilter,
) -> Result<Box<dyn Extractor>> {
    Ok(match config {
        ExtractorConfig::Separator { pattern } => {
            Box::new(SeparatorExtractor::new(pattern, filter)?)
        }
        ExtractorConfig::Breaks {
            entry_selector,
            break_selector,
        } => Box::new(BreakExtractor::new(entry_selector, break_selector, filter)?),
    })
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Concatenated text of the document, minus script and style contents.
fn document_text(document: &Html) -> String {
    let mut text = String::new();
    for node in document.root_element().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };
        let skipped = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .is_some_and(|name| SKIPPED_ELEMENTS.contains(&name));
        if !skipped {
            text.push_str(chunk);
        }
    }
    text
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> ContentFilter {
        ContentFilter::new(&FilterConfig::default())
    }

    #[test]
    fn test_filter_length_boundary() {
        let f = filter();
        assert!(!f.accepts(&"а".repeat(20)));
        assert!(f.accepts(&"а".repeat(21)));
    }

    #[test]
    fn test_filter_blacklist_is_case_insensitive() {
        let f = filter();
        assert!(!f.accepts("Перейти в МЕНЮ сайта прямо сейчас"));
        assert!(!f.accepts("Автор: Иван Иванович Иванов, 1999"));
        assert!(f.accepts("Приходит мужик в магазин и спрашивает хлеба."));
    }

    #[test]
    fn test_separator_extractor() {
        let html = r#"
            <html><head><script>var x = "* * * script text that is long";</script></head>
            <body>
            <p>Первый анекдот про Вовочку и учительницу.</p>
            * * *
            <p>Короткий</p>
            *  *  *
            <p>Второй анекдот про тёщу, которая приехала в гости.</p>
            ***
            <p>Читать дальше полную версию книги на сайте</p>
            </body></html>
        "#;
        let extractor = SeparatorExtractor::new(r"\*\s*\*\s*\*", filter()).unwrap();
        let jokes = extractor.extract(html);

        assert_eq!(
            jokes,
            vec![
                "Первый анекдот про Вовочку и учительницу.".to_string(),
                "Второй анекдот про тёщу, которая приехала в гости.".to_string(),
            ]
        );
    }

    #[test]
    fn test_break_extractor_groups_paragraphs() {
        let html = r#"
            <div>
              <p>Сидят два ковбоя у костра.</p>
              <p>Один говорит другому: «Тишина-то какая».</p>
              <img src="1.png">
              <p>   </p>
              <p>Урок физики. Учитель спрашивает про инерцию.</p>
              <img src="2.png">
              <img src="3.png">
              <p>Каталог книг</p>
              <img src="4.png">
              <p>Последний анекдот без картинки после него.</p>
            </div>
        "#;
        let extractor = BreakExtractor::new("p", "img", filter()).unwrap();
        let jokes = extractor.extract(html);

        assert_eq!(
            jokes,
            vec![
                "Сидят два ковбоя у костра.\nОдин говорит другому: «Тишина-то какая».".to_string(),
                "Урок физики. Учитель спрашивает про инерцию.".to_string(),
                "Последний анекдот без картинки после него.".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let separator = SeparatorExtractor::new(r"\*\s*\*\s*\*", filter()).unwrap();
        let breaks = BreakExtractor::new("p", "img", filter()).unwrap();
        assert!(separator.extract("").is_empty());
        assert!(breaks.extract("<html></html>").is_empty());
    }

    #[test]
    fn test_build_extractor_rejects_bad_selector() {
        let config = ExtractorConfig::Breaks {
            entry_selector: "[[invalid".into(),
            break_selector: "img".into(),
        };
        assert!(matches!(
            build_extractor(&config, filter()),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn test_build_extractor_rejects_bad_pattern() {
        let config = ExtractorConfig::Separator {
            pattern: "(unclosed".into(),
        };
        assert!(matches!(
            build_extractor(&config, filter()),
            Err(AppError::Regex(_))
        ));
    }
}
