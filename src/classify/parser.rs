use super::prompt::{LABEL_SEPARATOR, RELATED_LABEL, UNRELATED_LABEL};

/// Keyword sets reported by the model for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordClassification {
    pub related: Vec<String>,
    pub unrelated: Vec<String>,
}

/// Parses both labelled lines of a reply.
///
/// Every line is scanned and the last line carrying a label wins. A label line
/// without the full-width colon is skipped. Keywords are taken verbatim; they
/// are not checked against the batch that was sent.
pub fn parse_classification(text: &str) -> KeywordClassification {
    let mut classification = KeywordClassification::default();
    for line in text.lines() {
        let target = if line.starts_with(UNRELATED_LABEL) {
            &mut classification.unrelated
        } else if line.starts_with(RELATED_LABEL) {
            &mut classification.related
        } else {
            continue;
        };
        if let Some((_, list)) = line.split_once(LABEL_SEPARATOR) {
            *target = split_keyword_list(list);
        }
    }
    classification
}

/// The related keywords of a reply, or an empty list if the reply does not
/// follow the two-line format.
pub fn parse_related_keywords(text: &str) -> Vec<String> {
    parse_classification(text).related
}

fn split_keyword_list(list: &str) -> Vec<String> {
    list.split([',', '，'])
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}
