//! Keep only the transactions of one card in a multi-card statement.

use crate::types::StatementTransaction;

/// Shortest identifier that may match by inclusion (a card's last four digits).
const MIN_INCLUSION_LEN: usize = 4;

/// Card-identifier predicate. An empty target keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    target: Option<String>,
}

impl CardFilter {
    pub fn new(target: &str) -> Self {
        let target = target.trim();
        Self {
            target: (!target.is_empty()).then(|| target.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Equal tags match, as does either one containing the other
    /// (`1234` against `****1234`) when the contained side has at least four
    /// characters. Untagged rows never match an active filter.
    pub fn matches(&self, card_tag: Option<&str>) -> bool {
        let Some(target) = &self.target else {
            return true;
        };
        match card_tag.map(str::trim) {
            Some(tag) if !tag.is_empty() => {
                tag == target || includes(tag, target) || includes(target, tag)
            }
            _ => false,
        }
    }

    pub fn apply(&self, txns: Vec<StatementTransaction>) -> Vec<StatementTransaction> {
        if !self.is_active() {
            return txns;
        }
        txns.into_iter()
            .filter(|t| self.matches(t.card_tag.as_deref()))
            .collect()
    }
}

fn includes(haystack: &str, needle: &str) -> bool {
    needle.chars().count() >= MIN_INCLUSION_LEN && haystack.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn tagged(desc: &str, tag: Option<&str>) -> StatementTransaction {
        StatementTransaction {
            date: None,
            description: desc.to_string(),
            amount: Decimal::ONE,
            card_tag: tag.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_empty_target_keeps_all() {
        let f = CardFilter::new("  ");
        assert!(!f.is_active());
        assert!(f.matches(None));
        let kept = f.apply(vec![tagged("a", None), tagged("b", Some("1234"))]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_equality_and_inclusion() {
        let f = CardFilter::new("1234");
        assert!(f.matches(Some("1234")));
        assert!(f.matches(Some("****-1234")));
        assert!(!f.matches(Some("5678")));
        assert!(!f.matches(None));
        assert!(!f.matches(Some("")));

        let masked = CardFilter::new("4563-XXXX-XXXX-1234");
        assert!(masked.matches(Some("1234")));
    }

    #[test]
    fn test_short_target_needs_exact_tag() {
        let f = CardFilter::new("1");
        assert!(f.matches(Some("1")));
        assert!(!f.matches(Some("1234")));
        assert!(!f.matches(Some("****-5671")));

        let tagged_short = CardFilter::new("4563-XXXX-XXXX-1234");
        assert!(!tagged_short.matches(Some("12")));
    }

    #[test]
    fn test_apply_preserves_order() {
        let f = CardFilter::new("1234");
        let kept = f.apply(vec![
            tagged("first", Some("1234")),
            tagged("other card", Some("5678")),
            tagged("untagged", None),
            tagged("second", Some("1234")),
        ]);
        let names: Vec<_> = kept.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
