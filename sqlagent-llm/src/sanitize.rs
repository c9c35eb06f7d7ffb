//! Model response cleanup.

const FENCE: &str = "```";

/// Strip a surrounding markdown code fence from a model response.
///
/// The fence is only removed when the trimmed text both starts and ends with
/// three backticks; the first and last lines are then dropped, whatever they
/// contain. Anything else comes back trimmed but otherwise untouched.
pub fn clean_sql(raw: &str) -> String {
    let text = raw.trim();
    if text.starts_with(FENCE) && text.ends_with(FENCE) {
        let lines: Vec<&str> = text.split('\n').collect();
        let interior = if lines.len() > 2 {
            lines[1..lines.len() - 1].join("\n")
        } else {
            String::new()
        };
        return interior.trim().to_string();
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_sql_passes_through() {
        assert_eq!(
            clean_sql("  SELECT COUNT(*) FROM orders;\n"),
            "SELECT COUNT(*) FROM orders;"
        );
    }

    #[test]
    fn test_tagged_fence_removed() {
        let raw = "```sql\nSELECT *\nFROM orders\n```";
        assert_eq!(clean_sql(raw), "SELECT *\nFROM orders");
    }

    #[test]
    fn test_bare_fence_removed() {
        assert_eq!(clean_sql("\n```\nSELECT 1\n```\n\n"), "SELECT 1");
    }

    #[test]
    fn test_single_stray_fence_kept() {
        let raw = "```sql\nSELECT 1";
        assert_eq!(clean_sql(raw), raw);
        assert_eq!(clean_sql("SELECT 1\n```"), "SELECT 1\n```");
    }

    #[test]
    fn test_backtick_identifiers_kept() {
        let raw = "SELECT `order id` FROM `orders`";
        assert_eq!(clean_sql(raw), raw);
    }

    #[test]
    fn test_fence_only_yields_empty() {
        assert_eq!(clean_sql("```"), "");
        assert_eq!(clean_sql("``````"), "");
        assert_eq!(clean_sql("```sql\n```"), "");
    }

    #[test]
    fn test_same_line_fence_is_lenient() {
        // Starts and ends with a fence but has no interior lines.
        assert_eq!(clean_sql("```SELECT 1```"), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_sql(""), "");
        assert_eq!(clean_sql(" \n\t "), "");
    }

    proptest! {
        #[test]
        fn prop_unfenced_returns_trimmed(raw in "[^`]{0,80}") {
            prop_assert_eq!(clean_sql(&raw), raw.trim());
        }

        #[test]
        fn prop_never_longer_than_input(raw in ".{0,120}") {
            prop_assert!(clean_sql(&raw).len() <= raw.len());
        }
    }
}
