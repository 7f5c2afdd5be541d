use hexmagic_core::{Layout, LayoutSpec};

use crate::utils::{get_query_param, log, parse_flag};

/// Settings read from the page URL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Colour numerals of tiles on lines that already hit the target.
    pub hints: bool,
    /// Fixed shuffle seed; random when absent.
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_search(search: &str) -> Self {
        let hints = get_query_param(search, "hint")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let seed = get_query_param(search, "seed").and_then(|v| v.trim().parse::<u64>().ok());
        Config { hints, seed }
    }
}

/// Board shipped with the page; the built-in board if it fails to parse.
pub fn bundled_layout() -> Layout {
    parse_layout(include_str!("../../board.json")).unwrap_or_else(|e| {
        log(&format!("board.json rejected ({}), using the standard board", e));
        Layout::standard()
    })
}

fn parse_layout(text: &str) -> Result<Layout, String> {
    let spec: LayoutSpec = serde_json::from_str(text).map_err(|e| e.to_string())?;
    Layout::try_from(spec).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_default_off() {
        assert_eq!(Config::from_search(""), Config::default());
        assert!(!Config::from_search("?hint=0").hints);
        assert!(Config::from_search("?hint").hints);
        assert!(Config::from_search("?x=2&hint=true").hints);
    }

    #[test]
    fn seed_is_optional() {
        assert_eq!(Config::from_search("?seed=17").seed, Some(17));
        assert_eq!(Config::from_search("?seed=abc").seed, None);
    }

    #[test]
    fn bundled_board_is_the_standard_one() {
        let layout = parse_layout(include_str!("../../board.json")).unwrap();
        assert_eq!(layout.cell_count(), 19);
        assert_eq!(layout.target(), 38);
        assert_eq!(layout.row_starts(), &[0, 3, 7, 12, 16]);
    }

    #[test]
    fn bad_board_is_reported() {
        assert!(parse_layout("{").is_err());
        assert!(parse_layout(r#"{"rows": []}"#).is_err());
    }
}
