//! Shareable addresses: the page URL carrying a `board` query parameter.

use crate::BoardId;
use url::Url;

/// Query parameter that carries the board id.
pub const BOARD_QUERY_PARAM: &str = "board";

/// Reads the board id from an address, if present and well formed.
pub fn board_id_from_url(url: &Url) -> Option<BoardId> {
    url.query_pairs()
        .find(|(name, _)| name == BOARD_QUERY_PARAM)
        .and_then(|(_, value)| BoardId::parse(&value))
}

/// Returns the address with the board parameter set to `id`.
///
/// Other query parameters are kept.
pub fn with_board_id(url: &Url, id: &BoardId) -> Url {
    let mut url = without_board_id(url);
    url.query_pairs_mut()
        .append_pair(BOARD_QUERY_PARAM, id.as_str());
    url
}

/// Returns the address with any board parameter removed.
pub fn without_board_id(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != BOARD_QUERY_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    let mut url = url.clone();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_reads_board_param() {
        let url = page("https://bingo.example/?board=abc123");
        assert_eq!(board_id_from_url(&url).unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_missing_param_is_none() {
        assert_eq!(board_id_from_url(&page("https://bingo.example/")), None);
        assert_eq!(board_id_from_url(&page("https://bingo.example/?board=")), None);
    }

    #[test]
    fn test_set_replaces_existing_param() {
        let url = page("https://bingo.example/?board=old&theme=dark");
        let id = BoardId::parse("new").unwrap();
        let shared = with_board_id(&url, &id);
        assert_eq!(shared.as_str(), "https://bingo.example/?theme=dark&board=new");
    }

    #[test]
    fn test_strip_removes_question_mark() {
        let url = page("https://bingo.example/play?board=abc");
        assert_eq!(without_board_id(&url).as_str(), "https://bingo.example/play");
    }

    #[test]
    fn test_strip_keeps_other_params() {
        let url = page("https://bingo.example/?a=1&board=abc&b=2");
        assert_eq!(without_board_id(&url).as_str(), "https://bingo.example/?a=1&b=2");
    }
}
