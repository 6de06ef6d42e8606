use crate::error::{RestError, Result};
use crate::options::Options;
use serde::{Deserialize, Serialize};

/// Page size used by the "all" helpers when the caller does not pick one
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Cursor to the next page of a listing.
///
/// A listing call returns `Some(NextPage)` while more results exist and
/// `None` once the listing is exhausted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPage {
    /// Opaque token to pass back as the `offset` option
    pub offset: String,

    /// Path of the listing this cursor belongs to
    #[serde(default)]
    pub path: String,

    /// Full URI of the next page
    #[serde(default)]
    pub uri: String,
}

impl NextPage {
    /// Options selecting the page this cursor points to
    pub fn options(&self) -> Options {
        Options::new().with_offset(self.offset.clone())
    }
}

/// Fetch every page of a listing.
///
/// `fetch` is called with `None` for the first page and then with the cursor
/// returned by the previous call, until no cursor comes back. Items are
/// concatenated in page order. If any page fails, the items gathered so far
/// are dropped and the error is returned.
///
/// A cursor with an empty offset would select the first page again, so it
/// fails the whole walk with [`RestError::EmptyCursor`].
pub fn fetch_all<T, F>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<&NextPage>) -> Result<(Vec<T>, Option<NextPage>)>,
{
    let mut all = Vec::new();
    let mut cursor: Option<NextPage> = None;

    loop {
        let (items, next) = fetch(cursor.as_ref())?;
        all.extend(items);

        match next {
            Some(next) if next.offset.is_empty() => return Err(RestError::EmptyCursor),
            Some(next) => cursor = Some(next),
            None => return Ok(all),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use reqwest::Method;

    fn cursor(offset: &str) -> NextPage {
        NextPage {
            offset: offset.to_string(),
            path: "/projects".to_string(),
            uri: format!("https://app.asana.com/api/1.0/projects?offset={}", offset),
        }
    }

    #[test]
    fn test_fetch_all_walks_three_pages() {
        let mut seen = Vec::new();
        let all = fetch_all(|page| {
            seen.push(page.map(|p| p.offset.clone()));
            match page.map(|p| p.offset.as_str()) {
                None => Ok((vec![1, 2], Some(cursor("a")))),
                Some("a") => Ok((vec![3], Some(cursor("b")))),
                Some("b") => Ok((vec![4, 5], None)),
                Some(other) => panic!("unexpected offset {}", other),
            }
        })
        .unwrap();

        assert_eq!(all, vec![1, 2, 3, 4, 5]);
        assert_eq!(seen, vec![None, Some("a".to_string()), Some("b".to_string())]);
    }

    #[test]
    fn test_fetch_all_discards_partial_results() {
        let mut calls = 0;
        let result: Result<Vec<u32>> = fetch_all(|page| {
            calls += 1;
            match page {
                None => Ok((vec![1, 2], Some(cursor("a")))),
                Some(_) => Err(ApiError::new(Method::GET, "/projects", 500, vec![], None).into()),
            }
        });

        assert_eq!(calls, 2);
        assert!(matches!(result, Err(RestError::Api(_))));
    }

    #[test]
    fn test_cursor_options() {
        let options = cursor("xyz").options();
        assert_eq!(options.offset.as_deref(), Some("xyz"));
        assert_eq!(options.limit, None);
    }

    #[test]
    fn test_cursor_deserialization() {
        let json = r#"{"offset": "eyJ0", "path": "/tasks?limit=2&offset=eyJ0", "uri": "https://app.asana.com/api/1.0/tasks?limit=2&offset=eyJ0"}"#;
        let page: NextPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.offset, "eyJ0");
        assert_eq!(page.path, "/tasks?limit=2&offset=eyJ0");
    }

    #[test]
    fn test_fetch_all_rejects_empty_offset() {
        let mut calls = 0;
        let result: Result<Vec<u32>> = fetch_all(|_| {
            calls += 1;
            Ok((vec![1], Some(cursor(""))))
        });

        assert_eq!(calls, 1);
        assert!(matches!(result, Err(RestError::EmptyCursor)));
    }

    #[test]
    fn test_cursor_requires_offset() {
        assert!(serde_json::from_str::<NextPage>("{}").is_err());
        let page: NextPage = serde_json::from_str(r#"{"offset": "eyJ0"}"#).unwrap();
        assert_eq!(page.offset, "eyJ0");
        assert!(page.path.is_empty());
    }
}
