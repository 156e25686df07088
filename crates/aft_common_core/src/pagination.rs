use serde::{Deserialize, Serialize};

use crate::error::AftResult;

/// One page of a listing plus the token for the next page, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    pub fn with_token(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }
}

/// Drains a token-paginated listing, starting with no token and resending
/// each returned token until a page arrives without one.
///
/// Items keep provider order and are never deduplicated. A blank token ends
/// the listing.
pub fn collect_pages<T, F>(mut fetch: F) -> AftResult<Vec<T>>
where
    F: FnMut(Option<&str>) -> AftResult<Page<T>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let page = fetch(token.as_deref())?;
        items.extend(page.items);
        match page.next_token {
            Some(next) if !next.trim().is_empty() => {
                tracing::debug!(next_token = %next, "paginated response found, continuing");
                token = Some(next);
            }
            _ => return Ok(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AftError;

    use super::*;

    #[test]
    fn resends_tokens_until_final_page() {
        let mut seen_tokens = Vec::new();
        let items = collect_pages(|token| {
            seen_tokens.push(token.map(str::to_string));
            Ok(match token {
                None => Page::with_token(vec![1, 2], "t1"),
                Some("t1") => Page::with_token(vec![3], "t2"),
                _ => Page::last(vec![4]),
            })
        })
        .expect("pages should drain");

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(
            seen_tokens,
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
    }

    #[test]
    fn blank_token_ends_listing() {
        let mut calls = 0;
        let items = collect_pages(|_| {
            calls += 1;
            Ok(Page::with_token(vec!["a"], " "))
        })
        .expect("pages should drain");

        assert_eq!(items, vec!["a"]);
        assert_eq!(calls, 1);
    }

    #[test]
    fn failure_on_later_page_aborts_listing() {
        let error = collect_pages(|token| match token {
            None => Ok(Page::with_token(vec![1], "next")),
            Some(_) => Err(AftError::remote("directory", "ListChildren", "throttled")),
        })
        .expect_err("second page should fail");

        assert_eq!(error.operation(), Some("ListChildren"));
    }
}
