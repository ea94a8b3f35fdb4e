//! Response envelope and pagination types for Rollbar API responses.

use serde::Deserialize;

/// The outer JSON structure wrapping every Rollbar response:
/// `{"err": 0, "result": ...}`.
///
/// The service-level `err` code is decoded but never inspected for failure
/// signaling; callers that care can read it off the envelope or the
/// resulting [`Page`].
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Service-level error code, `0` on success.
    #[serde(default)]
    pub err: i64,
    /// The resource payload.
    pub result: T,
}

/// One decoded page of results from a list endpoint.
///
/// An empty page is the sole pagination termination signal; there is no
/// total count or has-more flag in the Rollbar list protocol.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items on this page, in service order.
    pub items: Vec<T>,
    /// Service-level error code carried by the envelope.
    pub err: i64,
    /// Page number this page was fetched as (1-indexed).
    pub page: u32,
}

impl<T> Page<T> {
    /// Build a page from a decoded list envelope.
    #[must_use]
    pub fn from_envelope(envelope: Envelope<Vec<T>>, page: u32) -> Self {
        Self {
            items: envelope.result,
            err: envelope.err,
            page,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_list_payload() {
        let envelope: Envelope<Vec<u64>> =
            serde_json::from_str(r#"{"err": 0, "result": [1, 2, 3]}"#).unwrap();
        assert_eq!(envelope.err, 0);
        assert_eq!(envelope.result, vec![1, 2, 3]);
    }

    #[test]
    fn envelope_err_defaults_to_zero() {
        let envelope: Envelope<Vec<u64>> = serde_json::from_str(r#"{"result": []}"#).unwrap();
        assert_eq!(envelope.err, 0);
        assert!(envelope.result.is_empty());
    }

    #[test]
    fn envelope_carries_nonzero_err_without_failing() {
        let envelope: Envelope<Vec<u64>> =
            serde_json::from_str(r#"{"err": 1, "result": []}"#).unwrap();
        assert_eq!(envelope.err, 1);
    }

    #[test]
    fn page_from_envelope_keeps_order() {
        let envelope: Envelope<Vec<&str>> = Envelope {
            err: 0,
            result: vec!["a", "b", "c"],
        };
        let page = Page::from_envelope(envelope, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.len(), 3);
        assert!(!page.is_empty());
        assert_eq!(page.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_page_reports_empty() {
        let page: Page<u64> = Page::from_envelope(
            Envelope {
                err: 0,
                result: vec![],
            },
            1,
        );
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
    }
}
