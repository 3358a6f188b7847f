//! Query strings and pagination

use serde::{Deserialize, Serialize};

/// Largest page size the backend accepts
pub const MAX_LIMIT: u32 = 100;

/// Default page size for list views
pub const DEFAULT_LIMIT: u32 = 20;

/// Build `?a=1&b=2` from key/value pairs
///
/// `None` and empty values are dropped. Returns an empty string when
/// nothing is left.
pub fn build_query_string<'a, I, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<V>)>,
    V: ToString,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    for (key, value) in pairs {
        let Some(value) = value.map(|v| v.to_string()) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        serializer.append_pair(key, &value);
        any = true;
    }

    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

/// A clamped page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Query string for this page
    pub fn query(&self) -> String {
        build_query_string([("page", Some(self.page)), ("limit", Some(self.limit))])
    }
}

/// Clamp raw page numbers to `page >= 1` and `1 <= limit <= 100`
///
/// Fractions are floored. NaN becomes 1.
pub fn validate_pagination(page: f64, limit: f64) -> Pagination {
    Pagination {
        page: clamp(page, 1, u32::MAX),
        limit: clamp(limit, 1, MAX_LIMIT),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp(value: f64, min: u32, max: u32) -> u32 {
    if value.is_nan() {
        return min;
    }
    // float-to-int casts saturate
    let floored = value.floor().max(f64::from(min)).min(f64::from(max));
    floored as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_query_string_drops_empty_values() {
        let query = build_query_string([
            ("page", Some("2".to_string())),
            ("search", None),
            ("status", Some(String::new())),
            ("limit", Some("10".to_string())),
        ]);
        assert_eq!(query, "?page=2&limit=10");
    }

    #[test]
    fn test_query_string_encodes() {
        let query = build_query_string([("q", Some("Asha Rao & co"))]);
        assert_eq!(query, "?q=Asha+Rao+%26+co");
    }

    #[test]
    fn test_query_string_empty() {
        assert_eq!(build_query_string::<_, String>([("a", None)]), "");
    }

    #[test]
    fn test_pagination_examples() {
        assert_eq!(validate_pagination(-5.0, 500.0), Pagination { page: 1, limit: 100 });
        assert_eq!(validate_pagination(2.9, 0.0), Pagination { page: 2, limit: 1 });
        assert_eq!(validate_pagination(0.0, 500.0), Pagination { page: 1, limit: 100 });
        assert_eq!(validate_pagination(-3.0, 0.0), Pagination { page: 1, limit: 1 });
        assert_eq!(validate_pagination(2.7, 15.9), Pagination { page: 2, limit: 15 });
        assert_eq!(validate_pagination(f64::NAN, f64::NAN), Pagination { page: 1, limit: 1 });
        assert_eq!(Pagination::default().query(), "?page=1&limit=20");
    }

    proptest! {
        #[test]
        fn prop_pagination_always_in_range(page in any::<f64>(), limit in any::<f64>()) {
            let p = validate_pagination(page, limit);
            prop_assert!(p.page >= 1);
            prop_assert!((1..=MAX_LIMIT).contains(&p.limit));
        }
    }
}
