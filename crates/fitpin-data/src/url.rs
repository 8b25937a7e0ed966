//! URL building.

use crate::FetchError;

/// Append path segments to `base`, percent-encoding each one.
///
/// Emails and Korean file names go into paths as-is, so they must be
/// encoded segment by segment rather than formatted into the string.
pub fn join_url(base: &str, segments: &[&str]) -> Result<String, FetchError> {
    let mut url =
        reqwest::Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(format!("{base}: cannot be a base")))?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_plain_segments() {
        let url = join_url("http://fitpitback.kro.kr:8080", &["api", "item-info", "12"]).unwrap();
        assert_eq!(url, "http://fitpitback.kro.kr:8080/api/item-info/12");
    }

    #[test]
    fn test_join_trailing_slash_base() {
        let url = join_url("http://host/", &["try-on"]).unwrap();
        assert_eq!(url, "http://host/try-on");
    }

    #[test]
    fn test_join_encodes_segments() {
        let url = join_url("http://host", &["api", "img", "셔츠 1.png"]).unwrap();
        assert_eq!(url, "http://host/api/img/%EC%85%94%EC%B8%A0%201.png");

        let url = join_url("http://host", &["api", "userbodyinfo", "a/b@fitpin.kr"]).unwrap();
        assert_eq!(url, "http://host/api/userbodyinfo/a%2Fb@fitpin.kr");
    }

    #[test]
    fn test_join_rejects_bad_base() {
        assert!(matches!(
            join_url("not a url", &["api"]),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
