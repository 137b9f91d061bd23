use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::Result;
use crate::model::validate_coords;

/// Whole-string grammar for a signed decimal pair: `<lat> , <lon>` with
/// optional whitespace around the comma and optional fractional parts.
static COORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([-+]?\d+(?:\.\d+)?)\s*,\s*([-+]?\d+(?:\.\d+)?)\s*$")
        .expect("coordinate pattern is a valid regex")
});

/// Forward geocoding seam, so the parser can be exercised against a fake
/// without touching the network.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-form address to a `(lat, lon)` pair.
    async fn geocode(&self, address: &str) -> Result<(f64, f64)>;
}

/// Parse a raw `"lat,lon"` string, without range validation.
///
/// Returns `None` when the input does not match the coordinate grammar,
/// meaning it should be treated as a free-form address instead.
pub fn parse_coords(input: &str) -> Option<(f64, f64)> {
    let caps = COORDS_RE.captures(input)?;

    // Both captures satisfy the decimal grammar, so parsing cannot fail.
    let lat = caps.get(1)?.as_str().parse().ok()?;
    let lon = caps.get(2)?.as_str().parse().ok()?;

    Some((lat, lon))
}

/// Classify a user-supplied location string.
///
/// Coordinate syntax wins and is range-checked; anything else is handed to
/// the geocoder as an address, exactly once.
pub async fn resolve_location(input: &str, geocoder: &dyn Geocoder) -> Result<(f64, f64)> {
    if let Some((lat, lon)) = parse_coords(input) {
        validate_coords(lat, lon)?;
        return Ok((lat, lon));
    }

    geocoder.geocode(input).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGeocoder {
        calls: AtomicUsize,
        result: (f64, f64),
    }

    impl CountingGeocoder {
        fn new(result: (f64, f64)) -> Self {
            Self { calls: AtomicUsize::new(0), result }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, _address: &str) -> Result<(f64, f64)> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.result)
        }
    }

    #[test]
    fn parses_plain_pair() {
        assert_eq!(parse_coords("32.7767,-96.7970"), Some((32.7767, -96.7970)));
    }

    #[test]
    fn parses_signed_integers_and_whitespace() {
        assert_eq!(parse_coords("  -12 ,  +34  "), Some((-12.0, 34.0)));
        assert_eq!(parse_coords("0,0"), Some((0.0, 0.0)));
    }

    #[test]
    fn rejects_addresses_and_partial_pairs() {
        assert_eq!(parse_coords("Dallas, TX"), None);
        assert_eq!(parse_coords("32.7767"), None);
        assert_eq!(parse_coords("32.7767,-96.7970,5"), None);
        assert_eq!(parse_coords("1.2.3,4"), None);
        assert_eq!(parse_coords(""), None);
    }

    #[tokio::test]
    async fn coordinate_input_never_hits_the_geocoder() {
        let geocoder = CountingGeocoder::new((0.0, 0.0));
        let got = resolve_location("32.7767,-96.7970", &geocoder).await.unwrap();

        assert_eq!(got, (32.7767, -96.7970));
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn address_input_hits_the_geocoder_exactly_once() {
        let geocoder = CountingGeocoder::new((32.7767, -96.7970));
        let got = resolve_location("Dallas, TX", &geocoder).await.unwrap();

        assert_eq!(got, (32.7767, -96.7970));
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn out_of_range_pair_is_invalid_input() {
        let geocoder = CountingGeocoder::new((0.0, 0.0));
        let err = resolve_location("91.0, 10.0", &geocoder).await.unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(geocoder.calls(), 0);
    }
}
