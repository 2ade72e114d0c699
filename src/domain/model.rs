use std::collections::BTreeSet;
use std::fmt;

/// A dotted-quad token as found in a log line.
///
/// Octets are syntactically bounded to three digits (0-999). Values above 255
/// are accepted on purpose: the token is only ever forwarded to the
/// geolocation service, which is the authority on whether it exists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IpAddress(String);

impl IpAddress {
    pub fn parse(token: &str) -> Option<Self> {
        Self::octets_of(token).map(|_| Self(token.to_string()))
    }

    /// Wraps a token already matched by a dotted-quad pattern.
    pub(crate) fn from_matched(token: &str) -> Self {
        Self(token.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Loopback 127.0.0.0/8 and the RFC 1918 ranges 10.0.0.0/8,
    /// 172.16.0.0/12 and 192.168.0.0/16.
    pub fn is_non_routable(&self) -> bool {
        match Self::octets_of(&self.0).as_deref() {
            Some([127, ..]) | Some([10, ..]) => true,
            Some([172, second, ..]) => (16..=31).contains(second),
            Some([192, 168, ..]) => true,
            _ => false,
        }
    }

    fn octets_of(token: &str) -> Option<Vec<u16>> {
        let octets = token
            .split('.')
            .map(|part| {
                if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    part.parse::<u16>().ok()
                }
            })
            .collect::<Option<Vec<_>>>()?;
        (octets.len() == 4).then_some(octets)
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique addresses from one input file. Iteration order is lexical, which
/// keeps runs reproducible.
pub type IpSet = BTreeSet<IpAddress>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locale {
    pub latitude: f64,
    pub longitude: f64,
}

impl Locale {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The geolocation service answers (0, 0) when it knows nothing about an address.
    pub fn is_unresolved(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.latitude, self.longitude)
    }
}

/// Degrees Fahrenheit.
pub type Temperature = f64;

pub fn kelvin_to_fahrenheit(kelvin: f64) -> Temperature {
    kelvin * 9.0 / 5.0 - 459.67
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBucket {
    pub minimum: f64,
    pub maximum: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub buckets: Vec<HistogramBucket>,
    /// `buckets.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
}

impl Histogram {
    pub fn total_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}
