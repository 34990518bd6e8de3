//! Route patterns: compiled routes (`/users/<id>`) matched against request paths.

use resource_routes::path::placeholder_name;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route split into literal and `<param>` segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    route: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(route: &str) -> Self {
        let segments = route
            .split('/')
            .filter(|p| !p.is_empty())
            .map(|piece| match placeholder_name(piece) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(piece.to_string()),
            })
            .collect();
        Self {
            route: route.to_string(),
            segments,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Number of literal segments; more literals means a more specific route.
    pub fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    /// Returns `true` if both patterns match exactly the same paths.
    pub fn same_shape(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Matches a request path, returning the captured parameters.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let pieces: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if pieces.len() != self.segments.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        for (segment, piece) in self.segments.iter().zip(pieces) {
            match segment {
                Segment::Literal(literal) if literal == piece => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), piece.to_string());
                }
            }
        }
        Some(params)
    }
}

/// Splits `a=1&b=2&a=3` into repeated query values. No percent-decoding.
pub fn parse_query(query: &str) -> BTreeMap<String, Vec<String>> {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        params
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_captures_params() {
        let pattern = RoutePattern::parse("/shop/orders/<user_id>/<order_id>");
        let params = pattern.matches("/shop/orders/1/2/").unwrap();
        assert_eq!(params["user_id"], "1");
        assert_eq!(params["order_id"], "2");
        assert!(pattern.matches("/shop/orders/1").is_none());
        assert!(pattern.matches("/shop/users/1/2").is_none());
        assert_eq!(pattern.specificity(), 2);
    }

    #[test]
    fn test_same_shape() {
        let a = RoutePattern::parse("/users/<id>");
        assert!(a.same_shape(&RoutePattern::parse("/users/<uid>")));
        assert!(!a.same_shape(&RoutePattern::parse("/users/me")));
    }

    #[test]
    fn test_parse_query() {
        let query = parse_query("tag=a&dry_run=true&tag=b&flag");
        assert_eq!(query["tag"], ["a", "b"]);
        assert_eq!(query["dry_run"], ["true"]);
        assert_eq!(query["flag"], [""]);
        assert!(parse_query("").is_empty());
    }
}
