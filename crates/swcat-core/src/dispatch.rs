//! Ordered source-identifier dispatch.
//!
//! A [`Dispatcher`] holds `(prefix, handler)` pairs evaluated top-down against
//! a resource identifier by substring containment, plus a fallback handler.
//! Registration order is priority order: `delta-kyric` selects whichever of
//! `delta` / `kyric` was registered first.

/// Ordered substring-match registry with a fallback.
#[derive(Debug, Clone)]
pub struct Dispatcher<H> {
    routes: Vec<(String, H)>,
    fallback: H,
}

impl<H> Dispatcher<H> {
    /// An empty registry that always selects `fallback`.
    pub fn new(fallback: H) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    /// Append a route. Prefixes are matched case-insensitively.
    pub fn register(mut self, prefix: impl Into<String>, handler: H) -> Self {
        self.routes.push((prefix.into().to_lowercase(), handler));
        self
    }

    fn find_route(&self, source_id: &str) -> Option<&(String, H)> {
        let source_id = source_id.to_lowercase();
        self.routes
            .iter()
            .find(|(prefix, _)| source_id.contains(prefix.as_str()))
    }

    /// The first registered prefix contained in `source_id`, if any.
    pub fn matching_prefix(&self, source_id: &str) -> Option<&str> {
        self.find_route(source_id).map(|(prefix, _)| prefix.as_str())
    }

    /// Handler for `source_id`: the earliest matching route, else the fallback.
    pub fn select(&self, source_id: &str) -> &H {
        self.find_route(source_id)
            .map(|(_, handler)| handler)
            .unwrap_or(&self.fallback)
    }

    /// Registered prefixes in priority order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(prefix, _)| prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Dispatcher<&'static str> {
        Dispatcher::new("generic")
            .register("kyric", "kyric")
            .register("delta", "delta")
            .register("bridges", "bridges")
    }

    #[test]
    fn substring_match_selects_route() {
        let d = table();
        assert_eq!(*d.select("delta-cpu.ncsa.access-ci.org"), "delta");
        assert_eq!(*d.select("bridges2-gpu-ai.psc.access-ci.org"), "bridges");
    }

    #[test]
    fn unmatched_falls_back() {
        let d = table();
        assert_eq!(*d.select("osg.access-ci.org"), "generic");
        assert_eq!(d.matching_prefix("osg.access-ci.org"), None);
    }

    #[test]
    fn earlier_registration_wins() {
        let d = table();
        // Both "kyric" and "delta" occur; kyric was registered first.
        assert_eq!(*d.select("delta-kyric"), "kyric");
        assert_eq!(*d.select("kyric-delta"), "kyric");
        assert_eq!(d.matching_prefix("delta-kyric"), Some("kyric"));
    }

    #[test]
    fn matching_ignores_case() {
        let d = table();
        assert_eq!(*d.select("Delta"), "delta");
    }

    #[test]
    fn select_agrees_with_matching_prefix() {
        let d = Dispatcher::new("generic")
            .register("Bridges", "bridges")
            .register("ookami", "ookami");
        for id in ["BRIDGES2.psc", "ookami.sbu", "anvil.purdue", ""] {
            let expected = match d.matching_prefix(id) {
                Some("bridges") => "bridges",
                Some("ookami") => "ookami",
                _ => "generic",
            };
            assert_eq!(*d.select(id), expected, "{id}");
        }
    }

    #[test]
    fn prefixes_in_priority_order() {
        assert_eq!(
            table().prefixes().collect::<Vec<_>>(),
            vec!["kyric", "delta", "bridges"]
        );
    }
}
