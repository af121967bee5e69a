#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RouteStats {
    pub routes: usize,
    pub wildcard_routes: usize,
}

impl RouteStats {
    pub fn record_route(&mut self) {
        self.routes += 1;
    }

    pub fn record_wildcard(&mut self) {
        self.wildcard_routes += 1;
    }

    pub fn total(&self) -> usize {
        self.routes + self.wildcard_routes
    }
}
