/// Screens of the search flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchRoute {
    Home,
    Filters,
}

/// Header shown above a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenHeader {
    pub title: &'static str,
    pub nav_back: bool,
    pub show_search: bool,
}

impl SearchRoute {
    /// `None` when the screen draws no header.
    pub fn header(&self) -> Option<ScreenHeader> {
        match self {
            SearchRoute::Home => None,
            SearchRoute::Filters => Some(ScreenHeader {
                title: "Search filters",
                nav_back: true,
                show_search: false,
            }),
        }
    }
}

/// Linear stack of search screens, rooted at [`SearchRoute::Home`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStack {
    routes: Vec<SearchRoute>,
}

impl Default for SearchStack {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStack {
    pub fn new() -> Self {
        Self {
            routes: vec![SearchRoute::Home],
        }
    }

    pub fn current(&self) -> SearchRoute {
        *self.routes.last().unwrap_or(&SearchRoute::Home)
    }

    pub fn depth(&self) -> usize {
        self.routes.len()
    }

    /// Go to `route`, popping back to it if it is already on the stack.
    pub fn navigate(&mut self, route: SearchRoute) {
        match self.routes.iter().position(|r| *r == route) {
            Some(pos) => self.routes.truncate(pos + 1),
            None => self.routes.push(route),
        }
    }

    /// Pop the top screen. Returns false at the root.
    pub fn go_back(&mut self) -> bool {
        if self.routes.len() > 1 {
            self.routes.pop();
            true
        } else {
            false
        }
    }
}
