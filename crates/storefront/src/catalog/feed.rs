//! Category browsing state.
//!
//! The products screen swaps its list when a category chip is tapped. The
//! fetch for the previous selection is not cancelled, so its response can
//! arrive after the response for the current one. The feed stamps every
//! switch with a generation and drops results presented under a superseded
//! ticket, so the list always ends up showing the selection the user made
//! last.

use tracing::debug;

use super::types::Product;

/// Token tying an in-flight fetch to the category switch that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Products currently shown for the selected category.
#[derive(Debug, Default)]
pub struct CategoryFeed {
    generation: u64,
    selected: Option<String>,
    products: Vec<Product>,
    loading: bool,
}

impl CategoryFeed {
    /// An empty feed with no selection (all products).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected category slug; `None` means all products.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The products on display.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Whether a fetch for the current selection is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Begin switching to `category` (`None` for all products).
    ///
    /// Returns the ticket the eventual result must present to
    /// [`Self::apply`]. Starting a new switch invalidates every earlier
    /// ticket.
    pub fn begin_switch(&mut self, category: Option<String>) -> FetchTicket {
        self.generation += 1;
        self.selected = category;
        self.loading = true;
        FetchTicket(self.generation)
    }

    /// Apply a completed fetch. Returns whether the result was taken; a
    /// stale ticket leaves the feed untouched.
    pub fn apply(&mut self, ticket: FetchTicket, products: Vec<Product>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                stale = ticket.0,
                current = self.generation,
                "dropping products from a superseded category switch"
            );
            return false;
        }
        self.products = products;
        self.loading = false;
        true
    }

    /// Record a failed fetch for `ticket`. Clears the spinner if the ticket
    /// is current; the list keeps whatever it was showing.
    pub fn fail(&mut self, ticket: FetchTicket) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.loading = false;
        true
    }
}
