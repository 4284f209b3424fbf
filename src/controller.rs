//! Navigation and generation orchestration.
//!
//! [`SiteContext`] is the process-wide read-only context: the loaded
//! datasets plus both derived indices, built once before first use and
//! passed explicitly to whoever needs lookups (no module-level singletons).
//!
//! [`GeneratorControl`] owns the lifecycle of a single generation display
//! slot: `Idle -> Pending -> {Success, Failed}`, with `Failed -> Idle` on
//! retry. Each request carries a monotonic token; a delivery with a stale
//! token is discarded, so a superseded in-flight request can never
//! overwrite a newer result.

use crate::ai::{GenerationError, GenerationService};
use crate::catalogue::Dataset;
use crate::filter;
use crate::index::{CatalogueIndex, CategoryIndex, IndexEntry};
use crate::routes;
use crate::slug::{create_category_slug, create_kaomoji_slug};
use crate::types::{Catalogue, Item, Library, TopCategory};
use std::borrow::Cow;

/// A resolved, addressable location for an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAddress {
    pub slug: String,
    pub route: String,
}

/// The read-only context every screen works against.
pub struct SiteContext {
    pub catalogue: Catalogue,
    pub emoji: Library,
    pub symbols: Library,
    pub index: CatalogueIndex,
    pub categories: CategoryIndex,
}

impl SiteContext {
    /// Build the context: indices are derived eagerly so every later
    /// lookup is O(1) against immutable tables.
    pub fn new(dataset: Dataset) -> Self {
        let index = CatalogueIndex::build(&dataset.catalogue);
        let categories = CategoryIndex::build(&dataset.catalogue);
        Self {
            catalogue: dataset.catalogue,
            emoji: dataset.emoji,
            symbols: dataset.symbols,
            index,
            categories,
        }
    }

    /// The stable address of an item. Pure; calling twice for the same
    /// item yields the same address.
    pub fn resolve_item(&self, item: &Item) -> ItemAddress {
        let slug = create_kaomoji_slug(item);
        let route = routes::kaomoji_detail(&slug);
        ItemAddress { slug, route }
    }

    /// Look an item up by slug. A miss is a not-found view, never an error.
    pub fn find_item(&self, slug: &str) -> Option<&IndexEntry> {
        self.index.find_by_slug(slug)
    }

    /// Resolve a category by slug or display label.
    pub fn resolve_category(&self, slug_or_label: &str) -> Option<(&TopCategory, String)> {
        let direct = self
            .categories
            .find_by_slug(&self.catalogue, slug_or_label)
            .map(|c| (c, slug_or_label.to_string()));
        direct.or_else(|| {
            let slug = create_category_slug(slug_or_label);
            self.categories
                .find_by_slug(&self.catalogue, &slug)
                .map(|c| (c, slug))
        })
    }

    /// Free-text search over the kaomoji catalogue.
    pub fn search(&self, query: &str) -> Cow<'_, Catalogue> {
        filter::filter_catalogue(&self.catalogue, query)
    }
}

// ============================================================================
// Generation control
// ============================================================================

/// Monotonic request identifier; stale deliveries are detected by token
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Lifecycle of a generation display slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Pending(RequestToken),
    Success(String),
    Failed(String),
}

/// What the control does when asked to generate.
///
/// `Full` runs the service call itself; `Preview` defers, handing the
/// prompt to another surface (the embedded home-page widget hands off to
/// the dedicated generator screen this way).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorMode {
    #[default]
    Full,
    Preview,
}

/// A request accepted by [`GeneratorControl::begin`]: the token to deliver
/// against, plus the prompt to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub token: RequestToken,
    pub prompt: String,
}

/// State machine for one generation slot.
#[derive(Debug, Default)]
pub struct GeneratorControl {
    mode: GeneratorMode,
    state: GenerationState,
    next_token: u64,
}

impl GeneratorControl {
    pub fn new(mode: GeneratorMode) -> Self {
        Self {
            mode,
            state: GenerationState::Idle,
            next_token: 0,
        }
    }

    pub fn mode(&self) -> GeneratorMode {
        self.mode
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Accept a new request. An empty prompt is refused. A request while
    /// one is pending supersedes it: the old token becomes stale and its
    /// eventual delivery is discarded.
    pub fn begin(&mut self, prompt: &str) -> Option<PendingRequest> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.state = GenerationState::Pending(token);
        Some(PendingRequest {
            token,
            prompt: prompt.to_string(),
        })
    }

    /// Deliver a result for `token`. Returns `false` when the delivery was
    /// discarded because the token is stale or the slot is no longer
    /// pending.
    pub fn deliver(
        &mut self,
        token: RequestToken,
        result: Result<String, GenerationError>,
    ) -> bool {
        match self.state {
            GenerationState::Pending(current) if current == token => {
                self.state = match result {
                    Ok(value) => GenerationState::Success(value),
                    Err(err) => GenerationState::Failed(err.to_string()),
                };
                true
            }
            _ => false,
        }
    }

    /// User retry affordance: a failed slot returns to idle with no
    /// residual result. Returns `false` in any other state.
    pub fn retry(&mut self) -> bool {
        if matches!(self.state, GenerationState::Failed(_)) {
            self.state = GenerationState::Idle;
            true
        } else {
            false
        }
    }

    /// Drive one full request synchronously against `service`.
    ///
    /// Never panics and never throws past this boundary: service failure
    /// lands in the same `GenerationState` channel as success. In
    /// `Preview` mode the call defers instead — the request is returned
    /// pending for the caller to hand off.
    pub fn request_generation(
        &mut self,
        service: &dyn GenerationService,
        prompt: &str,
    ) -> &GenerationState {
        let Some(request) = self.begin(prompt) else {
            return &self.state;
        };
        if self.mode == GeneratorMode::Preview {
            return &self.state;
        }
        let result = service.generate_kaomoji(&request.prompt);
        self.deliver(request.token, result);
        &self.state
    }
}
