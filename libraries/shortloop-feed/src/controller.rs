//! Feed controller - core orchestration
//!
//! Owns the queue, the cursor, the block list, and the refill policy.
//! Consumes search results and player lifecycle events; produces the next
//! item to play and decides when to request more content.
//!
//! Single-threaded and event-driven: every mutation happens inside a call
//! from the host's event loop. Network requests are described by emitted
//! [`FeedEvent::RefillRequested`] events and executed by the host; responses
//! come back through [`FeedController::ingest`] with a generation stamp so
//! stale results never clobber state.

use crate::{
    error::{FeedError, Result},
    events::FeedEvent,
    filter::SafetyFilter,
    queue::FeedQueue,
    retry::RetryPolicy,
    types::{
        AdvanceOutcome, CategorySwitchPolicy, EndOfQueuePolicy, FeedConfig, FeedState, PlayerEvent,
    },
};
use rand::seq::SliceRandom;
use rand::thread_rng;
use shortloop_core::{BlockList, Category, ChannelId, ContentItem, FeedRequest, VideoId};
use std::time::Instant;
use tracing::{debug, warn};

/// Central feed management
///
/// The UI layer holds one instance and issues commands; it never mutates
/// the queue or cursor directly.
pub struct FeedController {
    // State
    config: FeedConfig,
    state: FeedState,
    queue: FeedQueue,
    block_list: BlockList,
    filter: SafetyFilter,
    retry: RetryPolicy,

    // Feed identity
    category: Category,
    search_query: Option<String>,
    authenticated: bool,
    autoplay: bool,

    // In-flight request tracking
    loading: bool,
    generation: u64,
    retry_attempt: u32,
    scheduled_refill: Option<(Instant, FeedRequest)>,

    // Playback failure tracking
    consecutive_errors: u32,
    scheduled_advance: Option<Instant>,

    // Event queue for host synchronization
    pending_events: Vec<FeedEvent>,
}

impl FeedController {
    /// Create a new feed controller
    pub fn new(config: FeedConfig) -> Self {
        let autoplay = config.autoplay;
        Self {
            config,
            state: FeedState::Idle,
            queue: FeedQueue::new(),
            block_list: BlockList::new(),
            filter: SafetyFilter::default(),
            retry: RetryPolicy::default(),
            category: Category::Trending,
            search_query: None,
            authenticated: false,
            autoplay,
            loading: false,
            generation: 0,
            retry_attempt: 0,
            scheduled_refill: None,
            consecutive_errors: 0,
            scheduled_advance: None,
            pending_events: Vec::new(),
        }
    }

    /// Install a block list loaded from the preference store.
    ///
    /// Call before `initialize`; already-queued items matching the list are
    /// purged.
    pub fn set_block_list(&mut self, block_list: BlockList) {
        self.block_list = block_list;
        if self.purge_blocked() > 0 {
            self.emit_queue_changed();
        }
    }

    /// Replace the content-safety filter
    pub fn set_filter(&mut self, filter: SafetyFilter) {
        self.filter = filter;
    }

    /// Replace the retry policy
    pub fn set_retry_policy(&mut self, retry: RetryPolicy) {
        self.retry = retry;
    }

    // ===== Session =====

    /// Start the session.
    ///
    /// With a prior identity session the personalized feed is requested,
    /// otherwise trending. The queue populates when the host feeds the
    /// response through [`ingest`](Self::ingest); the cursor then lands on
    /// the first usable item.
    pub fn initialize(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
        self.category = if authenticated {
            Category::Personalized
        } else {
            Category::Trending
        };
        self.search_query = None;
        self.generation += 1;
        self.set_state(FeedState::Loading);
        self.issue_refill(self.current_request());
    }

    /// Re-issue the current feed request (the "retry" affordance).
    ///
    /// Also resets the error circuit breaker so playback can resume.
    pub fn retry(&mut self) {
        self.consecutive_errors = 0;
        self.retry_attempt = 0;
        self.scheduled_refill = None;
        if self.queue.is_empty() {
            self.set_state(FeedState::Loading);
        } else if self.state == FeedState::Failed {
            self.set_state(FeedState::Ready);
        }
        self.issue_refill(self.current_request());
    }

    // ===== Ingest =====

    /// Merge a feed response into the queue.
    ///
    /// `generation` must echo the stamp from the `RefillRequested` event;
    /// responses from superseded requests are discarded without touching
    /// state. Items are dropped if block-listed or unsafe, deduplicated
    /// against the retained queue, then appended; the queue is finally
    /// trimmed to its retention bound.
    pub fn ingest(&mut self, generation: u64, raw_items: Vec<ContentItem>) {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "discarding stale feed response"
            );
            return;
        }
        self.loading = false;
        self.retry_attempt = 0;
        self.scheduled_refill = None;

        let mut added = 0usize;
        for item in raw_items {
            if self.block_list.matches(&item) {
                debug!(video = %item.id, "dropping block-listed item");
                continue;
            }
            if !self.filter.is_safe(&item) {
                debug!(video = %item.id, "dropping item failing safety filter");
                continue;
            }
            if self.queue.push(item) {
                added += 1;
            }
        }

        let evicted = self
            .queue
            .evict_front(self.config.max_queue_len, self.config.trailing_margin);
        if added > 0 || evicted > 0 {
            self.emit_queue_changed();
        }

        // First usable response of a (re)started feed selects the first item
        if matches!(self.state, FeedState::Loading | FeedState::Exhausted) {
            if self.queue.is_empty() {
                if self.state != FeedState::Exhausted {
                    self.set_state(FeedState::Exhausted);
                    self.pending_events.push(FeedEvent::FeedExhausted);
                }
            } else {
                self.queue.set_cursor(0);
                self.set_state(FeedState::Ready);
                self.emit_item_changed(None);
            }
        }
    }

    /// Report a failed feed request.
    ///
    /// Stale generations are ignored. Otherwise a retry is scheduled per the
    /// retry policy; once attempts are exhausted the controller falls back
    /// to the trending feed, and only when even that yields nothing does it
    /// surface the exhausted state. The queue and cursor are never touched.
    pub fn report_fetch_failure(&mut self, generation: u64, error: &str, now: Instant) {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                error,
                "discarding stale feed failure"
            );
            return;
        }
        self.loading = false;
        self.retry_attempt += 1;
        warn!(
            category = ?self.category,
            attempt = self.retry_attempt,
            error,
            "feed request failed"
        );

        if let Some(delay) = self.retry.delay_for(self.retry_attempt) {
            self.scheduled_refill = Some((now + delay, self.current_request()));
            self.pending_events.push(FeedEvent::RefillRetryScheduled {
                attempt: self.retry_attempt,
                delay_ms: delay.as_millis() as u64,
            });
        } else if self.category != Category::Trending {
            // Fall back to the default category with a fresh attempt budget
            warn!(from = ?self.category, "falling back to trending feed");
            self.category = Category::Trending;
            self.search_query = None;
            self.generation += 1;
            self.retry_attempt = 0;
            let delay = self.retry.base_delay;
            self.scheduled_refill = Some((now + delay, self.current_request()));
            self.pending_events.push(FeedEvent::RefillRetryScheduled {
                attempt: 1,
                delay_ms: delay.as_millis() as u64,
            });
        } else if self.queue.is_empty() && self.state != FeedState::Exhausted {
            self.set_state(FeedState::Exhausted);
            self.pending_events.push(FeedEvent::FeedExhausted);
        }
    }

    // ===== Advance =====

    /// Move the cursor forward by one and return the item to play.
    ///
    /// Synchronous and non-blocking: refills are requested speculatively in
    /// the background (on the fixed cadence, or when wrapping a queue long
    /// enough to be worth refreshing) and merge in later via `ingest`. On an
    /// empty queue this returns [`AdvanceOutcome::NeedsRefill`] after
    /// requesting content; it never indexes out of bounds.
    pub fn advance(&mut self) -> AdvanceOutcome {
        self.scheduled_advance = None;

        let len = self.queue.len();
        if len == 0 {
            self.issue_refill(self.current_request());
            if !matches!(
                self.state,
                FeedState::Failed | FeedState::Exhausted | FeedState::Loading
            ) {
                self.set_state(FeedState::Exhausted);
                self.pending_events.push(FeedEvent::FeedExhausted);
            }
            return AdvanceOutcome::NeedsRefill;
        }

        let at_end = self.queue.cursor() + 1 >= len;
        if at_end && self.config.end_of_queue == EndOfQueuePolicy::FetchAhead {
            self.issue_refill(self.current_request());
            return AdvanceOutcome::NeedsRefill;
        }

        let next = (self.queue.cursor() + 1) % len;

        // Speculative background refill ahead of need
        let cadence = self.config.refill_cadence;
        let cadence_hit = cadence > 0 && next != 0 && next % cadence == 0;
        let wrap_refill = next == 0 && len >= self.config.min_wrap_refill;
        if cadence_hit || wrap_refill {
            self.issue_refill(self.rotation_request());
        }

        let previous = self.queue.current().map(|item| item.id.clone());
        self.queue.set_cursor(next);
        match self.queue.current().cloned() {
            Some(item) => {
                if self.state == FeedState::Exhausted {
                    self.set_state(FeedState::Ready);
                }
                self.emit_item_changed(previous);
                AdvanceOutcome::Item(item)
            }
            None => AdvanceOutcome::NeedsRefill,
        }
    }

    // ===== Player lifecycle =====

    /// React to a player lifecycle event.
    ///
    /// Advancing is event-driven with a short debounce: `Ended` schedules an
    /// auto-advance when continuous play is on, `Error` schedules one
    /// regardless (a broken item must not strand the user) until the
    /// consecutive-error threshold trips the circuit breaker. The host runs
    /// due work by calling [`poll`](Self::poll).
    pub fn handle_player_event(&mut self, event: PlayerEvent, now: Instant) {
        match event {
            PlayerEvent::Ready | PlayerEvent::Cued => {}
            PlayerEvent::Playing => {
                self.consecutive_errors = 0;
                // A transient end/replay signal from the widget is voided
                // by real playback resuming
                self.scheduled_advance = None;
                if self.state != FeedState::Failed {
                    self.set_state(FeedState::Playing);
                }
            }
            PlayerEvent::Paused | PlayerEvent::Buffering => {
                // A pending debounced advance stays untouched
                if self.state == FeedState::Playing {
                    self.set_state(FeedState::Paused);
                }
            }
            PlayerEvent::Ended => {
                if self.autoplay
                    && self.state != FeedState::Failed
                    && self.scheduled_advance.is_none()
                {
                    self.scheduled_advance = Some(now + self.config.advance_debounce);
                }
            }
            PlayerEvent::Error(code) => {
                self.consecutive_errors += 1;
                warn!(
                    code,
                    video = ?self.queue.current().map(|item| item.id.clone()),
                    consecutive = self.consecutive_errors,
                    "player reported an error"
                );
                if self.consecutive_errors >= self.config.error_threshold {
                    self.scheduled_advance = None;
                    // Surface the hard failure only on the transition
                    if self.state != FeedState::Failed {
                        self.set_state(FeedState::Failed);
                        self.pending_events.push(FeedEvent::HardFailure {
                            consecutive_errors: self.consecutive_errors,
                        });
                    }
                } else if self.scheduled_advance.is_none() {
                    self.scheduled_advance = Some(now + self.config.advance_debounce);
                }
            }
        }
    }

    /// Execute work that has come due: debounced advances and scheduled
    /// refill retries.
    ///
    /// Returns the advance outcome when a debounced advance fired.
    pub fn poll(&mut self, now: Instant) -> Option<AdvanceOutcome> {
        if let Some((due, request)) = self.scheduled_refill.clone() {
            if now >= due {
                self.scheduled_refill = None;
                self.issue_refill(request);
            }
        }

        match self.scheduled_advance {
            Some(due) if now >= due => {
                self.scheduled_advance = None;
                Some(self.advance())
            }
            _ => None,
        }
    }

    // ===== Blocking =====

    /// Block the currently playing video and skip past it.
    ///
    /// Idempotent: re-blocking an already-blocked video only re-persists.
    /// The host receives a `BlockListChanged` event to write through the
    /// preference store.
    pub fn block_current_item(&mut self) -> Result<AdvanceOutcome> {
        let current = self.queue.current().cloned().ok_or(FeedError::NoCurrentItem)?;
        self.block_list.block_video(current.id.clone());
        Ok(self.apply_block(current.id))
    }

    /// Block the current video's channel and skip past it.
    ///
    /// When the listing carried no channel identifier the host must resolve
    /// one via a metadata lookup and call [`block_channel`](Self::block_channel).
    pub fn block_current_channel(&mut self) -> Result<AdvanceOutcome> {
        let current = self.queue.current().cloned().ok_or(FeedError::NoCurrentItem)?;
        let channel = current
            .channel_id
            .clone()
            .ok_or(FeedError::UnknownChannel(current.id.clone()))?;
        self.block_list.block_channel(channel);
        Ok(self.apply_block(current.id))
    }

    /// Block an explicit channel identifier (resolved by the host via a
    /// metadata lookup) and purge its videos from the queue.
    ///
    /// The current video is removed along with the purge: it is the one the
    /// channel was resolved for, even when its own listing carried no
    /// channel identifier for the block list to match on.
    pub fn block_channel(&mut self, channel: ChannelId) -> AdvanceOutcome {
        let previous = self.queue.current().map(|item| item.id.clone());
        self.block_list.block_channel(channel);
        match previous {
            Some(id) => self.apply_block(id),
            None => {
                self.emit_block_list_changed();
                AdvanceOutcome::NeedsRefill
            }
        }
    }

    /// Purge newly blocked entries, persist, and move on.
    ///
    /// `blocked` is removed unconditionally: for a channel block it may carry
    /// no channel metadata of its own, leaving the block list nothing to
    /// match on. `retain` already leaves the cursor on the next surviving
    /// item, so the "advance" here is loading that item rather than stepping
    /// again.
    fn apply_block(&mut self, blocked: VideoId) -> AdvanceOutcome {
        let list = &self.block_list;
        let removed = self
            .queue
            .retain(|item| item.id != blocked && !list.matches(item));
        self.emit_block_list_changed();
        if removed > 0 {
            self.emit_queue_changed();
        }

        if self.queue.is_empty() {
            self.issue_refill(self.current_request());
            if self.state != FeedState::Exhausted {
                self.set_state(FeedState::Exhausted);
                self.pending_events.push(FeedEvent::FeedExhausted);
            }
            return AdvanceOutcome::NeedsRefill;
        }

        match self.queue.current().cloned() {
            Some(item) => {
                self.emit_item_changed(Some(blocked));
                AdvanceOutcome::Item(item)
            }
            None => AdvanceOutcome::NeedsRefill,
        }
    }

    fn purge_blocked(&mut self) -> usize {
        let list = &self.block_list;
        self.queue.retain(|item| !list.matches(item))
    }

    // ===== Category & search =====

    /// Switch to a category feed.
    ///
    /// `Category::Search` is driven through [`search`](Self::search) instead
    /// because it needs a query string.
    pub fn select_category(&mut self, category: Category) -> Result<()> {
        if category == Category::Search {
            return Err(FeedError::InvalidOperation(
                "use search() for the search category".to_string(),
            ));
        }
        self.category = category;
        self.search_query = None;
        self.switch_feed();
        Ok(())
    }

    /// Run a free-text search feed
    pub fn search(&mut self, query: impl Into<String>) {
        self.category = Category::Search;
        self.search_query = Some(query.into());
        self.switch_feed();
    }

    /// Common tail of category/search switches: supersede in-flight
    /// requests and apply the configured queue policy.
    fn switch_feed(&mut self) {
        self.generation += 1;
        self.retry_attempt = 0;
        self.scheduled_refill = None;
        self.loading = false;

        if self.config.category_switch == CategorySwitchPolicy::Replace {
            self.queue.clear();
            self.emit_queue_changed();
            self.set_state(FeedState::Loading);
        }
        self.issue_refill(self.current_request());
    }

    // ===== Requests =====

    /// The request describing the current feed identity
    fn current_request(&self) -> FeedRequest {
        match self.search_query.as_ref() {
            Some(query) if self.category == Category::Search => FeedRequest::search(query.clone()),
            _ => FeedRequest::category(self.category),
        }
    }

    /// Request for a background refill: personalized when signed in,
    /// otherwise a random rotation category.
    fn rotation_request(&self) -> FeedRequest {
        if self.authenticated {
            return FeedRequest::category(Category::Personalized);
        }
        let mut rng = thread_rng();
        let category = Category::ROTATION
            .choose(&mut rng)
            .copied()
            .unwrap_or(Category::Trending);
        FeedRequest::category(category)
    }

    /// Emit a refill request unless one is already in flight (in-flight
    /// requests are coalesced; the generation stamp supersedes them on
    /// feed switches).
    fn issue_refill(&mut self, request: FeedRequest) {
        if self.loading {
            debug!(?request, "refill already in flight, coalescing");
            return;
        }
        self.loading = true;
        debug!(?request, generation = self.generation, "requesting refill");
        self.pending_events.push(FeedEvent::RefillRequested {
            request,
            generation: self.generation,
        });
    }

    // ===== State queries =====

    /// Current controller state
    pub fn state(&self) -> FeedState {
        self.state
    }

    /// Item at the cursor
    pub fn current(&self) -> Option<&ContentItem> {
        self.queue.current()
    }

    /// Cursor position
    pub fn cursor(&self) -> usize {
        self.queue.cursor()
    }

    /// Queue length
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// All queued items in order
    pub fn queue_items(&self) -> &[ContentItem] {
        self.queue.items()
    }

    /// Active category
    pub fn category(&self) -> Category {
        self.category
    }

    /// Current generation stamp (echoed by `ingest`)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The block list as currently held
    pub fn block_list(&self) -> &BlockList {
        &self.block_list
    }

    /// Whether a feed request is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether continuous play is on
    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    /// Toggle continuous play
    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
        if !autoplay {
            self.scheduled_advance = None;
        }
    }

    /// Whether a debounced advance is pending
    pub fn has_pending_advance(&self) -> bool {
        self.scheduled_advance.is_some()
    }

    /// Consecutive player errors since the last successful playback
    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    // ===== Events =====

    /// Drain all pending events.
    ///
    /// The host should call this after every controller call and act on the
    /// events in order.
    pub fn drain_events(&mut self) -> Vec<FeedEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_state(&mut self, state: FeedState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(FeedEvent::StateChanged { state });
        }
    }

    fn emit_item_changed(&mut self, previous: Option<VideoId>) {
        if let Some(item) = self.queue.current() {
            self.pending_events.push(FeedEvent::ItemChanged {
                video_id: item.id.clone(),
                previous,
            });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(FeedEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_block_list_changed(&mut self) {
        self.pending_events.push(FeedEvent::BlockListChanged {
            block_list: self.block_list.clone(),
        });
    }
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new(FeedConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(ids: &[&str]) -> FeedController {
        let mut controller = FeedController::new(FeedConfig::default());
        controller.initialize(false);
        let generation = controller.generation();
        controller.ingest(
            generation,
            ids.iter().map(|id| ContentItem::bare(*id)).collect(),
        );
        controller.drain_events();
        controller
    }

    #[test]
    fn initialize_requests_trending_without_session() {
        let mut controller = FeedController::new(FeedConfig::default());
        controller.initialize(false);

        let events = controller.drain_events();
        assert!(events.iter().any(|event| matches!(
            event,
            FeedEvent::RefillRequested {
                request: FeedRequest {
                    category: Category::Trending,
                    query: None
                },
                ..
            }
        )));
        assert_eq!(controller.state(), FeedState::Loading);
    }

    #[test]
    fn initialize_requests_personalized_with_session() {
        let mut controller = FeedController::new(FeedConfig::default());
        controller.initialize(true);

        let events = controller.drain_events();
        assert!(events.iter().any(|event| matches!(
            event,
            FeedEvent::RefillRequested {
                request: FeedRequest {
                    category: Category::Personalized,
                    ..
                },
                ..
            }
        )));
    }

    #[test]
    fn stale_ingest_is_discarded() {
        let mut controller = seeded(&["a", "b"]);
        let stale = controller.generation() - 1;
        controller.ingest(stale, vec![ContentItem::bare("c")]);
        assert_eq!(controller.queue_len(), 2);
    }

    #[test]
    fn empty_initial_fetch_surfaces_exhausted_state() {
        let mut controller = FeedController::new(FeedConfig::default());
        controller.initialize(false);
        let generation = controller.generation();
        controller.ingest(generation, vec![]);

        assert_eq!(controller.state(), FeedState::Exhausted);
        assert!(controller
            .drain_events()
            .contains(&FeedEvent::FeedExhausted));
    }

    #[test]
    fn concurrent_refills_coalesce() {
        let mut controller = seeded(&["a", "b", "c", "d", "e", "f"]);

        // The cadence hit at position 5 emits a request; the wrap on the
        // next advance coalesces into the in-flight one
        for _ in 0..6 {
            controller.advance();
        }
        let requests = controller
            .drain_events()
            .into_iter()
            .filter(|event| matches!(event, FeedEvent::RefillRequested { .. }))
            .count();
        assert_eq!(requests, 1);
        assert!(controller.is_loading());
    }

    #[test]
    fn advance_on_empty_queue_needs_refill() {
        let mut controller = FeedController::new(FeedConfig::default());
        controller.initialize(false);
        controller.drain_events();

        assert_eq!(controller.advance(), AdvanceOutcome::NeedsRefill);
        // No panic, no out-of-bounds cursor
        assert_eq!(controller.queue_len(), 0);
    }

    #[test]
    fn category_switch_replaces_queue_and_supersedes_inflight() {
        let mut controller = seeded(&["a", "b"]);
        let old_generation = controller.generation();

        controller.select_category(Category::Music).unwrap();
        assert_eq!(controller.queue_len(), 0);
        assert_eq!(controller.state(), FeedState::Loading);
        assert!(controller.generation() > old_generation);

        // Late response from the old feed is dropped
        controller.ingest(old_generation, vec![ContentItem::bare("stale")]);
        assert_eq!(controller.queue_len(), 0);
    }

    #[test]
    fn category_switch_can_merge() {
        let config = FeedConfig {
            category_switch: CategorySwitchPolicy::Merge,
            ..FeedConfig::default()
        };
        let mut controller = FeedController::new(config);
        controller.initialize(false);
        let generation = controller.generation();
        controller.ingest(generation, vec![ContentItem::bare("a")]);

        controller.select_category(Category::Funny).unwrap();
        assert_eq!(controller.queue_len(), 1);
        let generation = controller.generation();
        controller.ingest(generation, vec![ContentItem::bare("b")]);
        assert_eq!(controller.queue_len(), 2);
    }

    #[test]
    fn select_search_category_is_rejected() {
        let mut controller = seeded(&["a"]);
        assert!(matches!(
            controller.select_category(Category::Search),
            Err(FeedError::InvalidOperation(_))
        ));
    }

    #[test]
    fn search_carries_query() {
        let mut controller = seeded(&["a"]);
        controller.search("cat videos");

        let events = controller.drain_events();
        assert!(events.iter().any(|event| matches!(
            event,
            FeedEvent::RefillRequested { request, .. }
                if request.category == Category::Search
                    && request.query.as_deref() == Some("cat videos")
        )));
    }

    #[test]
    fn fetch_failure_schedules_retry_then_falls_back() {
        let mut controller = FeedController::new(FeedConfig::default());
        controller.initialize(true);
        controller.drain_events();
        let now = Instant::now();

        for _ in 0..3 {
            let generation = controller.generation();
            controller.report_fetch_failure(generation, "http 500", now);
            // Run the scheduled retry
            controller.poll(now + std::time::Duration::from_secs(60));
        }
        assert_eq!(controller.category(), Category::Personalized);

        // Fourth failure exhausts the budget and falls back to trending
        let generation = controller.generation();
        controller.report_fetch_failure(generation, "http 500", now);
        assert_eq!(controller.category(), Category::Trending);
    }

    #[test]
    fn autoplay_off_ignores_ended() {
        let mut controller = seeded(&["a", "b"]);
        controller.set_autoplay(false);

        let now = Instant::now();
        controller.handle_player_event(PlayerEvent::Ended, now);
        assert!(!controller.has_pending_advance());
    }

    #[test]
    fn error_advances_even_without_autoplay() {
        let mut controller = seeded(&["a", "b"]);
        controller.set_autoplay(false);

        let now = Instant::now();
        controller.handle_player_event(PlayerEvent::Error(150), now);
        assert!(controller.has_pending_advance());
    }

    #[test]
    fn playing_cancels_pending_advance_and_resets_errors() {
        let mut controller = seeded(&["a", "b"]);
        let now = Instant::now();

        controller.handle_player_event(PlayerEvent::Error(2), now);
        assert!(controller.has_pending_advance());
        assert_eq!(controller.consecutive_errors(), 1);

        controller.handle_player_event(PlayerEvent::Playing, now);
        assert!(!controller.has_pending_advance());
        assert_eq!(controller.consecutive_errors(), 0);
        assert_eq!(controller.state(), FeedState::Playing);
    }

    #[test]
    fn pause_leaves_pending_advance_untouched() {
        let mut controller = seeded(&["a", "b"]);
        let now = Instant::now();

        controller.handle_player_event(PlayerEvent::Ended, now);
        controller.handle_player_event(PlayerEvent::Buffering, now);
        assert!(controller.has_pending_advance());
    }

    #[test]
    fn tripped_breaker_reports_hard_failure_once() {
        let mut controller = seeded(&["a", "b"]);
        let now = Instant::now();

        for _ in 0..5 {
            controller.handle_player_event(PlayerEvent::Error(101), now);
        }
        assert_eq!(controller.state(), FeedState::Failed);
        let first = controller.drain_events();
        assert_eq!(
            first
                .iter()
                .filter(|event| matches!(event, FeedEvent::HardFailure { .. }))
                .count(),
            1
        );

        // Further errors while failed stay silent
        controller.handle_player_event(PlayerEvent::Error(101), now);
        assert!(!controller
            .drain_events()
            .iter()
            .any(|event| matches!(event, FeedEvent::HardFailure { .. })));
        assert_eq!(controller.state(), FeedState::Failed);
    }

    #[test]
    fn block_current_channel_without_metadata_errors() {
        let mut controller = seeded(&["a"]);
        assert!(matches!(
            controller.block_current_channel(),
            Err(FeedError::UnknownChannel(_))
        ));
    }
}
