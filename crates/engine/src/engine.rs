// Chunk: docs/chunks/highlight_engine - Incremental, deadline-bounded highlighting engine

//! The incremental highlighting engine.
//!
//! A [`HighlightEngine`] attaches to one document, observes its edits and
//! keeps a [`RunRegion`] recording which parts of the text carry
//! up-to-date highlighting. Stale parts are re-highlighted in ticks driven
//! by a [`Scheduler`]; each tick stops at its deadline and the scheduler
//! calls it again until nothing is left.
//!
//! The document is held weakly. Every access upgrades first and does
//! nothing if the document is gone.
//!
//! # Lifecycle
//!
//! ```text
//! Detached --attach--> Idle <--> Scheduled <--> Ticking
//!                        \          |
//!                         `-pause-> Paused --unpause--> Idle/Scheduled
//! ```
//!
//! While paused, edits are still recorded in the region; only ticks stop.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use sheen_buffer::{Document, DocumentObserver, ObserverId, StyleScheme, TagId, TagTable, TextBuffer};
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::highlighter::{Highlighter, StyleApplier};
use crate::invalidation::invalidation_area;
use crate::region::{RunRegion, RunState};
use crate::registry::HighlighterRegistry;
use crate::scheduler::{Scheduler, TaskControl, TaskHandle};
use crate::tags::StyleTags;

/// A document shared between its owner and the engine.
pub type SharedDocument = Rc<RefCell<Document>>;

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Not attached to any document.
    Detached,
    /// Attached, nothing scheduled.
    Idle,
    /// A tick is queued on the scheduler.
    Scheduled,
    /// Inside a tick.
    Ticking,
    /// Attached but suspended; edits are recorded, no ticks run.
    Paused,
}

pub struct HighlightEngine {
    shared: Rc<Shared>,
}

/// Weak handle to an engine, for highlighters that finish work later.
#[derive(Clone, Debug)]
pub struct EngineHandle {
    shared: Weak<Shared>,
}

struct Shared {
    this: Weak<Shared>,
    scheduler: Rc<Scheduler>,
    registry: Rc<HighlighterRegistry>,
    quanta: Duration,

    document: RefCell<Weak<RefCell<Document>>>,
    observer: Cell<Option<ObserverId>>,
    attached: Cell<bool>,

    region: RefCell<RunRegion>,
    highlighter: RefCell<Option<Box<dyn Highlighter>>>,
    highlighter_language: RefCell<Option<String>>,
    /// Highlighter installed by hand rather than resolved from the language.
    explicit_highlighter: Cell<bool>,
    tags: RefCell<StyleTags>,

    work: Cell<Option<TaskHandle>>,
    deadline: Cell<Option<Instant>>,
    enabled: Cell<bool>,
    paused: Cell<bool>,
    ticking: Cell<bool>,
    needs_style_resync: Cell<bool>,
    /// A rebuild was asked for while the document was borrowed.
    needs_rebuild: Cell<bool>,
    /// Private tags outside CHECKED runs still have to be removed.
    needs_tag_sweep: Cell<bool>,
}

impl fmt::Debug for HighlightEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.shared;
        f.debug_struct("HighlightEngine")
            .field("state", &self.state())
            .field("enabled", &s.enabled.get())
            .field("region", &s.region.try_borrow().map(|r| r.to_string()).ok())
            .field("language", &s.highlighter_language.try_borrow().ok())
            .finish()
    }
}

impl HighlightEngine {
    pub fn new(scheduler: Rc<Scheduler>, registry: Rc<HighlighterRegistry>) -> Self {
        Self::with_config(scheduler, registry, &EngineConfig::default())
    }

    pub fn with_config(
        scheduler: Rc<Scheduler>,
        registry: Rc<HighlighterRegistry>,
        config: &EngineConfig,
    ) -> Self {
        let shared = Rc::new_cyclic(|this| Shared {
            this: this.clone(),
            scheduler,
            registry,
            quanta: config.quanta(),
            document: RefCell::new(Weak::new()),
            observer: Cell::new(None),
            attached: Cell::new(false),
            region: RefCell::new(RunRegion::new()),
            highlighter: RefCell::new(None),
            highlighter_language: RefCell::new(None),
            explicit_highlighter: Cell::new(false),
            tags: RefCell::new(StyleTags::new()),
            work: Cell::new(None),
            deadline: Cell::new(None),
            enabled: Cell::new(config.semantic_highlighting),
            paused: Cell::new(false),
            ticking: Cell::new(false),
            needs_style_resync: Cell::new(false),
            needs_rebuild: Cell::new(false),
            needs_tag_sweep: Cell::new(false),
        });
        Self { shared }
    }

    // ==================== Attachment ====================

    /// Binds the engine to `document` and schedules highlighting of its
    /// whole content. Any previous document is detached first.
    pub fn attach(&self, document: &SharedDocument) {
        let s = &self.shared;
        if s.attached.get() {
            self.detach();
        }

        let Ok(mut doc) = document.try_borrow_mut() else {
            warn!(target: "sheen::engine", "attach: document is borrowed; not attaching");
            return;
        };

        let observer: Weak<dyn DocumentObserver> = s.this.clone();
        s.observer.set(Some(doc.add_observer(observer)));
        *s.document.borrow_mut() = Rc::downgrade(document);
        s.attached.set(true);

        let language = doc.language().map(str::to_owned);
        s.load_highlighter_for(language.as_deref());
        let scheme = doc.style_scheme().cloned();
        s.tags.borrow().resync(doc.tags_mut(), scheme.as_deref());
        s.reseed(doc.len());
        let len = doc.len();
        drop(doc);

        debug!(target: "sheen::engine", len, language = ?language, "attached");
        s.queue_update();
    }

    /// Unbinds from the document: cancels work, removes every tag the engine
    /// created and drops the highlighter.
    pub fn detach(&self) {
        self.shared.detach();
    }

    pub fn document(&self) -> Option<SharedDocument> {
        self.shared.document.borrow().upgrade()
    }

    pub fn state(&self) -> EngineState {
        let s = &self.shared;
        if !s.attached.get() {
            EngineState::Detached
        } else if s.ticking.get() {
            EngineState::Ticking
        } else if s.paused.get() {
            EngineState::Paused
        } else if s.work.get().is_some() {
            EngineState::Scheduled
        } else {
            EngineState::Idle
        }
    }

    // ==================== Work ====================

    /// Runs one tick now, bounded by `deadline`.
    ///
    /// The scheduler calls this on its own; hosts may call it directly.
    pub fn tick(&self, deadline: Instant) -> TaskControl {
        self.shared.tick(deadline)
    }

    /// Suspends ticking. Edits keep being recorded.
    pub fn pause(&self) {
        let s = &self.shared;
        if s.paused.replace(true) {
            return;
        }
        s.cancel_work();
        debug!(target: "sheen::engine", "paused");
    }

    /// Resumes ticking after re-reading the document's language and style
    /// scheme.
    pub fn unpause(&self) {
        let s = &self.shared;
        if !s.paused.replace(false) {
            return;
        }
        debug!(target: "sheen::engine", "unpaused");
        if !s.attached.get() {
            return;
        }

        let Some(doc_rc) = s.upgrade_document() else {
            return;
        };
        let Ok(mut doc) = doc_rc.try_borrow_mut() else {
            // Pick the resync up on the next tick instead.
            s.needs_style_resync.set(true);
            s.request_tick();
            return;
        };

        let language = doc.language().map(str::to_owned);
        let swapped = s.load_highlighter_for(language.as_deref());
        let len = doc.len();
        if swapped {
            s.reseed(len);
            s.tags.borrow().remove_private_in(doc.tags_mut(), 0, len);
        }
        let scheme = doc.style_scheme().cloned();
        s.tags.borrow().resync(doc.tags_mut(), scheme.as_deref());
        let (text, tags) = doc.split_mut();
        s.apply_pending(text, tags);
        drop(doc);

        if swapped {
            // Even without a new highlighter, a tick drops the stale styling.
            s.request_tick();
        } else {
            s.queue_update();
        }
    }

    /// Drops all highlighting and starts over on the whole document.
    pub fn rebuild(&self) {
        self.shared.rebuild();
    }

    /// Removes the public style tags from the whole document.
    pub fn clear(&self) {
        let s = &self.shared;
        let Some(doc_rc) = s.upgrade_document() else {
            return;
        };
        let Ok(mut doc) = doc_rc.try_borrow_mut() else {
            return;
        };
        let len = doc.len();
        if let Ok(tags) = s.tags.try_borrow() {
            tags.remove_public_in(doc.tags_mut(), 0, len);
        }
    }

    /// Marks `[begin, end)` for re-highlighting.
    pub fn invalidate(&self, begin: usize, end: usize) {
        self.shared.invalidate(begin, end);
    }

    /// Asks for another tick, for highlighters that have new results.
    pub fn advance(&self) {
        self.shared.queue_update();
    }

    /// Returns the public tag for `style`, creating it on first use.
    ///
    /// Returns `None` while detached.
    pub fn get_style(&self, style: &str) -> Option<TagId> {
        let s = &self.shared;
        if !s.attached.get() {
            return None;
        }
        let doc_rc = s.upgrade_document()?;
        let mut tags = s.tags.try_borrow_mut().ok()?;
        // Bound to a local so the borrow guard drops before `doc_rc`.
        #[allow(clippy::let_and_return)]
        let id = match doc_rc.try_borrow_mut() {
            Ok(mut doc) => {
                let scheme = doc.style_scheme().cloned();
                Some(tags.get_or_create(doc.tags_mut(), scheme.as_deref(), style, false))
            }
            Err(_) => tags.public_tag(style),
        };
        id
    }

    // ==================== Settings ====================

    /// Turns highlighting on (rebuilding) or off (dropping private tags).
    pub fn set_enabled(&self, enabled: bool) {
        let s = &self.shared;
        if s.enabled.replace(enabled) == enabled {
            return;
        }
        debug!(target: "sheen::engine", enabled, "semantic highlighting toggled");

        if enabled {
            s.rebuild();
            return;
        }

        s.cancel_work();
        s.region.borrow_mut().clear();
        s.needs_tag_sweep.set(true);
        match s.upgrade_document() {
            Some(doc_rc) => match doc_rc.try_borrow_mut() {
                Ok(mut doc) => {
                    let (text, tags) = doc.split_mut();
                    s.apply_pending(text, tags);
                }
                // The sweep runs on the next tick.
                Err(_) => s.request_tick(),
            },
            None => s.needs_tag_sweep.set(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.get()
    }

    pub fn is_paused(&self) -> bool {
        self.shared.paused.get()
    }

    /// Installs a highlighter by hand, overriding the registry, and rebuilds.
    ///
    /// Passing `None` returns to registry resolution by language.
    pub fn set_highlighter(&self, highlighter: Option<Box<dyn Highlighter>>) {
        let s = &self.shared;
        let explicit = highlighter.is_some();
        s.explicit_highlighter.set(explicit);
        *s.highlighter_language.borrow_mut() = None;
        s.install(highlighter);

        if !explicit {
            let language = s
                .upgrade_document()
                .and_then(|d| d.try_borrow().ok().and_then(|d| d.language().map(str::to_owned)));
            s.load_highlighter_for(language.as_deref());
        }
        s.rebuild();
    }

    pub fn has_highlighter(&self) -> bool {
        self.shared
            .highlighter
            .try_borrow()
            .map(|h| h.is_some())
            .unwrap_or(true)
    }

    /// Language the current highlighter was resolved for.
    pub fn highlighter_language(&self) -> Option<String> {
        self.shared.highlighter_language.borrow().clone()
    }

    // ==================== Inspection ====================

    /// Snapshot of the run region.
    pub fn region(&self) -> RunRegion {
        self.shared.region.borrow().clone()
    }

    /// Private tag used for `style`, if any text was ever given that style.
    pub fn private_tag(&self, style: &str) -> Option<TagId> {
        self.shared.tags.borrow().private_tag(style)
    }

    /// Every private tag the engine has created.
    pub fn private_tags(&self) -> Vec<TagId> {
        self.shared.tags.borrow().private_ids().collect()
    }

    /// Deadline of the tick in progress, or of the last one.
    pub fn deadline(&self) -> Option<Instant> {
        self.shared.deadline.get()
    }

    /// Per-tick budget from the configuration.
    pub fn quanta(&self) -> Duration {
        self.shared.quanta
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            shared: self.shared.this.clone(),
        }
    }
}

impl Drop for HighlightEngine {
    fn drop(&mut self) {
        self.shared.detach();
    }
}

impl EngineHandle {
    pub fn advance(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.queue_update();
        }
    }

    pub fn invalidate(&self, begin: usize, end: usize) {
        if let Some(shared) = self.shared.upgrade() {
            shared.invalidate(begin, end);
        }
    }

    /// False once the engine has been dropped.
    pub fn is_alive(&self) -> bool {
        self.shared.strong_count() > 0
    }
}

impl Shared {
    fn upgrade_document(&self) -> Option<SharedDocument> {
        self.document.borrow().upgrade()
    }

    fn detach(&self) {
        if !self.attached.get() {
            return;
        }
        self.cancel_work();

        let doc_rc = self.upgrade_document();
        if let Some(doc_rc) = doc_rc {
            match doc_rc.try_borrow_mut() {
                Ok(mut doc) => {
                    self.tags.borrow_mut().remove_all(doc.tags_mut());
                    if let Some(id) = self.observer.take() {
                        doc.remove_observer(id);
                    }
                }
                Err(_) => {
                    warn!(target: "sheen::engine", "detach: document is borrowed; tags left behind");
                }
            }
        }

        *self.tags.borrow_mut() = StyleTags::new();
        self.observer.set(None);
        *self.document.borrow_mut() = Weak::new();
        *self.highlighter.borrow_mut() = None;
        *self.highlighter_language.borrow_mut() = None;
        self.explicit_highlighter.set(false);
        self.region.borrow_mut().clear();
        self.paused.set(false);
        self.needs_style_resync.set(false);
        self.needs_rebuild.set(false);
        self.needs_tag_sweep.set(false);
        self.attached.set(false);
        debug!(target: "sheen::engine", "detached");
    }

    /// Resolves the highlighter for `language` through the registry.
    ///
    /// Returns true if the highlighter changed.
    fn load_highlighter_for(&self, language: Option<&str>) -> bool {
        if self.explicit_highlighter.get() {
            return false;
        }
        if self.highlighter_language.borrow().as_deref() == language {
            return false;
        }

        let highlighter = language.and_then(|lang| self.registry.create(lang));
        if let (Some(lang), None) = (language, highlighter.as_ref()) {
            debug!(target: "sheen::engine", language = lang, "no highlighter for language");
        }
        self.install(highlighter);
        *self.highlighter_language.borrow_mut() = language.map(str::to_owned);
        true
    }

    fn install(&self, mut highlighter: Option<Box<dyn Highlighter>>) {
        if let Some(h) = highlighter.as_mut() {
            h.load(EngineHandle {
                shared: self.this.clone(),
            });
        }
        *self.highlighter.borrow_mut() = highlighter;
    }

    /// Replaces the region with one unchecked run of `len` (empty when
    /// disabled).
    fn reseed(&self, len: usize) {
        let mut region = self.region.borrow_mut();
        region.clear();
        if self.enabled.get() {
            region.insert(0, len, RunState::Unchecked);
        }
    }

    fn rebuild(&self) {
        self.cancel_work();
        if !self.attached.get() {
            return;
        }
        let Some(doc_rc) = self.upgrade_document() else {
            return;
        };
        self.needs_rebuild.set(true);
        let Ok(mut doc) = doc_rc.try_borrow_mut() else {
            // The next tick or edit hook finishes the rebuild.
            debug!(target: "sheen::engine", "rebuild deferred: document is borrowed");
            self.request_tick();
            return;
        };

        let (text, tags) = doc.split_mut();
        self.apply_pending(text, tags);
        let len = doc.len();
        drop(doc);

        debug!(target: "sheen::engine", len, "rebuild");
        self.queue_update();
    }

    /// Finishes work put off while the document was borrowed.
    ///
    /// Returns true if anything was done.
    fn apply_pending(&self, text: &TextBuffer, tags: &mut TagTable) -> bool {
        let len = text.len();
        let mut done = false;
        if self.needs_rebuild.replace(false) {
            {
                let cache = self.tags.borrow();
                cache.remove_private_in(tags, 0, len);
                cache.remove_public_in(tags, 0, len);
            }
            self.reseed(len);
            self.needs_tag_sweep.set(false);
            done = true;
        }
        if self.needs_tag_sweep.replace(false) {
            self.sweep_unchecked(tags, len);
            done = true;
        }
        done
    }

    /// Removes private tags from everything outside CHECKED runs.
    fn sweep_unchecked(&self, tags: &mut TagTable, len: usize) {
        let region = self.region.borrow();
        let cache = self.tags.borrow();
        for span in region.runs().filter(|span| span.state != RunState::Checked) {
            cache.remove_private_in(tags, span.offset, span.end());
        }
        if region.len() < len {
            cache.remove_private_in(tags, region.len(), len);
        }
    }

    fn invalidate(&self, begin: usize, end: usize) {
        if !self.attached.get() || !self.enabled.get() {
            return;
        }
        let (begin, end) = {
            let mut region = self.region.borrow_mut();
            let len = region.len();
            let begin = begin.min(len);
            let end = end.clamp(begin, len);
            region.replace(begin, end - begin, RunState::Unchecked);
            (begin, end)
        };

        let doc_rc = self.upgrade_document();
        match doc_rc.as_ref().map(|d| d.try_borrow_mut()) {
            Some(Ok(mut doc)) => self.tags.borrow().remove_private_in(doc.tags_mut(), begin, end),
            // Inside a tick or a host borrow; sweep once the document is free.
            Some(Err(_)) => self.needs_tag_sweep.set(true),
            None => {}
        }
        self.queue_update();
    }

    /// Marks `[begin, end)` UNCHECKED and drops its private styling.
    fn mark_unchecked(&self, tags: &mut TagTable, begin: usize, end: usize) {
        self.region
            .borrow_mut()
            .replace(begin, end - begin, RunState::Unchecked);
        self.tags.borrow().remove_private_in(tags, begin, end);
    }

    /// Requests a tick if there is anything to highlight.
    fn queue_update(&self) {
        if !self.attached.get() || !self.enabled.get() {
            return;
        }
        // Borrowed means a tick is running, and it has a highlighter.
        let has_highlighter = self
            .highlighter
            .try_borrow()
            .map(|h| h.is_some())
            .unwrap_or(true);
        if !has_highlighter {
            return;
        }
        let has_work = self
            .region
            .try_borrow()
            .map(|r| r.next_unchecked(0).is_some())
            .unwrap_or(true);
        if has_work {
            self.request_tick();
        }
    }

    fn request_tick(&self) {
        if !self.attached.get() || self.paused.get() {
            return;
        }
        if let Some(handle) = self.work.get() {
            if self.scheduler.contains(handle) {
                return;
            }
        }

        let this = self.this.clone();
        let handle = self.scheduler.add(move |deadline| match this.upgrade() {
            Some(shared) => shared.tick(deadline),
            None => TaskControl::Stop,
        });
        self.work.set(Some(handle));
        trace!(target: "sheen::engine", "tick scheduled");
    }

    fn cancel_work(&self) {
        if let Some(handle) = self.work.take() {
            self.scheduler.remove(handle);
        }
    }

    fn tick(&self, deadline: Instant) -> TaskControl {
        let Some(doc_rc) = self.upgrade_document() else {
            self.cancel_work();
            return TaskControl::Stop;
        };
        let control = match doc_rc.try_borrow_mut() {
            Ok(mut doc) => {
                self.ticking.set(true);
                self.deadline.set(Some(deadline));
                let (text, tags) = doc.split_mut();
                self.apply_pending(text, tags);
                let mut control = self.tick_document(&mut doc, deadline);
                // Invalidations made by the highlighter during this tick.
                let (text, tags) = doc.split_mut();
                if self.apply_pending(text, tags) {
                    control = TaskControl::Continue;
                }
                self.ticking.set(false);
                control
            }
            // The host is mid-edit; try again on the next dispatch.
            Err(_) => TaskControl::Continue,
        };

        match control {
            TaskControl::Stop => self.cancel_work(),
            TaskControl::Continue => self.request_tick(),
        }
        control
    }

    fn tick_document(&self, doc: &mut Document, deadline: Instant) -> TaskControl {
        if self.paused.get() {
            return TaskControl::Stop;
        }

        let scheme = doc.style_scheme().cloned();
        if self.needs_style_resync.replace(false) {
            self.tags.borrow().resync(doc.tags_mut(), scheme.as_deref());
        }
        if !self.enabled.get() {
            return TaskControl::Stop;
        }

        let mut slot = self.highlighter.borrow_mut();
        let Some(highlighter) = slot.as_mut() else {
            // Nothing can refresh stale styling; drop it.
            let len = doc.len();
            self.tags.borrow().remove_private_in(doc.tags_mut(), 0, len);
            return TaskControl::Stop;
        };

        let (text, tags) = doc.split_mut();
        let mut cache = self.tags.borrow_mut();

        loop {
            let next = self.region.borrow().next_unchecked(0);
            let Some((begin, end)) = next else {
                trace!(target: "sheen::engine", "region fully checked");
                return TaskControl::Stop;
            };

            let mut start = begin;
            while start < end && matches!(text.char_at(start), Some('\n' | '\r')) {
                start += 1;
            }
            if start == end {
                self.region
                    .borrow_mut()
                    .replace(begin, end - begin, RunState::Checked);
                continue;
            }

            cache.remove_private_in(tags, start, end);
            let stopped = {
                let mut styles = StyleApplier::new(
                    &mut *tags,
                    &mut cache,
                    scheme.as_deref(),
                    text.len(),
                    deadline,
                );
                highlighter.update(text, &mut styles, start, end)
            }
            .clamp(start, end);

            self.region
                .borrow_mut()
                .replace(begin, stopped - begin, RunState::Checked);
            // Styling past the stop point stays off until it is checked.
            cache.remove_private_in(tags, stopped, end);
            trace!(target: "sheen::engine", begin = start, end, stopped, "highlighted");

            if stopped == start {
                warn!(
                    target: "sheen::engine",
                    begin = start,
                    end,
                    "highlighter made no progress; stopping"
                );
                return TaskControl::Stop;
            }

            if Instant::now() >= deadline {
                return TaskControl::Continue;
            }
        }
    }
}

impl DocumentObserver for Shared {
    fn before_insert(&self, _doc: &Document, offset: usize, len: usize) {
        if !self.attached.get() || !self.enabled.get() || self.needs_rebuild.get() {
            return;
        }
        let mut region = self.region.borrow_mut();
        let offset = offset.min(region.len());
        region.insert(offset, len, RunState::Unchecked);
    }

    fn after_insert(&self, text: &TextBuffer, tags: &mut TagTable, offset: usize, len: usize) {
        if !self.attached.get() {
            return;
        }
        if self.enabled.get() && !self.needs_rebuild.get() {
            let (begin, end) = invalidation_area(text, offset, offset + len);
            self.mark_unchecked(tags, begin, end);
        }
        self.apply_pending(text, tags);
        self.queue_update();
    }

    fn before_delete(&self, _doc: &Document, offset: usize, len: usize) {
        if !self.attached.get() || !self.enabled.get() || self.needs_rebuild.get() {
            return;
        }
        self.region.borrow_mut().remove(offset, len);
    }

    fn after_delete(&self, text: &TextBuffer, tags: &mut TagTable, offset: usize, _len: usize) {
        if !self.attached.get() {
            return;
        }
        if self.enabled.get() && !self.needs_rebuild.get() {
            let (begin, end) = invalidation_area(text, offset, offset);
            self.mark_unchecked(tags, begin, end);
        }
        self.apply_pending(text, tags);
        self.queue_update();
    }

    fn language_changed(&self, language: Option<&str>, text: &TextBuffer, tags: &mut TagTable) {
        if !self.attached.get() || self.paused.get() {
            return;
        }
        if self.load_highlighter_for(language) {
            debug!(target: "sheen::engine", language = ?language, "language changed");
            let len = text.len();
            self.reseed(len);
            self.tags.borrow().remove_private_in(tags, 0, len);
            self.request_tick();
        }
    }

    fn style_scheme_changed(&self, scheme: Option<&StyleScheme>, tags: &mut TagTable) {
        if !self.attached.get() {
            return;
        }
        self.tags.borrow().resync(tags, scheme);
    }
}
