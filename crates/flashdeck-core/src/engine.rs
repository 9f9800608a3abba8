//! Study-state engine.
//!
//! [`StudyState`] is the single aggregate holding the shuffled catalog,
//! progress, group registry, unknown-only flag and cursor. Its `apply`
//! method is a state transition that reports which durable values changed;
//! [`StudySession`] owns a state plus a [`KeyValueStore`] and writes those
//! values back after every command.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::StudyError;
use crate::model::{LearningStatus, Mark, Progress, VocabularyEntry};
use crate::parser::parse_catalog;
use crate::registry::{GroupOption, GroupRegistry};
use crate::store::{load_progress, load_registry, save_discovered, save_progress, save_selected};
use crate::traits::{CatalogSource, KeyValueStore};
use crate::view::{current_view, Summary, ViewFilter};

/// Front text shown when the filtered view is empty.
pub const EMPTY_FRONT: &str = "Keine Vokabeln";
/// Back text shown when the filtered view is empty.
pub const EMPTY_BACK: &str = "im Filter!";

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A user action forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Advance(Direction),
    Flip,
    Mark(Mark),
    ToggleUnknownOnly,
    ToggleGroup(String),
}

/// Durable values touched by a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub progress: bool,
    pub discovered_groups: bool,
    pub selected_groups: bool,
}

impl Changes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !(self.progress || self.discovered_groups || self.selected_groups)
    }
}

/// The card a presentation layer should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CardView {
    /// Nothing passes the current filters.
    Empty,
    Card {
        front: String,
        back: String,
        /// `known`, `unknown` or `none`.
        highlight: String,
        flipped: bool,
        /// Zero-based position in the filtered view.
        position: usize,
        /// Length of the filtered view.
        of: usize,
    },
}

impl CardView {
    /// Front and back text, using the empty-state marker when there is no card.
    pub fn faces(&self) -> (&str, &str) {
        match self {
            CardView::Empty => (EMPTY_FRONT, EMPTY_BACK),
            CardView::Card { front, back, .. } => (front.as_str(), back.as_str()),
        }
    }
}

/// Everything a presentation layer needs to render after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub card: CardView,
    pub summary: Summary,
    pub groups: Vec<GroupOption>,
    pub unknown_only: bool,
}

// ---------------------------------------------------------------------------
// State aggregate
// ---------------------------------------------------------------------------

/// The complete study state.
#[derive(Debug, Clone)]
pub struct StudyState {
    catalog: Vec<VocabularyEntry>,
    progress: Progress,
    groups: GroupRegistry,
    unknown_only: bool,
    cursor: usize,
    flipped: bool,
}

impl StudyState {
    /// Build a state from a freshly parsed catalog and stored progress/groups.
    ///
    /// The catalog is shuffled with `rng` and its groups are discovered.
    pub fn new<R: Rng + ?Sized>(
        mut catalog: Vec<VocabularyEntry>,
        progress: Progress,
        groups: GroupRegistry,
        rng: &mut R,
    ) -> (Self, Changes) {
        catalog.shuffle(rng);
        let mut state = Self {
            catalog,
            progress,
            groups,
            unknown_only: false,
            cursor: 0,
            flipped: false,
        };
        let changes = state.discover();
        (state, changes)
    }

    /// Replace the catalog, re-shuffling it and discovering new groups.
    pub fn reload<R: Rng + ?Sized>(
        &mut self,
        mut catalog: Vec<VocabularyEntry>,
        rng: &mut R,
    ) -> Changes {
        catalog.shuffle(rng);
        self.catalog = catalog;
        self.cursor = 0;
        self.flipped = false;
        self.discover()
    }

    fn discover(&mut self) -> Changes {
        let added = self.groups.discover_catalog(&self.catalog);
        if added.is_empty() {
            return Changes::none();
        }
        tracing::info!("discovered {} new group(s): {}", added.len(), added.join(", "));
        Changes {
            progress: false,
            discovered_groups: true,
            selected_groups: true,
        }
    }

    /// Catalog in session order.
    pub fn catalog(&self) -> &[VocabularyEntry] {
        &self.catalog
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    pub fn unknown_only(&self) -> bool {
        self.unknown_only
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    fn filter(&self) -> ViewFilter<'_> {
        ViewFilter {
            selected_groups: Some(self.groups.selected()),
            unknown_only: self.unknown_only,
        }
    }

    /// The filtered view, recomputed from scratch.
    pub fn view(&self) -> Vec<&VocabularyEntry> {
        current_view(&self.catalog, self.filter(), &self.progress)
    }

    fn view_len(&self) -> usize {
        self.catalog
            .iter()
            .filter(|e| self.filter().admits(e, &self.progress))
            .count()
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.view(), &self.progress)
    }

    /// The entry under the cursor, or `None` when the view is empty.
    pub fn current(&self) -> Option<&VocabularyEntry> {
        let view = self.view();
        view.get(self.cursor).or_else(|| view.first()).copied()
    }

    pub fn card(&self) -> CardView {
        let view = self.view();
        if view.is_empty() {
            return CardView::Empty;
        }
        let position = if self.cursor < view.len() { self.cursor } else { 0 };
        let entry = view[position];
        CardView::Card {
            front: entry.front.clone(),
            back: entry.back.clone(),
            highlight: self.progress.status(&entry.front).to_string(),
            flipped: self.flipped,
            position,
            of: view.len(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            card: self.card(),
            summary: self.summary(),
            groups: self.groups.options(),
            unknown_only: self.unknown_only,
        }
    }

    /// Bring the cursor back inside a non-empty view.
    fn settle(&mut self) {
        let len = self.view_len();
        if len > 0 && self.cursor >= len {
            self.cursor = 0;
        }
    }

    /// Apply a command, returning the durable values that must be written.
    pub fn apply(&mut self, command: Command) -> Result<Changes, StudyError> {
        match command {
            Command::Advance(direction) => Ok(self.advance(direction)),
            Command::Flip => Ok(self.flip()),
            Command::Mark(mark) => Ok(self.mark(mark)),
            Command::ToggleUnknownOnly => Ok(self.toggle_unknown_only()),
            Command::ToggleGroup(name) => self.toggle_group(&name),
        }
    }

    fn advance(&mut self, direction: Direction) -> Changes {
        let len = self.view_len();
        if len == 0 {
            return Changes::none();
        }
        self.cursor = match direction {
            Direction::Forward if self.cursor + 1 >= len => 0,
            Direction::Forward => self.cursor + 1,
            Direction::Backward if self.cursor == 0 || self.cursor > len => len - 1,
            Direction::Backward => self.cursor - 1,
        };
        self.flipped = false;
        Changes::none()
    }

    fn flip(&mut self) -> Changes {
        if self.view_len() > 0 {
            self.flipped = !self.flipped;
        }
        Changes::none()
    }

    fn mark(&mut self, mark: Mark) -> Changes {
        let Some(front) = self.current().map(|e| e.front.clone()) else {
            return Changes::none();
        };
        let previous = self.progress.mark(front.as_str(), mark);
        tracing::debug!("marked '{front}' as {mark:?} (was {previous})");

        self.flipped = false;
        self.settle();
        Changes {
            progress: true,
            ..Changes::none()
        }
    }

    fn toggle_unknown_only(&mut self) -> Changes {
        self.unknown_only = !self.unknown_only;
        self.cursor = 0;
        self.flipped = false;
        Changes::none()
    }

    fn toggle_group(&mut self, name: &str) -> Result<Changes, StudyError> {
        let selected = self.groups.toggle(name)?;
        tracing::debug!("group '{name}' selected: {selected}");
        self.cursor = 0;
        self.flipped = false;
        Ok(Changes {
            selected_groups: true,
            ..Changes::none()
        })
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// A study session: the state aggregate plus the store it persists to.
pub struct StudySession<S: KeyValueStore> {
    state: StudyState,
    store: S,
    rng: StdRng,
}

impl<S: KeyValueStore> StudySession<S> {
    /// Start a session from an already parsed catalog.
    ///
    /// Progress and groups are read from `store`; newly discovered groups are
    /// written back immediately. `seed` makes the shuffle reproducible.
    pub fn new(
        catalog: Vec<VocabularyEntry>,
        store: S,
        seed: Option<u64>,
    ) -> Result<Self, StudyError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let progress = load_progress(&store);
        let groups = load_registry(&store);
        let (state, changes) = StudyState::new(catalog, progress, groups, &mut rng);

        let mut session = Self { state, store, rng };
        session.persist(changes)?;
        tracing::info!(
            "study session ready: {} entries, {} group(s), {} marked",
            session.state.catalog.len(),
            session.state.groups.discovered().len(),
            session.state.progress.len()
        );
        Ok(session)
    }

    /// Fetch and parse a catalog, then start a session.
    ///
    /// A fetch failure is fatal: it is logged and returned, and no session
    /// is created.
    pub async fn load(
        source: &dyn CatalogSource,
        store: S,
        seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        let text = match source.fetch().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("failed to load catalog from {}: {e:#}", source.describe());
                return Err(e);
            }
        };
        let catalog = parse_catalog(&text);
        tracing::info!("loaded {} entries from {}", catalog.len(), source.describe());
        Ok(Self::new(catalog, store, seed)?)
    }

    /// Replace the catalog with a freshly fetched one.
    pub async fn reload(&mut self, source: &dyn CatalogSource) -> anyhow::Result<Snapshot> {
        let text = source.fetch().await.map_err(|e| {
            tracing::error!("failed to reload catalog from {}: {e:#}", source.describe());
            e
        })?;
        Ok(self.reload_catalog(parse_catalog(&text))?)
    }

    /// Replace the catalog with an already parsed one.
    pub fn reload_catalog(&mut self, catalog: Vec<VocabularyEntry>) -> Result<Snapshot, StudyError> {
        let changes = self.state.reload(catalog, &mut self.rng);
        self.persist(changes)?;
        Ok(self.state.snapshot())
    }

    /// Apply a command and persist whatever it changed.
    pub fn execute(&mut self, command: Command) -> Result<Snapshot, StudyError> {
        let changes = self.state.apply(command)?;
        self.persist(changes)?;
        Ok(self.state.snapshot())
    }

    fn persist(&mut self, changes: Changes) -> Result<(), StudyError> {
        if changes.is_empty() {
            return Ok(());
        }
        tracing::debug!("persisting {changes:?}");
        if changes.progress {
            save_progress(&mut self.store, &self.state.progress)?;
        }
        if changes.discovered_groups {
            save_discovered(&mut self.store, &self.state.groups)?;
        }
        if changes.selected_groups {
            save_selected(&mut self.store, &self.state.groups)?;
        }
        Ok(())
    }

    pub fn advance(&mut self, direction: Direction) -> Result<Snapshot, StudyError> {
        self.execute(Command::Advance(direction))
    }

    pub fn flip(&mut self) -> Result<Snapshot, StudyError> {
        self.execute(Command::Flip)
    }

    pub fn mark_known(&mut self) -> Result<Snapshot, StudyError> {
        self.execute(Command::Mark(Mark::Known))
    }

    pub fn mark_unknown(&mut self) -> Result<Snapshot, StudyError> {
        self.execute(Command::Mark(Mark::Unknown))
    }

    pub fn toggle_unknown_only(&mut self) -> Result<Snapshot, StudyError> {
        self.execute(Command::ToggleUnknownOnly)
    }

    pub fn toggle_group(&mut self, name: &str) -> Result<Snapshot, StudyError> {
        self.execute(Command::ToggleGroup(name.to_string()))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &StudyState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn status_of(&self, front: &str) -> LearningStatus {
        self.state.progress.status(front)
    }
}
