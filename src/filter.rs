use crate::catalog::Visibility;
use crate::facet::FacetIndex;

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// One selectable facet value, the typed unit fed to [`FilterState::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetChoice {
    Visibility(Visibility),
    Fork(bool),
    Archived(bool),
    /// Runtime prefix, matched against the normalized runtime kind so that
    /// `node` covers `node20` and `node16` alike.
    Runtime(String),
}

/// Search term plus at most one active value per facet.
///
/// A plain value type, cheap to clone and rebuild, so callers can derive
/// one per request instead of sharing a mutable session. Defaults to no
/// constraints at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    visibility: Option<Visibility>,
    fork: Option<bool>,
    archived: Option<bool>,
    runtime: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search term. The raw term is kept as typed; matching
    /// trims and lower-cases at query time.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }

    pub fn fork(&self) -> Option<bool> {
        self.fork
    }

    pub fn archived(&self) -> Option<bool> {
        self.archived
    }

    pub fn runtime(&self) -> Option<&str> {
        self.runtime.as_deref()
    }

    /// Toggle a facet selection: re-selecting the active value clears that
    /// facet, anything else replaces its current selection. Other facets
    /// and the search term are untouched.
    pub fn toggle(&mut self, choice: FacetChoice) {
        match choice {
            FacetChoice::Visibility(v) => toggle_slot(&mut self.visibility, v),
            FacetChoice::Fork(f) => toggle_slot(&mut self.fork, f),
            FacetChoice::Archived(a) => toggle_slot(&mut self.archived, a),
            FacetChoice::Runtime(r) => toggle_slot(&mut self.runtime, r),
        }
    }

    /// A copy with `choice` toggled: the state a facet link navigates to.
    pub fn toggled(&self, choice: FacetChoice) -> Self {
        let mut next = self.clone();
        next.toggle(choice);
        next
    }

    /// Whether `choice` is the active selection for its facet.
    pub fn is_active(&self, choice: &FacetChoice) -> bool {
        match choice {
            FacetChoice::Visibility(v) => self.visibility == Some(*v),
            FacetChoice::Fork(f) => self.fork == Some(*f),
            FacetChoice::Archived(a) => self.archived == Some(*a),
            FacetChoice::Runtime(r) => self.runtime.as_deref() == Some(r.as_str()),
        }
    }

    /// Drop every constraint, the search term included.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// True when no constraint is active.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn toggle_slot<T: PartialEq>(slot: &mut Option<T>, value: T) {
    if slot.as_ref() == Some(&value) {
        *slot = None;
    } else {
        *slot = Some(value);
    }
}

// ---------------------------------------------------------------------------
// Visibility query
// ---------------------------------------------------------------------------

/// Pure visibility test: the search term must match AND every active facet
/// constraint must hold. Recomputation from `(entry, state)` is total, so
/// callers re-evaluate the whole collection on any state change instead of
/// patching a previous result.
pub fn is_visible(entry: &FacetIndex, state: &FilterState) -> bool {
    search_matches(entry, state.search_term())
        && state.visibility.is_none_or(|v| entry.visibility == v)
        && state.fork.is_none_or(|f| entry.is_fork == f)
        && state.archived.is_none_or(|a| entry.is_archived == a)
        && state
            .runtime
            .as_deref()
            .is_none_or(|r| entry.runtime.starts_with(r))
}

/// Number of entries visible under `state`.
pub fn visible_count(indexes: &[FacetIndex], state: &FilterState) -> usize {
    indexes
        .iter()
        .filter(|entry| is_visible(entry, state))
        .count()
}

/// Case-insensitive substring match against any of the four indexed text
/// fields. A term that trims to nothing matches everything.
fn search_matches(entry: &FacetIndex, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    entry.name.contains(&needle)
        || entry.repo.contains(&needle)
        || entry.author.contains(&needle)
        || entry.description.contains(&needle)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
