//! The in-memory triple store.
//!
//! The store is a *set* of triples with insertion-order iteration:
//! inserting a triple that is already present is a no-op, which is what
//! makes the delete-then-insert mutation contract idempotent. Pattern
//! queries are lazy; `update` performs its removal and inserts as one
//! step with no externally visible intermediate state.

use super::pattern::{Filter, FilterEntity, FilterTerm, Query, TriplePattern, UriPattern};
use super::term::{Term, Triple, Uri};
use indexmap::IndexSet;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Outcome of an `update`: how many triples the delete pattern removed and
/// how many inserts were actually new.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub removed: usize,
    pub inserted: usize,
}

/// A set of subject-predicate-object facts.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Insert a triple. Returns `true` if it was not already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Lazily yield every triple matching the pattern, in store order.
    pub fn matching(&self, pattern: TriplePattern) -> impl Iterator<Item = &Triple> {
        self.triples.iter().filter(move |t| pattern.matches(t))
    }

    /// Remove every triple matching the pattern; returns the count removed.
    /// Zero matches is not an error.
    pub fn remove_matching(&mut self, pattern: &TriplePattern) -> usize {
        let before = self.triples.len();
        self.triples.retain(|t| !pattern.matches(t));
        before - self.triples.len()
    }

    /// Delete-then-insert as one observable step. Callers that share the
    /// graph across threads go through [`SharedGraph::update`], which holds
    /// the write lock for the whole pair.
    pub fn update(
        &mut self,
        delete: &TriplePattern,
        inserts: impl IntoIterator<Item = Triple>,
    ) -> UpdateOutcome {
        let removed = self.remove_matching(delete);
        let mut inserted = 0;
        for triple in inserts {
            if self.insert(triple) {
                inserted += 1;
            }
        }
        UpdateOutcome { removed, inserted }
    }

    /// Evaluate a query: the base pattern restricted by its
    /// `exists`/`not-exists` filters.
    pub fn query<'g>(&'g self, query: &'g Query) -> impl Iterator<Item = &'g Triple> {
        self.matching(query.pattern.clone())
            .filter(move |candidate| {
                query
                    .filters
                    .iter()
                    .all(|f| self.eval_filter(f, &candidate.subject))
            })
    }

    fn eval_filter(&self, filter: &Filter, subject: &Uri) -> bool {
        let holds = match filter.pattern.entity {
            FilterEntity::Subject => self.entity_satisfies(subject, filter, subject),
            FilterEntity::Any => {
                // Enumerate candidate entities from the first constraint,
                // then require the rest to hold for the same entity.
                match filter.pattern.constraints.first() {
                    None => !self.triples.is_empty(),
                    Some(first) => {
                        let object = self.resolve_filter_term(&first.object, subject);
                        self.matching(TriplePattern::new(
                            UriPattern::Any,
                            first.predicate.clone(),
                            object,
                        ))
                        .any(|t| self.entity_satisfies(&t.subject, filter, subject))
                    }
                }
            }
        };
        holds == filter.must_exist
    }

    fn entity_satisfies(&self, entity: &Uri, filter: &Filter, subject: &Uri) -> bool {
        filter.pattern.constraints.iter().all(|c| {
            let object = self.resolve_filter_term(&c.object, subject);
            self.matching(TriplePattern::new(entity, c.predicate.clone(), object))
                .next()
                .is_some()
        })
    }

    fn resolve_filter_term(&self, term: &FilterTerm, subject: &Uri) -> Term {
        match term {
            FilterTerm::Is(t) => t.clone(),
            FilterTerm::Subject => Term::Uri(subject.clone()),
        }
    }

    /// Absorb every triple of another graph.
    pub fn merge(&mut self, other: Graph) {
        for triple in other.triples {
            self.triples.insert(triple);
        }
    }

    /// The object of the first `(subject, predicate, *)` triple, if any.
    pub fn object(&self, subject: &Uri, predicate: &Uri) -> Option<&Term> {
        self.matching(TriplePattern::new(
            subject,
            predicate,
            super::pattern::TermPattern::Any,
        ))
        .next()
        .map(|t| &t.object)
    }

    /// Subjects carrying an `rdf:type` edge to the given class, in store
    /// order.
    pub fn subjects_of_type<'g>(&'g self, class: &Uri) -> impl Iterator<Item = &'g Uri> {
        use crate::graph::ns::vocab;
        self.matching(TriplePattern::new(
            UriPattern::Any,
            vocab::TYPE.clone(),
            class,
        ))
        .map(|t| &t.subject)
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

/// A graph behind a reader-writer lock, shared across callers.
///
/// Readers never observe the window between an update's delete and its
/// insert: mutation holds the write lock for the whole pair.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<Graph>>,
}

impl SharedGraph {
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Graph> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Graph> {
        self.inner.write()
    }

    /// Atomic delete-then-insert under one write lock.
    pub fn update(
        &self,
        delete: &TriplePattern,
        inserts: impl IntoIterator<Item = Triple>,
    ) -> UpdateOutcome {
        self.inner.write().update(delete, inserts)
    }
}
