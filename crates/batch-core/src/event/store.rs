use chrono::Utc;
use dashmap::DashMap;

use super::{JobEvent, JobEventKind};

/// Almacenamiento de eventos append-only, compartible entre hilos.
pub trait EventStore: Send + Sync {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&self, execution_id: u64, kind: JobEventKind) -> JobEvent;
    /// Lista eventos de una ejecución (orden ascendente por seq).
    fn list(&self, execution_id: u64) -> Vec<JobEvent>;
}

/// Store en memoria. Cada ejecución tiene su propio vector; el lock de
/// `DashMap` por entrada serializa los appends de una misma ejecución.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: DashMap<u64, Vec<JobEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execution_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.inner.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&self, execution_id: u64, kind: JobEventKind) -> JobEvent {
        let mut events = self.inner.entry(execution_id).or_default();
        let seq = events.len() as u64;
        let ev = JobEvent { seq,
                            execution_id,
                            kind,
                            ts: Utc::now() };
        events.push(ev.clone());
        ev
    }

    fn list(&self, execution_id: u64) -> Vec<JobEvent> {
        self.inner.get(&execution_id).map(|e| e.value().clone()).unwrap_or_default()
    }
}
