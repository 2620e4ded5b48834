//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;
use crate::payment::PaymentReferenceSource;

/// Shared application state.
///
/// Contains the database and the payment reference source. Handlers share
/// nothing else.
///
/// Generic over `D: Database` and `R: PaymentReferenceSource` so tests can
/// inject an in-memory database and a mocked reference source.
pub struct AppState<D: Database, R: PaymentReferenceSource + Send + Sync> {
    db: Arc<D>,
    references: Arc<R>,
}

// Manual Clone impl - only the Arcs are cloned, D and R need not be Clone
impl<D: Database, R: PaymentReferenceSource + Send + Sync> Clone for AppState<D, R> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            references: Arc::clone(&self.references),
        }
    }
}

impl<D: Database, R: PaymentReferenceSource + Send + Sync> AppState<D, R> {
    /// Create a new AppState with the given database and reference source.
    pub fn new(db: D, references: R) -> Self {
        Self {
            db: Arc::new(db),
            references: Arc::new(references),
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get a reference to the payment reference source.
    pub fn references(&self) -> &R {
        &self.references
    }
}
