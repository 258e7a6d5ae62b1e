//! Identity-based reconciliation of document lists.
//!
//! Clients routinely echo back document lists they fetched earlier. Review
//! fields on those documents are owned by the server, so a re-submitted
//! document keeps its stored form unless the caller may overwrite protected
//! fields.

use casekit_model::Document;
use casekit_types::DocumentId;
use std::collections::HashMap;
use tracing::debug;

/// Merges an incoming document list with the currently stored one.
///
/// - Documents whose id is already stored keep the stored version, unless
///   `authorized` is set.
/// - New ids, and every document when `authorized` is set, take the incoming
///   version.
/// - Stored documents missing from `incoming` are dropped.
/// - The result follows the order of `incoming`.
pub fn mesh_documents(
    current: &[Document],
    incoming: Vec<Document>,
    authorized: bool,
) -> Vec<Document> {
    let stored: HashMap<DocumentId, &Document> =
        current.iter().map(|d| (d.document_id, d)).collect();

    incoming
        .into_iter()
        .map(|candidate| match stored.get(&candidate.document_id) {
            Some(existing) if !authorized => {
                if **existing != candidate {
                    debug!(
                        document_id = %candidate.document_id,
                        "Keeping stored document, caller may not overwrite protected fields"
                    );
                }
                (*existing).clone()
            }
            _ => candidate,
        })
        .collect()
}
