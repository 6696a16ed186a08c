//! Count/mass classification of item nouns.
//!
//! Inventory summaries render "3 houses" but "2.5 money": whole-unit
//! items take an integer and an English plural, bulk quantities print as
//! plain decimals. Which treatment an item gets is a property of its
//! name, decided once per tracker at construction by asking the oracle
//! about every tracked kind concurrently.

use std::collections::BTreeMap;

use agora_types::ItemKind;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::oracle::Oracle;

// ---------------------------------------------------------------------------
// NounClass
// ---------------------------------------------------------------------------

/// Whether an item noun is counted in whole units or measured in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NounClass {
    /// Counted in whole units; rendered as an integer with a plural.
    Count,
    /// Measured in bulk; rendered as a plain decimal.
    Mass,
}

impl NounClass {
    /// `true` for [`NounClass::Count`].
    #[must_use]
    pub const fn is_count(self) -> bool {
        matches!(self, Self::Count)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classifies every given kind, querying the oracle concurrently.
///
/// The queries are independent of each other and of any transcript, so
/// they all go out at once.
///
/// # Errors
///
/// Returns the first [`OracleError`] any classification query hits.
pub async fn classify_all(
    oracle: &Oracle,
    kinds: &[ItemKind],
) -> Result<BTreeMap<ItemKind, NounClass>, OracleError> {
    stream::iter(kinds.iter().copied().map(|kind| async move {
        let class = oracle.classify_noun(kind).await?;
        Ok::<_, OracleError>((kind, class))
    }))
    .buffer_unordered(kinds.len().max(1))
    .try_collect()
    .await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
