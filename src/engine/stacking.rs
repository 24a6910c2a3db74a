//! Stack grouping: partitions a deck into major-type columns for the
//! visual stack.

use serde::Serialize;

use crate::engine::classify::{classify, TypeBucket, MAJOR_TYPES};
use crate::engine::rules::Exclusions;
use crate::models::{normalize_name, CardRecord, DeckEntry};

// ---------------------------------------------------------------------------
// StackSlot / StackColumn / StackLayout
// ---------------------------------------------------------------------------

/// One visual slot: a card and how many copies it stands for.
#[derive(Debug, Clone, Serialize)]
pub struct StackSlot {
    pub card: CardRecord,
    pub count: u32,
}

/// A single major-type column.
#[derive(Debug, Clone, Serialize)]
pub struct StackColumn {
    pub bucket: TypeBucket,
    pub slots: Vec<StackSlot>,
}

impl StackColumn {
    /// Card units in this column (sum of slot counts), for the column
    /// header.
    pub fn unit_count(&self) -> u32 {
        self.slots.iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// The full layout: all seven columns, rendered empty or not.
///
/// `columns` holds one column per bucket in [`MAJOR_TYPES`] order.
#[derive(Debug, Clone, Serialize)]
pub struct StackLayout {
    columns: Vec<StackColumn>,
}

impl StackLayout {
    /// All columns in display order.
    pub fn columns(&self) -> &[StackColumn] {
        &self.columns
    }

    /// The column for one bucket.
    pub fn column(&self, bucket: TypeBucket) -> &StackColumn {
        &self.columns[bucket as usize]
    }

    /// Units placed in any column. Excluded and unclassified cards are
    /// not counted.
    pub fn classified_units(&self) -> u32 {
        self.columns.iter().map(StackColumn::unit_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(StackColumn::is_empty)
    }
}

// ---------------------------------------------------------------------------
// group_for_display
// ---------------------------------------------------------------------------

/// Group deck entries into the visual stack layout.
///
/// Excluded identities are dropped first (commander handling), then each
/// entry is classified; entries with no bucket fall out of the layout but
/// stay in the deck and its statistics. Within a column there is one slot
/// per identity carrying its count, in insertion order of first
/// occurrence. When `selected` names a card in a column, its slot moves
/// to the end of that column so it renders on top; everything else keeps
/// insertion order.
///
/// The layout is derived state: recompute it whenever the deck, the
/// exclusions, or the selection changes.
pub fn group_for_display(
    entries: &[DeckEntry],
    exclusions: &Exclusions,
    selected: Option<&str>,
) -> StackLayout {
    let mut columns: Vec<StackColumn> = MAJOR_TYPES
        .into_iter()
        .map(|bucket| StackColumn {
            bucket,
            slots: Vec::new(),
        })
        .collect();

    for entry in entries {
        if exclusions.contains(&entry.card.name) {
            continue;
        }
        let Some(bucket) = classify(&entry.card) else {
            continue;
        };
        let column = &mut columns[bucket as usize];
        let key = entry.card.normalized_name();
        match column
            .slots
            .iter_mut()
            .find(|slot| slot.card.normalized_name() == key)
        {
            Some(slot) => slot.count += entry.count,
            None => column.slots.push(StackSlot {
                card: entry.card.clone(),
                count: entry.count,
            }),
        }
    }

    if let Some(selected) = selected {
        let key = normalize_name(selected);
        for column in &mut columns {
            if let Some(pos) = column
                .slots
                .iter()
                .position(|slot| slot.card.normalized_name() == key)
            {
                let slot = column.slots.remove(pos);
                column.slots.push(slot);
            }
        }
    }

    StackLayout { columns }
}
