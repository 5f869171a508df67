use gallery_runtime::ViewSnapshot;

use super::card::CardView;

/// Pinned items, in ascending ID order regardless of the active sort.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComparisonTray {
    pub cards: Vec<CardView>,
}

impl ComparisonTray {
    pub fn from_snapshot(snapshot: &ViewSnapshot) -> Self {
        let cards = snapshot
            .comparison
            .iter()
            .filter_map(|id| snapshot.catalog.item(id))
            .map(|item| CardView::build(&snapshot.catalog, item, snapshot.sort, true))
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_model::fixtures;
    use gallery_core::SortOrder;

    #[test]
    fn tray_cards_are_removable_and_ordered_by_id() {
        let tray = ComparisonTray::from_snapshot(&fixtures::snapshot(&[], SortOrder::Rarity));
        let ids: Vec<_> = tray.cards.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, ["2", "4"]);
        assert!(tray.cards.iter().all(|card| card.removable));
    }
}
