//! Multi-selection over a fixed list of unit ids.

use crate::notify::{ListenerId, Notifier};

#[derive(Debug)]
pub struct UnitSelection {
    all_unit_ids: Vec<String>,
    selected: Vec<String>,
    notifier: Notifier<Vec<String>>,
}

impl UnitSelection {
    pub fn new(all_unit_ids: Vec<String>) -> Self {
        Self {
            selected: all_unit_ids.clone(),
            all_unit_ids,
            notifier: Notifier::new(),
        }
    }

    pub fn all_unit_ids(&self) -> &[String] {
        &self.all_unit_ids
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn subscribe(&self, listener: impl Fn(&Vec<String>) + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    /// Replace the selection. Unknown ids are dropped; the result follows the
    /// order of the full unit list and holds each id once.
    pub fn select<I, S>(&mut self, unit_ids: I) -> &[String]
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: Vec<S> = unit_ids.into_iter().collect();
        for id in &requested {
            if !self.all_unit_ids.iter().any(|u| u == id.as_ref()) {
                log::debug!("ignoring unknown unit id {:?}", id.as_ref());
            }
        }

        self.selected = self
            .all_unit_ids
            .iter()
            .filter(|u| requested.iter().any(|id| id.as_ref() == u.as_str()))
            .cloned()
            .collect();
        self.notifier.publish(&self.selected);
        &self.selected
    }

    pub fn select_all(&mut self) -> &[String] {
        self.selected = self.all_unit_ids.clone();
        self.notifier.publish(&self.selected);
        &self.selected
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.notifier.publish(&self.selected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> UnitSelection {
        UnitSelection::new(["u1", "u2", "u3", "u4"].map(String::from).to_vec())
    }

    #[test]
    fn test_everything_selected_initially() {
        assert_eq!(units().selected(), ["u1", "u2", "u3", "u4"]);
    }

    #[test]
    fn test_select_filters_orders_and_dedups() {
        let mut selection = units();
        let selected = selection.select(["u3", "nope", "u1", "u3"]);
        assert_eq!(selected, ["u1", "u3"]);
    }

    #[test]
    fn test_clear_and_select_all() {
        let mut selection = units();
        selection.clear();
        assert!(selection.selected().is_empty());
        assert_eq!(selection.select_all().len(), 4);
    }
}
