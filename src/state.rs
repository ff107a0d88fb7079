use crate::errors::ToggleError;
use crate::models::{CounterDisplay, LikeAction, Labels, PostId, PostView, ToggleControl};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct PostEntry {
    pub control: ToggleControl,
    pub counter: CounterDisplay,
    pub in_flight: bool,
}

/// Controls paired with their counters, keyed by post. Built once when the
/// page is bound and only mutated in place afterwards.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    entries: BTreeMap<PostId, PostEntry>,
    labels: Labels,
}

impl PageState {
    pub fn bind(
        controls: Vec<ToggleControl>,
        counters: Vec<CounterDisplay>,
        labels: Labels,
    ) -> Self {
        let mut by_post: BTreeMap<PostId, CounterDisplay> = BTreeMap::new();
        for counter in counters {
            by_post.entry(counter.post_id.clone()).or_insert(counter);
        }

        let mut entries = BTreeMap::new();
        for control in controls {
            let Some(counter) = by_post.get(&control.post_id).cloned() else {
                warn!(post_id = %control.post_id, "like button has no counter, not binding");
                continue;
            };
            match entries.entry(control.post_id.clone()) {
                Entry::Occupied(_) => {
                    warn!(post_id = %control.post_id, "duplicate like button, keeping the first");
                }
                Entry::Vacant(slot) => {
                    slot.insert(PostEntry {
                        control,
                        counter,
                        in_flight: false,
                    });
                }
            }
        }

        Self { entries, labels }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, post_id: &PostId) -> Option<&PostEntry> {
        self.entries.get(post_id)
    }

    pub fn get_mut(&mut self, post_id: &PostId) -> Result<&mut PostEntry, ToggleError> {
        self.entries
            .get_mut(post_id)
            .ok_or_else(|| ToggleError::UnknownPost(post_id.clone()))
    }

    /// Writes the outcome of a confirmed `action`. The count, the like flag
    /// and the label change together or not at all.
    pub fn apply_success(
        &mut self,
        post_id: &PostId,
        action: LikeAction,
    ) -> Result<PostView, ToggleError> {
        let labels = self.labels.clone();
        let entry = self.get_mut(post_id)?;

        let count: u64 = entry
            .counter
            .text
            .trim()
            .parse()
            .map_err(|_| ToggleError::InvalidCount {
                post_id: post_id.clone(),
                text: entry.counter.text.clone(),
            })?;
        let count = match action {
            LikeAction::Like => count.saturating_add(1),
            LikeAction::Unlike => count
                .checked_sub(1)
                .ok_or_else(|| ToggleError::CounterUnderflow(post_id.clone()))?,
        };

        let is_liked = action.resulting_state();
        entry.counter.text = count.to_string();
        entry.control.is_liked = is_liked;
        entry.control.label = labels.for_state(is_liked).to_string();

        Ok(view(entry))
    }

    pub fn snapshot(&self) -> Vec<PostView> {
        self.entries.values().map(view).collect()
    }
}

fn view(entry: &PostEntry) -> PostView {
    PostView {
        post_id: entry.control.post_id.clone(),
        is_liked: entry.control.is_liked,
        label: entry.control.label.clone(),
        count: entry.counter.text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(post_id: &str, is_liked: bool) -> ToggleControl {
        ToggleControl {
            post_id: post_id.into(),
            is_liked,
            label: Labels::default().for_state(is_liked).to_string(),
        }
    }

    fn counter(post_id: &str, text: &str) -> CounterDisplay {
        CounterDisplay {
            post_id: post_id.into(),
            text: text.into(),
        }
    }

    #[test]
    fn bind_pairs_controls_with_counters_by_post_id() {
        let state = PageState::bind(
            vec![control("1", false), control("2", true)],
            vec![counter("2", "8"), counter("1", "3")],
            Labels::default(),
        );

        assert_eq!(state.len(), 2);
        assert_eq!(state.get(&"1".into()).unwrap().counter.text, "3");
        assert_eq!(state.get(&"2".into()).unwrap().counter.text, "8");
    }

    #[test]
    fn control_without_counter_is_not_bound() {
        let mut state = PageState::bind(
            vec![control("1", false), control("2", false)],
            vec![counter("1", "0")],
            Labels::default(),
        );

        assert_eq!(state.len(), 1);
        assert!(state.get(&"2".into()).is_none());
        assert!(matches!(
            state.get_mut(&"2".into()),
            Err(ToggleError::UnknownPost(post_id)) if post_id.as_str() == "2"
        ));
    }

    #[test]
    fn like_and_unlike_move_count_by_one() {
        let mut state = PageState::bind(
            vec![control("1", false)],
            vec![counter("1", "3")],
            Labels::default(),
        );

        let liked = state.apply_success(&"1".into(), LikeAction::Like).unwrap();
        assert_eq!(liked.count, "4");
        assert!(liked.is_liked);
        assert_eq!(liked.label, "いいねを取り消す");

        let unliked = state.apply_success(&"1".into(), LikeAction::Unlike).unwrap();
        assert_eq!(unliked.count, "3");
        assert!(!unliked.is_liked);
        assert_eq!(unliked.label, "いいねする");
    }

    #[test]
    fn unparsable_counter_leaves_everything_unchanged() {
        let mut state = PageState::bind(
            vec![control("1", false)],
            vec![counter("1", "many")],
            Labels::default(),
        );
        let before = state.snapshot();

        let err = state.apply_success(&"1".into(), LikeAction::Like).unwrap_err();
        assert!(matches!(err, ToggleError::InvalidCount { .. }));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn unlike_at_zero_is_rejected() {
        let mut state = PageState::bind(
            vec![control("1", true)],
            vec![counter("1", "0")],
            Labels::default(),
        );

        let err = state.apply_success(&"1".into(), LikeAction::Unlike).unwrap_err();
        assert!(matches!(err, ToggleError::CounterUnderflow(_)));
        assert!(state.get(&"1".into()).unwrap().control.is_liked);
    }
}
