use super::*;

fn entry(seed: u64) -> HistoryEntry {
    HistoryEntry {
        timestamp: DateTime::<Utc>::default(),
        state: PromptState::new(seed, "seedream"),
        final_prompt: format!("prompt {}", seed),
        summary: format!("summary {}", seed),
    }
}

fn history_of(capacity: usize, seeds: &[u64]) -> History {
    let mut history = History::new(capacity);
    for &seed in seeds {
        history.push_entry(entry(seed));
    }
    history
}

fn current_seed(history: &History) -> Option<u64> {
    history.current().map(|e| e.state.seed)
}

#[test]
fn test_newest_first_and_capped() {
    let history = history_of(3, &[1, 2, 3, 4, 5]);
    let seeds: Vec<u64> = history.entries().iter().map(|e| e.state.seed).collect();
    assert_eq!(seeds, vec![5, 4, 3]);
    assert_eq!(history.position(), (0, 3));
    assert!(history.current().is_none());
}

#[test]
fn test_push_stamps_entry_and_resets_cursor() {
    let mut history = history_of(5, &[1, 2]);
    history.navigate_forward();
    assert_eq!(history.position(), (1, 2));

    history.push(PromptState::new(9, "veo"), "final", "preview");
    assert_eq!(history.position(), (0, 3));
    let newest = &history.entries()[0];
    assert_eq!(newest.final_prompt, "final");
    assert_eq!(newest.summary, "preview");
    assert!(newest.timestamp > DateTime::<Utc>::default());
}

#[test]
fn test_navigation() {
    let mut history = history_of(10, &[1, 2, 3]);
    assert!(!history.can_go_back());
    assert!(!history.navigate_back());

    assert!(history.navigate_forward());
    assert_eq!(current_seed(&history), Some(3));
    assert!(history.navigate_forward());
    assert!(history.navigate_forward());
    assert_eq!(current_seed(&history), Some(1));
    assert!(!history.can_go_forward());
    assert!(!history.navigate_forward());
    assert_eq!(history.position(), (3, 3));

    assert!(history.navigate_back());
    assert!(history.navigate_back());
    assert_eq!(current_seed(&history), Some(3));
    assert!(history.navigate_back());
    assert_eq!(history.position(), (0, 3));
    assert!(history.current().is_none());
}

#[test]
fn test_empty_history_has_nowhere_to_go() {
    let mut history = History::new(5);
    assert!(!history.can_go_forward());
    assert!(!history.navigate_forward());
    assert!(history.delete_current().is_none());
    assert_eq!(history.position(), (0, 0));
}

#[test]
fn test_jump_to() {
    let mut history = history_of(10, &[1, 2, 3]);
    assert!(history.jump_to(2));
    assert_eq!(current_seed(&history), Some(2));
    assert!(!history.jump_to(4));
    assert_eq!(current_seed(&history), Some(2));
    assert!(history.jump_to(0));
    assert!(history.current().is_none());
}

#[test]
fn test_delete_current() {
    let mut history = history_of(10, &[1, 2, 3]);
    assert!(history.delete_current().is_none());
    assert_eq!(history.len(), 3);

    history.jump_to(3);
    assert_eq!(history.delete_current().map(|e| e.state.seed), Some(1));
    assert_eq!(history.position(), (2, 2));
    assert_eq!(current_seed(&history), Some(2));

    history.jump_to(1);
    assert_eq!(history.delete_current().map(|e| e.state.seed), Some(3));
    assert_eq!(current_seed(&history), Some(2));
    assert_eq!(history.delete_current().map(|e| e.state.seed), Some(2));
    assert!(history.is_empty());
    assert_eq!(history.position(), (0, 0));
}

#[test]
fn test_clear_and_zero_capacity() {
    let mut history = history_of(0, &[1, 2]);
    assert_eq!(history.capacity(), 1);
    assert_eq!(history.len(), 1);
    history.navigate_forward();
    history.clear();
    assert!(history.is_empty());
    assert_eq!(history.position(), (0, 0));
}

#[test]
fn test_capacity_from_config() {
    let config = Config {
        history_size: 2,
        ..Config::default()
    };
    let mut history = History::from_config(&config);
    for seed in 0..4 {
        history.push_entry(entry(seed));
    }
    assert_eq!(history.len(), 2);
    assert_eq!(History::from_config(&Config::default()).capacity(), 100);
}
