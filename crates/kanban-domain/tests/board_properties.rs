use chrono::NaiveDate;
use kanban_core::SequentialIdGenerator;
use kanban_domain::operations::*;
use kanban_domain::*;

/// Build a state from `(list_id, [card_id])` pairs; card titles equal ids.
fn board(lists: &[(&str, &[&str])]) -> BoardState {
    let mut state = BoardState::new();
    for (list_id, card_ids) in lists {
        let mut list = List::new(list_id.to_string(), list_id.to_string());
        for card_id in card_ids.iter() {
            list.card_ids.push(card_id.to_string());
            state.cards.insert(
                card_id.to_string(),
                Card::from_fields(card_id.to_string(), CardFields::titled(*card_id)).unwrap(),
            );
        }
        state.lists.insert(list_id.to_string(), list);
        state.list_order.push(list_id.to_string());
    }
    state.validate().unwrap();
    state
}

fn ids_of(state: &BoardState, list_id: &str) -> Vec<String> {
    state.lists[list_id].card_ids.clone()
}

#[test]
fn test_cross_list_move() {
    let state = board(&[("L1", &["c1", "c2", "c3"]), ("L2", &[])]);
    let moved = move_card(&state, "c2", "L2", 0).unwrap();
    assert_eq!(ids_of(&moved, "L1"), vec!["c1", "c3"]);
    assert_eq!(ids_of(&moved, "L2"), vec!["c2"]);
}

#[test]
fn test_move_card_is_idempotent() {
    let state = board(&[("L1", &["c1", "c2", "c3", "c4"]), ("L2", &["c5", "c6"])]);
    for (card, list, index) in [
        ("c1", "L1", 2),
        ("c4", "L1", 0),
        ("c2", "L2", 1),
        ("c6", "L1", 9),
        ("c3", "L2", 0),
    ] {
        let once = move_card(&state, card, list, index).unwrap();
        let twice = move_card(&once, card, list, index).unwrap();
        assert_eq!(once, twice, "moving {} to {}[{}] twice", card, list, index);
    }
}

#[test]
fn test_stable_due_date_sort() {
    let mut state = board(&[("L1", &["A", "B", "C", "D"])]);
    let due = NaiveDate::from_ymd_opt(2024, 1, 2);
    state.cards.get_mut("A").unwrap().due_date = due;
    state.cards.get_mut("C").unwrap().due_date = due;

    let sorted = sort_list_cards(&state, "L1", "dueDate").unwrap();
    assert_eq!(ids_of(&sorted, "L1"), vec!["A", "C", "B", "D"]);
}

#[test]
fn test_sort_by_title_and_assignee() {
    let mut state = board(&[("L1", &["delta", "alpha", "charlie", "bravo"])]);
    state.cards.get_mut("delta").unwrap().assignee = Some("Ann".to_string());
    state.cards.get_mut("bravo").unwrap().assignee = Some("Zed".to_string());

    let by_title = sort_list_cards(&state, "L1", "title").unwrap();
    assert_eq!(ids_of(&by_title, "L1"), vec!["alpha", "bravo", "charlie", "delta"]);

    let by_assignee = sort_list_cards(&state, "L1", "assignee").unwrap();
    assert_eq!(ids_of(&by_assignee, "L1"), vec!["alpha", "charlie", "delta", "bravo"]);
}

#[test]
fn test_delete_list_cascades() {
    let state = board(&[("L1", &["c1", "c2"]), ("L2", &["c3"])]);
    let deleted = delete_list(&state, "L1").unwrap();
    assert!(!deleted.cards.contains_key("c1"));
    assert!(!deleted.cards.contains_key("c2"));
    assert!(deleted.cards.contains_key("c3"));
    assert_eq!(deleted.list_order, vec!["L2"]);
    deleted.validate().unwrap();
}

#[test]
fn test_delete_list_while_dragging_its_card() {
    let state = board(&[("L1", &["c1"]), ("L2", &["c2"])]);
    let session = DragSession::start(&state, "c1").unwrap();
    let after_delete = delete_list(&state, "L1").unwrap();
    assert!(get_card(&after_delete, "c1").is_none());
    assert_eq!(session.cancel(), state);
}

#[test]
fn test_rename_to_same_title_with_whitespace() {
    let state = board(&[("L1", &[])]);
    let renamed = rename_list(&state, "L1", "   L1  ").unwrap();
    assert_eq!(renamed.lists["L1"].title, "L1");
    assert_eq!(renamed, state);
}

#[test]
fn test_errors_produce_no_state() {
    let state = board(&[("L1", &["c1"])]);
    let ids = SequentialIdGenerator::new();

    assert!(create_list(&state, &ids, " ").unwrap_err().is_validation());
    assert!(rename_list(&state, "L9", "x").unwrap_err().is_not_found());
    assert!(delete_list(&state, "L9").unwrap_err().is_not_found());
    assert!(sort_list_cards(&state, "L1", "size").unwrap_err().is_validation());
    assert!(create_card(&state, &ids, "L9", CardFields::titled("x")).unwrap_err().is_not_found());
    assert!(create_card(&state, &ids, "L1", CardFields::titled("")).unwrap_err().is_validation());
    assert!(delete_card(&state, "c9").unwrap_err().is_not_found());
    assert!(move_card(&state, "c1", "L9", 0).unwrap_err().is_not_found());
    assert!(move_list(&state, "L9", 0).unwrap_err().is_not_found());

    let mut blank = state.cards["c1"].clone();
    blank.title = "  ".to_string();
    assert!(update_card(&state, blank).unwrap_err().is_validation());
}

/// Small deterministic generator so the operation mix is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

fn pick<'a>(rng: &mut Lcg, items: &'a [String]) -> Option<&'a String> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.next(items.len())])
    }
}

#[test]
fn test_invariant_holds_over_random_operation_sequences() {
    for seed in 0..20u64 {
        let ids = SequentialIdGenerator::new();
        let mut rng = Lcg(seed);
        let mut state = BoardState::new();

        for step in 0..300 {
            let lists: Vec<String> = state.list_order.clone();
            let cards: Vec<String> = state.cards.keys().cloned().collect();

            let result = match rng.next(10) {
                0 => create_list(&state, &ids, &format!("List {}", step)),
                1 | 2 => match pick(&mut rng, &lists) {
                    Some(list) => create_card(
                        &state,
                        &ids,
                        list,
                        CardFields::titled(format!("Card {}", step)),
                    ),
                    None => create_list(&state, &ids, "Fresh"),
                },
                3 | 4 | 5 => match (pick(&mut rng, &cards), pick(&mut rng, &lists)) {
                    (Some(card), Some(list)) => {
                        let index = rng.next(8);
                        move_card(&state, card, list, index)
                    }
                    _ => continue,
                },
                6 => match pick(&mut rng, &cards) {
                    Some(card) => delete_card(&state, card),
                    None => continue,
                },
                7 => match pick(&mut rng, &lists) {
                    Some(list) if rng.next(4) == 0 => delete_list(&state, list),
                    Some(list) => {
                        let key = ["title", "dueDate", "assignee"][rng.next(3)];
                        sort_list_cards(&state, list, key)
                    }
                    None => continue,
                },
                8 => match pick(&mut rng, &lists) {
                    Some(list) => {
                        let index = rng.next(5);
                        move_list(&state, list, index)
                    }
                    None => continue,
                },
                _ => match (pick(&mut rng, &cards), pick(&mut rng, &lists)) {
                    (Some(card), Some(list)) => {
                        let mut session = DragSession::start(&state, card.clone()).unwrap();
                        session.hover(&DropTarget::List(list.clone())).unwrap();
                        if let Some(other) = pick(&mut rng, &cards) {
                            session.hover(&DropTarget::after(other.clone())).unwrap();
                        }
                        if rng.next(2) == 0 {
                            Ok(session.drop().state)
                        } else {
                            let restored = session.cancel();
                            assert_eq!(restored, state);
                            Ok(restored)
                        }
                    }
                    _ => continue,
                },
            };

            state = result.unwrap();
            state
                .validate()
                .unwrap_or_else(|e| panic!("seed {} step {}: {}", seed, step, e));
        }
    }
}
