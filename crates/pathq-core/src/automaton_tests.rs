use crate::Automaton;

fn word_automaton(word: &[&str]) -> Automaton<usize> {
    let mut automaton = Automaton::new();
    automaton.add_start(0);
    for (i, symbol) in word.iter().enumerate() {
        automaton.add_transition(i, *symbol, i + 1);
    }
    automaton.add_final(word.len());
    automaton
}

#[test]
fn accepts_follows_transitions() {
    let automaton = word_automaton(&["a", "b"]);

    assert!(automaton.accepts(&["a", "b"]));
    assert!(!automaton.accepts(&["a"]));
    assert!(!automaton.accepts(&["b", "a"]));
    assert!(!automaton.accepts(&["a", "b", "b"]));
}

#[test]
fn nondeterministic_choice() {
    let mut automaton = Automaton::new();
    automaton.add_start("s");
    automaton.add_transition("s", "a", "x");
    automaton.add_transition("s", "a", "y");
    automaton.add_transition("y", "b", "f");
    automaton.add_final("f");

    assert!(automaton.accepts(&["a", "b"]));
    assert_eq!(automaton.alphabet().len(), 2);
}

#[test]
fn reachable_states_skip_disconnected() {
    let mut automaton = word_automaton(&["a"]);
    automaton.add_transition(5, "z", 6);

    let reachable: Vec<usize> = automaton.reachable_states().into_iter().collect();
    assert_eq!(reachable, [0, 1]);
    assert_eq!(automaton.state_count(), 4);
}

#[test]
fn set_starts_replaces() {
    let mut automaton = word_automaton(&["a", "a"]);
    automaton.set_starts([1]);

    assert!(automaton.accepts(&["a"]));
    assert!(!automaton.accepts(&["a", "a"]));
}

#[test]
fn equality_ignores_insertion_order() {
    let mut left = Automaton::new();
    left.add_transition(0, "a", 1);
    left.add_transition(1, "b", 0);
    left.add_start(0);

    let mut right = Automaton::new();
    right.add_start(0);
    right.add_transition(1, "b", 0);
    right.add_transition(0, "a", 1);

    assert_eq!(left, right);
}

#[test]
fn concat_languages() {
    let left = word_automaton(&["a"]);
    let right = word_automaton(&["b", "c"]);
    let both = left.concat(&right);

    assert_eq!(both.state_count(), 5);
    assert!(both.accepts(&["a", "b", "c"]));
    assert!(!both.accepts(&["a"]));
    assert!(!both.accepts(&["b", "c"]));
}

#[test]
fn concat_with_nullable_sides() {
    // a* · b*
    let mut star_a = Automaton::new();
    star_a.add_start(0);
    star_a.add_final(0);
    star_a.add_transition(0, "a", 0);
    let mut star_b = Automaton::new();
    star_b.add_start("q");
    star_b.add_final("q");
    star_b.add_transition("q", "b", "q");

    let both = star_a.concat(&star_b);

    assert!(both.accepts::<&str>(&[]));
    assert!(both.accepts(&["a", "a"]));
    assert!(both.accepts(&["b"]));
    assert!(both.accepts(&["a", "b", "b"]));
    assert!(!both.accepts(&["b", "a"]));
}
