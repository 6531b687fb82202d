use pyramid_core::{
    canonical_key, card_label, deduplicate_solutions, evaluate_hand, find_all_equations,
    permutation_count, solutions_for_target, total_solutions, Card, Difficulty, EquationError,
    EventBus, GameConfiguration, GameSession, Operator, SubmitOutcome,
};
use std::collections::HashSet;

fn cards(specs: &[(i64, &str)]) -> Vec<Card> {
    specs
        .iter()
        .enumerate()
        .map(|(idx, (number, op))| {
            let op = Operator::from_symbol(op).expect("operator symbol");
            Card::new(card_label(idx), op, *number, idx)
        })
        .collect()
}

fn key(specs: [(i64, &str); 3]) -> String {
    let pool = cards(&specs);
    canonical_key([&pool[0], &pool[1], &pool[2]]).expect("key")
}

fn evaluate(specs: [(i64, &str); 3]) -> (String, f64) {
    let pool = cards(&specs);
    let equation = evaluate_hand([&pool[0], &pool[1], &pool[2]]).expect("evaluate");
    (equation.text, equation.result)
}

macro_rules! eval_case {
    ($name:ident, $hand:expr, $text:expr, $result:expr) => {
        #[test]
        fn $name() {
            assert_eq!(evaluate($hand), ($text.to_string(), $result));
        }
    };
}

eval_case!(
    eval_low_then_high,
    [(7, "+"), (10, "-"), (2, "×")],
    "7 - 10 × 2",
    -13.0
);
eval_case!(
    eval_swapped_lead_changes_operators,
    [(10, "-"), (7, "+"), (2, "×")],
    "10 + 7 × 2",
    24.0
);
eval_case!(
    eval_first_operator_ignored,
    [(5, "÷"), (2, "+"), (3, "×")],
    "5 + 2 × 3",
    11.0
);
eval_case!(
    eval_high_then_low,
    [(6, "+"), (9, "×"), (7, "-")],
    "6 × 9 - 7",
    47.0
);
eval_case!(
    eval_both_low_left_to_right,
    [(8, "+"), (3, "-"), (1, "+")],
    "8 - 3 + 1",
    6.0
);
eval_case!(
    eval_both_high_left_to_right,
    [(12, "+"), (3, "÷"), (2, "×")],
    "12 ÷ 3 × 2",
    8.0
);
eval_case!(
    eval_fractional_result,
    [(3, "+"), (12, "÷"), (1, "+")],
    "3 ÷ 12 + 1",
    1.25
);

macro_rules! same_key_case {
    ($name:ident, $left:expr, $right:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let left = key($left);
            assert_eq!(left, key($right));
            assert_eq!(left, $expected);
        }
    };
}

same_key_case!(
    same_product_reordered,
    [(6, "+"), (9, "×"), (1, "×")],
    [(9, "+"), (6, "×"), (1, "×")],
    "54:(1 * 6 * 9)"
);
same_key_case!(
    same_sum_reordered,
    [(3, "+"), (7, "+"), (2, "+")],
    [(7, "+"), (3, "+"), (2, "+")],
    "12:2+3+7"
);
same_key_case!(
    same_product_minus_term,
    [(6, "+"), (9, "×"), (7, "-")],
    [(9, "+"), (6, "×"), (7, "-")],
    "47:((6 * 9) - 7)"
);
same_key_case!(
    same_small_product_minus_term,
    [(3, "+"), (4, "×"), (2, "-")],
    [(4, "+"), (3, "×"), (2, "-")],
    "10:((3 * 4) - 2)"
);
same_key_case!(
    same_product_plus_term,
    [(2, "+"), (3, "×"), (5, "+")],
    [(3, "+"), (2, "×"), (5, "+")],
    "11:((2 * 3) + 5)"
);
same_key_case!(
    same_term_plus_product,
    [(5, "+"), (2, "+"), (3, "×")],
    [(5, "+"), (3, "+"), (2, "×")],
    "11:((2 * 3) + 5)"
);
same_key_case!(
    same_term_minus_product,
    [(10, "+"), (2, "-"), (3, "×")],
    [(10, "+"), (3, "-"), (2, "×")],
    "4:(10 - (2 * 3))"
);
same_key_case!(
    same_signed_terms,
    [(5, "+"), (4, "+"), (8, "-")],
    [(5, "+"), (8, "-"), (4, "+")],
    "1:4+5-8"
);
same_key_case!(
    same_signed_terms_leading_ten,
    [(10, "+"), (3, "+"), (7, "-")],
    [(10, "+"), (7, "-"), (3, "+")],
    "6:3+10-7"
);
same_key_case!(
    same_product_then_quotient,
    [(6, "+"), (9, "×"), (3, "÷")],
    [(9, "+"), (6, "×"), (3, "÷")],
    "18:((6 * 9) / 3)"
);

macro_rules! distinct_key_case {
    ($name:ident, $left:expr, $right:expr) => {
        #[test]
        fn $name() {
            assert_ne!(key($left), key($right));
        }
    };
}

distinct_key_case!(
    distinct_precedence,
    [(6, "+"), (9, "×"), (7, "-")],
    [(6, "+"), (9, "-"), (7, "×")]
);
distinct_key_case!(
    distinct_subtraction_order,
    [(8, "+"), (3, "-"), (1, "+")],
    [(3, "+"), (8, "-"), (1, "+")]
);
distinct_key_case!(
    distinct_division_order,
    [(12, "+"), (3, "÷"), (1, "+")],
    [(3, "+"), (12, "÷"), (1, "+")]
);
distinct_key_case!(
    distinct_division_chain_order,
    [(8, "+"), (4, "÷"), (2, "÷")],
    [(8, "+"), (2, "÷"), (4, "÷")]
);
distinct_key_case!(
    distinct_quotient_placement,
    [(12, "+"), (3, "÷"), (1, "+")],
    [(1, "+"), (12, "+"), (3, "÷")]
);

macro_rules! solve_case {
    ($name:ident, $pool:expr, $target:expr, $raw:expr, $distinct:expr) => {
        #[test]
        fn $name() {
            let pool = cards(&$pool);
            let raw = solutions_for_target(&pool, $target);
            assert_eq!(raw.len(), $raw);
            let unique = deduplicate_solutions(&raw).expect("dedupe");
            assert_eq!(unique.len(), $distinct);
            assert_eq!(total_solutions(&pool, $target), Ok($distinct));
            assert_eq!(deduplicate_solutions(&unique).expect("dedupe"), unique);
        }
    };
}

solve_case!(
    solve_product_minus_term,
    [(6, "×"), (9, "×"), (7, "-"), (2, "+")],
    47,
    2,
    1
);
solve_case!(
    solve_full_product,
    [(6, "×"), (9, "×"), (1, "×")],
    54,
    6,
    1
);
solve_case!(solve_full_sum, [(3, "+"), (7, "+"), (2, "+")], 12, 6, 1);
solve_case!(solve_identical_cards, [(1, "+"), (1, "+"), (1, "+")], 3, 1, 1);
solve_case!(
    solve_quotient_keeps_placement,
    [(12, "+"), (3, "÷"), (1, "+")],
    5,
    2,
    2
);
solve_case!(solve_unreachable, [(1, "+"), (1, "+"), (1, "+")], 4, 0, 0);

#[test]
fn selection_order_changes_the_equation() {
    let pool = cards(&[(7, "+"), (10, "-"), (2, "×")]);
    let forward = evaluate_hand([&pool[0], &pool[1], &pool[2]]).expect("evaluate");
    let swapped = evaluate_hand([&pool[1], &pool[0], &pool[2]]).expect("evaluate");
    assert_eq!((forward.text.as_str(), forward.result), ("7 - 10 × 2", -13.0));
    assert_eq!((swapped.text.as_str(), swapped.result), ("10 + 7 × 2", 24.0));
    assert_ne!(
        canonical_key([&pool[0], &pool[1], &pool[2]]),
        canonical_key([&pool[1], &pool[0], &pool[2]])
    );
}

#[test]
fn total_matches_distinct_keys_over_all_equations() {
    let pool = cards(&[
        (6, "×"),
        (9, "×"),
        (7, "-"),
        (2, "+"),
        (3, "÷"),
        (4, "+"),
        (12, "-"),
    ]);
    let all = find_all_equations(&pool);
    assert_eq!(all.len(), permutation_count(pool.len()));
    for target in 1..=60_i64 {
        let keys: HashSet<String> = all
            .iter()
            .filter(|candidate| candidate.result == target as f64)
            .map(|candidate| canonical_key(candidate.hand).expect("key"))
            .collect();
        assert_eq!(
            total_solutions(&pool, target),
            Ok(keys.len()),
            "target {target}"
        );
    }
}

#[test]
fn division_by_zero_triples_are_skipped() {
    let pool = cards(&[(4, "+"), (0, "÷"), (2, "+")]);
    let all = find_all_equations(&pool);
    assert!(all.len() < permutation_count(pool.len()));
    assert!(all
        .iter()
        .all(|candidate| !candidate.hand[1].divides_by_zero()
            && !candidate.hand[2].divides_by_zero()));
    assert_eq!(
        evaluate_hand([&pool[0], &pool[1], &pool[2]]),
        Err(EquationError::DivisionByZero)
    );
}

#[test]
fn enumeration_covers_every_ordered_triple() {
    let pool = cards(&[(1, "+"), (2, "-"), (3, "×"), (4, "÷"), (5, "+")]);
    assert_eq!(find_all_equations(&pool).len(), permutation_count(5));
    assert_eq!(permutation_count(5), 60);
}

#[test]
fn session_scores_each_distinct_solution_once() {
    let pool = cards(&[(6, "×"), (9, "×"), (7, "-"), (40, "+"), (7, "+"), (1, "×")]);
    let total = total_solutions(&pool, 47).expect("total");
    assert!(total >= 2);
    let mut events = EventBus::default();
    let mut game = GameSession::start(
        GameConfiguration {
            difficulty: Difficulty::Medium,
            cards: pool,
            target: 47,
            total_solutions: total,
        },
        0,
        &mut events,
    );

    let first = game
        .submit(["card-A", "card-B", "card-C"], 10, &mut events)
        .expect("submit");
    assert!(matches!(first, SubmitOutcome::Found { .. }));
    let second = game
        .submit(["card-B", "card-A", "card-C"], 20, &mut events)
        .expect("submit");
    assert!(matches!(second, SubmitOutcome::Duplicate { .. }));
    assert_eq!(game.score, 1);
    assert_eq!(game.found.len(), 1);
    assert_eq!(game.answers.len(), 2);
}
