use crate::{evaluate_hand, Card};

#[derive(Debug, Clone, PartialEq)]
pub struct PossibleEquation<'a> {
    pub hand: [&'a Card; 3],
    pub equation: String,
    pub result: f64,
}

/// Lazily walks every ordered triple of distinct indices `(i, j, k)`.
/// Triples that divide by zero are skipped.
#[derive(Debug, Clone)]
pub struct Equations<'a> {
    cards: &'a [Card],
    i: usize,
    j: usize,
    k: usize,
}

impl<'a> Equations<'a> {
    fn new(cards: &'a [Card]) -> Self {
        Self {
            cards,
            i: 0,
            j: 0,
            k: 0,
        }
    }

    fn next_triple(&mut self) -> Option<(usize, usize, usize)> {
        let n = self.cards.len();
        while self.i < n {
            while self.j < n {
                while self.k < n {
                    let k = self.k;
                    self.k += 1;
                    if self.j != self.i && k != self.i && k != self.j {
                        return Some((self.i, self.j, k));
                    }
                }
                self.k = 0;
                self.j += 1;
            }
            self.j = 0;
            self.i += 1;
        }
        None
    }
}

impl<'a> Iterator for Equations<'a> {
    type Item = PossibleEquation<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((i, j, k)) = self.next_triple() {
            let hand = [&self.cards[i], &self.cards[j], &self.cards[k]];
            match evaluate_hand(hand) {
                Ok(equation) => {
                    return Some(PossibleEquation {
                        hand,
                        equation: equation.text,
                        result: equation.result,
                    })
                }
                // Only division by zero can fail here.
                Err(_) => continue,
            }
        }
        None
    }
}

pub fn equations(cards: &[Card]) -> Equations<'_> {
    Equations::new(cards)
}

/// Every reachable equation, one entry per ordered triple.
pub fn find_all_equations(cards: &[Card]) -> Vec<PossibleEquation<'_>> {
    equations(cards).collect()
}

pub fn permutation_count(cards: usize) -> usize {
    if cards < 3 {
        return 0;
    }
    cards * (cards - 1) * (cards - 2)
}
