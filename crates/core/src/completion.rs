use serde::{Deserialize, Serialize};

/// Complete once every distinct solution is found. A board with no
/// solutions never completes.
pub fn detect_game_completion(found: usize, total: usize) -> bool {
    total > 0 && found >= total
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameCompletionState {
    pub total_solutions: usize,
    pub found_solutions: usize,
    pub is_completed: bool,
    pub completion_time: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionStats {
    pub total_solutions: usize,
    pub found_solutions: usize,
    pub completion_time: Option<u64>,
    pub game_duration: Option<u64>,
    pub is_completed: bool,
}

impl GameCompletionState {
    pub fn new(total_solutions: usize) -> Self {
        Self {
            total_solutions,
            found_solutions: 0,
            is_completed: false,
            completion_time: None,
        }
    }

    /// The completion timestamp is stamped on the first transition only.
    pub fn update(self, found_solutions: usize, now_ms: u64) -> Self {
        let is_completed = detect_game_completion(found_solutions, self.total_solutions);
        let completion_time = if is_completed && !self.is_completed {
            Some(now_ms)
        } else {
            self.completion_time
        };
        Self {
            found_solutions,
            is_completed,
            completion_time,
            ..self
        }
    }

    pub fn reset(self) -> Self {
        Self::new(self.total_solutions)
    }

    pub fn should_celebrate(&self) -> bool {
        self.is_completed && self.total_solutions > 0
    }

    pub fn stats(&self, start_time: Option<u64>) -> CompletionStats {
        let game_duration = match (start_time, self.completion_time) {
            (Some(start), Some(done)) if start > 0 => Some(done.saturating_sub(start)),
            _ => None,
        };
        CompletionStats {
            total_solutions: self.total_solutions,
            found_solutions: self.found_solutions,
            completion_time: self.completion_time,
            game_duration,
            is_completed: self.is_completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolutionProgress {
    pub current: usize,
    pub total: usize,
    pub percentage: u32,
}

impl SolutionProgress {
    pub fn new(current: usize, total: usize) -> Self {
        Self {
            current,
            total,
            percentage: completion_percentage(current, total),
        }
    }
}

/// Rounded to the nearest whole percent and capped at 100.
pub fn completion_percentage(found: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    if found >= total {
        return 100;
    }
    ((found as f64 / total as f64) * 100.0).round() as u32
}

pub fn format_progress_text(found: usize, total: usize) -> String {
    if total == 0 {
        format!("{found} solutions found")
    } else {
        format!("{found} of {total} solutions found")
    }
}

pub fn format_progress_percentage(found: usize, total: usize) -> String {
    format!("{}%", completion_percentage(found, total))
}

pub fn progress_status_text(found: usize, total: usize) -> &'static str {
    if total == 0 {
        return "No solutions available";
    }
    if found == 0 {
        return "Just getting started";
    }
    match completion_percentage(found, total) {
        100 => "All solutions found!",
        75..=99 => "Almost there!",
        50..=74 => "Halfway there!",
        25..=49 => "Making good progress",
        _ => "Keep going!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_needs_a_nonzero_total() {
        assert!(!detect_game_completion(0, 0));
        assert!(!detect_game_completion(5, 0));
        assert!(!detect_game_completion(4, 5));
        assert!(detect_game_completion(5, 5));
        assert!(detect_game_completion(7, 5));
    }

    #[test]
    fn completion_time_is_set_once() {
        let state = GameCompletionState::new(2);
        let state = state.update(1, 100);
        assert!(!state.is_completed);
        assert_eq!(state.completion_time, None);

        let state = state.update(2, 200);
        assert!(state.is_completed);
        assert_eq!(state.completion_time, Some(200));
        assert!(state.should_celebrate());

        let state = state.update(2, 300);
        assert_eq!(state.completion_time, Some(200));

        let stats = state.stats(Some(50));
        assert_eq!(stats.game_duration, Some(150));
        assert_eq!(state.stats(None).game_duration, None);

        let state = state.reset();
        assert_eq!(state, GameCompletionState::new(2));
    }

    #[test]
    fn percentages_round_and_cap() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(15, 10), 100);
        assert_eq!(format_progress_percentage(3, 4), "75%");
        assert_eq!(
            SolutionProgress::new(3, 10),
            SolutionProgress {
                current: 3,
                total: 10,
                percentage: 30
            }
        );
    }

    #[test]
    fn progress_texts() {
        assert_eq!(format_progress_text(3, 0), "3 solutions found");
        assert_eq!(format_progress_text(3, 5), "3 of 5 solutions found");
        assert_eq!(progress_status_text(5, 0), "No solutions available");
        assert_eq!(progress_status_text(0, 10), "Just getting started");
        assert_eq!(progress_status_text(24, 100), "Keep going!");
        assert_eq!(progress_status_text(25, 100), "Making good progress");
        assert_eq!(progress_status_text(49, 100), "Making good progress");
        assert_eq!(progress_status_text(50, 100), "Halfway there!");
        assert_eq!(progress_status_text(74, 100), "Halfway there!");
        assert_eq!(progress_status_text(3, 4), "Almost there!");
        assert_eq!(progress_status_text(15, 10), "All solutions found!");
    }
}
