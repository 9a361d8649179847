/// Decides which episodes get drawn
///
/// Implemented for any `Fn(u32) -> bool`, so callers can pass a closure wherever a
/// schedule is expected.
pub trait RenderSelect {
    fn select(&self, episode: u32) -> bool;
}

impl<F> RenderSelect for F
where
    F: Fn(u32) -> bool,
{
    fn select(&self, episode: u32) -> bool {
        self(episode)
    }
}

/// Render every `interval`-th episode, plus a few hand-picked ones
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpisodeSchedule {
    interval: u32,
    highlights: Vec<u32>,
    skip_first: bool,
}

impl EpisodeSchedule {
    /// Episodes that are multiples of `interval`; an `interval` of 0 matches none
    pub fn every(interval: u32) -> Self {
        Self {
            interval,
            highlights: Vec::new(),
            skip_first: false,
        }
    }

    /// The walkthrough schedule
    ///
    /// With `first` set, episodes 5 and 15 are always shown so the early, erratic walks
    /// are visible. Without it, episode 0 is skipped.
    pub fn demo(interval: u32, first: bool) -> Self {
        let schedule = Self::every(interval);
        if first {
            schedule.with_highlights(vec![5, 15])
        } else {
            schedule.skipping_first()
        }
    }

    /// Always select these episodes
    pub fn with_highlights(mut self, highlights: Vec<u32>) -> Self {
        self.highlights = highlights;
        self
    }

    /// Never select episode 0
    pub fn skipping_first(mut self) -> Self {
        self.skip_first = true;
        self
    }
}

impl RenderSelect for EpisodeSchedule {
    fn select(&self, episode: u32) -> bool {
        if self.skip_first && episode == 0 {
            return false;
        }
        let on_interval = self.interval != 0 && episode % self.interval == 0;
        on_interval || self.highlights.contains(&episode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(schedule: &impl RenderSelect, upto: u32) -> Vec<u32> {
        (0..upto).filter(|&e| schedule.select(e)).collect()
    }

    #[test]
    fn demo_with_first_episodes() {
        let schedule = EpisodeSchedule::demo(10, true);
        assert_eq!(selected(&schedule, 31), vec![0, 5, 10, 15, 20, 30]);
    }

    #[test]
    fn demo_without_first_episodes() {
        let schedule = EpisodeSchedule::demo(10, false);
        assert_eq!(selected(&schedule, 31), vec![10, 20, 30]);
    }

    #[test]
    fn zero_interval_selects_highlights_only() {
        assert_eq!(selected(&EpisodeSchedule::every(0), 20), Vec::<u32>::new());
        assert_eq!(selected(&EpisodeSchedule::demo(0, true), 20), vec![5, 15]);
    }

    #[test]
    fn closures_are_schedules() {
        let last = |e: u32| e == 99;
        assert_eq!(selected(&last, 100), vec![99]);
    }
}
