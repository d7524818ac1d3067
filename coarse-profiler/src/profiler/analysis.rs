use crate::profiler::clock::Clock;
use crate::profiler::recorder::Profiler;
use crate::profiler::sample::Sample;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashSet};

/// Nesting structure rebuilt from the samples' parent indices.
#[derive(Debug, Clone)]
pub struct CallTree {
    roots: Vec<usize>,
    /// Child indices per sample, in slot (open) order.
    children: Vec<SmallVec<[usize; 4]>>,
}

impl CallTree {
    pub fn build(samples: &[Sample<'_>]) -> Self {
        let mut roots = Vec::new();
        let mut children = vec![SmallVec::new(); samples.len()];
        for (index, sample) in samples.iter().enumerate() {
            match sample.parent() {
                Some(parent) => children[parent].push(index),
                None => roots.push(index),
            }
        }
        Self { roots, children }
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Nesting depth of `index` within `samples`, roots at 0.
    ///
    /// `samples` must be the slice the tree was built from.
    pub fn depth_of(&self, samples: &[Sample<'_>], index: usize) -> usize {
        debug_assert_eq!(samples.len(), self.len());
        std::iter::successors(samples[index].parent(), |&parent| samples[parent].parent()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order traversal as `(index, depth)`, roots at depth 0.
    pub fn walk(&self) -> Vec<(usize, usize)> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&r| (r, 0)).collect();
        while let Some((index, depth)) = stack.pop() {
            order.push((index, depth));
            stack.extend(self.children[index].iter().rev().map(|&c| (c, depth + 1)));
        }
        order
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct NameStats {
    pub count: usize,
    pub total_nanos: u64,
    pub max_nanos: u64,
}

#[derive(Debug, Serialize)]
pub struct ProfileAnalysis<'n> {
    pub total_samples: usize,
    pub growth_events: usize,
    /// Time spent doubling the pool, summed over all growth events.
    pub growth_nanos: u64,
    pub open_samples: usize,
    /// Deepest nesting of caller samples; growth records don't count.
    pub max_depth: usize,
    /// Closed, non-growth samples grouped by name.
    pub name_stats: BTreeMap<&'n str, NameStats>,
}

impl ProfileAnalysis<'_> {
    /// Pretty-printed JSON form, for saving next to the trace file.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn analyze_profile<'n, C: Clock>(profiler: &Profiler<'n, C>) -> ProfileAnalysis<'n> {
    let samples = profiler.samples();
    let open: HashSet<usize> = profiler.open_samples().collect();
    let mut name_stats: BTreeMap<&'n str, NameStats> = BTreeMap::new();
    let mut growth_events = 0;
    let mut growth_nanos = 0u64;

    for (index, sample) in samples.iter().enumerate() {
        let duration = sample.end_nanos.saturating_sub(sample.begin_nanos);
        if sample.is_growth_event() {
            growth_events += 1;
            growth_nanos += duration;
            continue;
        }
        if open.contains(&index) {
            continue;
        }
        let stats = name_stats.entry(sample.name).or_default();
        stats.count += 1;
        stats.total_nanos += duration;
        stats.max_nanos = stats.max_nanos.max(duration);
    }

    let max_depth = CallTree::build(samples)
        .walk()
        .into_iter()
        .filter(|&(index, _)| !samples[index].is_growth_event())
        .map(|(_, depth)| depth + 1)
        .max()
        .unwrap_or(0);

    ProfileAnalysis {
        total_samples: samples.len(),
        growth_events,
        growth_nanos,
        open_samples: open.len(),
        max_depth,
        name_stats,
    }
}

pub fn print_analysis(analysis: &ProfileAnalysis<'_>) {
    println!("=== Profile Analysis ===");
    println!("Total samples: {}", analysis.total_samples);
    println!("Max nesting depth: {}", analysis.max_depth);
    if analysis.open_samples > 0 {
        println!(
            "Open samples: {} (exported durations will be negative)",
            analysis.open_samples
        );
    }
    if analysis.growth_events > 0 {
        println!(
            "Pool growth: {} event(s), {:.3} ms total; raise the initial capacity to avoid it",
            analysis.growth_events,
            analysis.growth_nanos as f64 / 1_000_000.0
        );
    }

    let mut by_total: Vec<_> = analysis.name_stats.iter().collect();
    by_total.sort_by(|a, b| b.1.total_nanos.cmp(&a.1.total_nanos));
    println!("\n{:<40} {:>8} {:>12} {:>12}", "name", "count", "total ms", "max ms");
    for (name, stats) in by_total {
        println!(
            "{:<40} {:>8} {:>12.3} {:>12.3}",
            name,
            stats.count,
            stats.total_nanos as f64 / 1_000_000.0,
            stats.max_nanos as f64 / 1_000_000.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::clock::ManualClock;

    #[test]
    fn test_call_tree_matches_nesting() {
        let mut profiler = Profiler::with_clock(16, ManualClock::new());
        profiler.open("frame"); // 0
        profiler.open("update"); // 1
        profiler.open("physics"); // 2
        profiler.close();
        profiler.close();
        profiler.open("render"); // 3
        profiler.close();
        profiler.close();
        profiler.open("idle"); // 4
        profiler.close();

        let tree = CallTree::build(profiler.samples());
        assert_eq!(tree.roots(), &[0, 4]);
        assert_eq!(tree.children(0), &[1, 3]);
        assert_eq!(tree.children(1), &[2]);
        assert!(tree.children(2).is_empty());
        assert_eq!(tree.walk(), vec![(0, 0), (1, 1), (2, 2), (3, 1), (4, 0)]);
    }

    #[test]
    fn test_depth_of() {
        let mut profiler = Profiler::with_clock(16, ManualClock::new());
        profiler.open("a");
        profiler.open("b");
        profiler.open("c");
        profiler.close();
        profiler.close();
        profiler.open("d");

        let samples = profiler.samples();
        let tree = CallTree::build(samples);
        let depths: Vec<_> = (0..samples.len()).map(|i| tree.depth_of(samples, i)).collect();
        assert_eq!(depths, vec![0, 1, 2, 1]);
        for (index, depth) in tree.walk() {
            assert_eq!(tree.depth_of(samples, index), depth);
        }
    }

    #[test]
    fn test_empty_tree() {
        let tree = CallTree::build(&[]);
        assert!(tree.is_empty());
        assert!(tree.walk().is_empty());
    }

    #[test]
    fn test_analysis_totals() {
        let clock = ManualClock::new();
        let mut profiler = Profiler::with_clock(2, clock.clone());
        profiler.open("outer");
        for step in 1..=3 {
            profiler.open("step");
            clock.advance(step * 100);
            profiler.close();
        }
        profiler.open("unfinished");

        let analysis = analyze_profile(&profiler);
        assert_eq!(analysis.total_samples, profiler.len());
        assert_eq!(analysis.growth_events, profiler.growth_count());
        assert!(analysis.growth_events > 0);
        assert_eq!(analysis.open_samples, 2);
        assert_eq!(analysis.max_depth, 2);

        let step = &analysis.name_stats["step"];
        assert_eq!(step.count, 3);
        assert_eq!(step.total_nanos, 600);
        assert_eq!(step.max_nanos, 300);
        assert!(!analysis.name_stats.contains_key("outer"));
        assert!(!analysis.name_stats.contains_key("unfinished"));
    }

    #[test]
    fn test_analysis_serializes() {
        let mut profiler = Profiler::with_clock(8, ManualClock::new());
        profiler.open("a");
        profiler.close();
        let json = analyze_profile(&profiler).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_samples"], 1);
        assert_eq!(value["name_stats"]["a"]["count"], 1);
    }
}
