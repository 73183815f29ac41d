//! Revision parsing, comparison, and constraint matching.
//!
//! Module revisions are free-form strings with a segment-based ordering:
//! - Segments are split on `.` and `-`
//! - Numeric segments compare as numbers
//! - String qualifiers have a special ordering:
//!   `dev` < `alpha` < `beta` < `milestone` < `rc` < `snapshot` < `""`
//!   (release) < `sp`
//! - Trailing zero segments are ignored (`1.0` == `1.0.0`)
//!
//! A dependency constraint is either an exact revision, a bounded range
//! (`[1.0,2.0)` family), a prefix pattern (`1.0.+`), or a `latest.<status>`
//! marker. The [`RevisionMatcher`] trait decides whether a concrete
//! candidate revision satisfies a constraint.

use std::cmp::Ordering;
use std::fmt;

/// Decides whether a candidate revision satisfies a revision constraint.
///
/// The sorter checks exact string equality itself before consulting the
/// matcher, so implementations only see the non-trivial cases.
pub trait RevisionMatcher {
    fn matches(&self, constraint: &str, candidate: &str) -> bool;

    /// Whether the constraint is dynamic (can designate several revisions).
    fn is_dynamic(&self, constraint: &str) -> bool {
        let _ = constraint;
        false
    }
}

/// The default matcher: exact equality, `+` prefix patterns, bounded
/// ranges, and `latest.<status>` markers.
///
/// `latest.*` accepts every candidate: status filtering needs repository
/// metadata that the ordering core does not have, so the marker degrades
/// to "any revision of that module".
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternRevisionMatcher;

impl RevisionMatcher for PatternRevisionMatcher {
    fn matches(&self, constraint: &str, candidate: &str) -> bool {
        if constraint == candidate {
            return true;
        }
        if constraint == "+" || constraint.starts_with("latest.") {
            return true;
        }
        if let Some(prefix) = constraint.strip_suffix('+') {
            return candidate.starts_with(prefix);
        }
        if let Some(range) = VersionRange::parse(constraint) {
            return range.contains(&ModuleVersion::parse(candidate));
        }
        false
    }

    fn is_dynamic(&self, constraint: &str) -> bool {
        constraint.starts_with("latest.")
            || constraint.ends_with('+')
            || VersionRange::parse(constraint).is_some()
    }
}

/// Strict matcher: only exact string equality. For callers whose working
/// set already went through resolution and carries pinned revisions only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactRevisionMatcher;

impl RevisionMatcher for ExactRevisionMatcher {
    fn matches(&self, constraint: &str, candidate: &str) -> bool {
        constraint == candidate
    }
}

/// A parsed module revision with comparable segments.
#[derive(Debug, Clone)]
pub struct ModuleVersion {
    pub original: String,
    segments: Vec<Segment>,
}

impl PartialEq for ModuleVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ModuleVersion {}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Numeric(u64),
    Qualifier(QualifierKind),
    Text(String),
}

/// Well-known revision qualifiers with defined ordering.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum QualifierKind {
    Dev,
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Release,
    Sp,
}

impl ModuleVersion {
    pub fn parse(revision: &str) -> Self {
        let segments = parse_segments(revision);
        Self {
            original: revision.to_string(),
            segments,
        }
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Ord for ModuleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let max_len = self.segments.len().max(other.segments.len());
        for i in 0..max_len {
            let a = self.segments.get(i);
            let b = other.segments.get(i);
            let ord = compare_segments(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for ModuleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_segments(a: Option<&Segment>, b: Option<&Segment>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(s), None) => compare_segment_to_empty(s),
        (None, Some(s)) => compare_segment_to_empty(s).reverse(),
        (Some(a), Some(b)) => compare_two_segments(a, b),
    }
}

fn compare_segment_to_empty(seg: &Segment) -> Ordering {
    match seg {
        Segment::Numeric(0) => Ordering::Equal,
        Segment::Numeric(_) => Ordering::Greater,
        Segment::Qualifier(q) => q.cmp(&QualifierKind::Release),
        Segment::Text(s) if s.is_empty() => Ordering::Equal,
        Segment::Text(_) => Ordering::Less,
    }
}

fn compare_two_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
        (Segment::Qualifier(a), Segment::Qualifier(b)) => a.cmp(b),
        (Segment::Numeric(_), Segment::Qualifier(_)) => Ordering::Greater,
        (Segment::Qualifier(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Numeric(_), Segment::Text(_)) => Ordering::Greater,
        (Segment::Text(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Text(a), Segment::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Segment::Qualifier(q), Segment::Text(_)) => {
            if *q >= QualifierKind::Release {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (Segment::Text(_), Segment::Qualifier(q)) => {
            if *q >= QualifierKind::Release {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    }
}

fn parse_segments(revision: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in revision.chars() {
        if ch == '.' || ch == '-' {
            if !current.is_empty() {
                segments.push(classify(&current));
                current.clear();
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        segments.push(classify(&current));
    }

    segments
}

fn classify(token: &str) -> Segment {
    if let Ok(n) = token.parse::<u64>() {
        return Segment::Numeric(n);
    }
    match token.to_lowercase().as_str() {
        "dev" => Segment::Qualifier(QualifierKind::Dev),
        "alpha" | "a" => Segment::Qualifier(QualifierKind::Alpha),
        "beta" | "b" => Segment::Qualifier(QualifierKind::Beta),
        "milestone" | "m" => Segment::Qualifier(QualifierKind::Milestone),
        "rc" | "cr" => Segment::Qualifier(QualifierKind::Rc),
        "snapshot" => Segment::Qualifier(QualifierKind::Snapshot),
        "" | "ga" | "final" | "release" => Segment::Qualifier(QualifierKind::Release),
        "sp" => Segment::Qualifier(QualifierKind::Sp),
        _ => Segment::Text(token.to_string()),
    }
}

/// A bounded revision range expression.
///
/// Supports: `[1.0,2.0)`, `[1.0,]`, `(,2.0)`, `[1.0]` (exact).
#[derive(Debug, Clone)]
pub struct VersionRange {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

#[derive(Debug, Clone)]
pub struct Bound {
    pub version: ModuleVersion,
    pub inclusive: bool,
}

impl VersionRange {
    /// Parse a revision range string.
    ///
    /// Returns `None` for bare revisions (not a range).
    pub fn parse(spec: &str) -> Option<Self> {
        let s = spec.trim();
        if s.len() < 2 {
            return None;
        }
        if !s.starts_with('[') && !s.starts_with('(') {
            return None;
        }
        if !s.ends_with(']') && !s.ends_with(')') {
            return None;
        }

        let open_inclusive = s.starts_with('[');
        let close_inclusive = s.ends_with(']');
        let inner = &s[1..s.len() - 1];

        if let Some((lower, upper)) = inner.split_once(',') {
            let lower = lower.trim();
            let upper = upper.trim();
            Some(VersionRange {
                lower: if lower.is_empty() {
                    None
                } else {
                    Some(Bound {
                        version: ModuleVersion::parse(lower),
                        inclusive: open_inclusive,
                    })
                },
                upper: if upper.is_empty() {
                    None
                } else {
                    Some(Bound {
                        version: ModuleVersion::parse(upper),
                        inclusive: close_inclusive,
                    })
                },
            })
        } else {
            // Exact version: [1.0] means exactly 1.0
            let v = ModuleVersion::parse(inner.trim());
            Some(VersionRange {
                lower: Some(Bound {
                    version: v.clone(),
                    inclusive: true,
                }),
                upper: Some(Bound {
                    version: v,
                    inclusive: true,
                }),
            })
        }
    }

    /// Check if a revision satisfies this range.
    pub fn contains(&self, version: &ModuleVersion) -> bool {
        if let Some(ref lower) = self.lower {
            let cmp = version.cmp(&lower.version);
            if lower.inclusive {
                if cmp == Ordering::Less {
                    return false;
                }
            } else if cmp != Ordering::Greater {
                return false;
            }
        }
        if let Some(ref upper) = self.upper {
            let cmp = version.cmp(&upper.version);
            if upper.inclusive {
                if cmp == Ordering::Greater {
                    return false;
                }
            } else if cmp != Ordering::Less {
                return false;
            }
        }
        true
    }
}
