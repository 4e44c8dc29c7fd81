use derive_new::new;
use std::fmt::Display;

/// Unchanged lines kept around each change in a hunk
pub const CONTEXT_LINES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Delete { value: T },
    Insert { value: T },
    Equal { value: T },
}

impl<T> Edit<T> {
    pub fn is_equal(&self) -> bool {
        matches!(self, Edit::Equal { .. })
    }

    fn in_old(&self) -> bool {
        !matches!(self, Edit::Insert { .. })
    }

    fn in_new(&self) -> bool {
        !matches!(self, Edit::Delete { .. })
    }
}

impl<T: Display> Display for Edit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edit::Delete { value } => write!(f, "-{value}"),
            Edit::Insert { value } => write!(f, "+{value}"),
            Edit::Equal { value } => write!(f, " {value}"),
        }
    }
}

/// A contiguous run of edits with surrounding context
///
/// `a_offset` and `b_offset` count the old and new lines that precede the
/// first edit of the hunk.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Hunk<T> {
    a_offset: usize,
    b_offset: usize,
    edits: Vec<Edit<T>>,
}

impl<T> Hunk<T> {
    pub fn a_size(&self) -> usize {
        self.edits.iter().filter(|edit| edit.in_old()).count()
    }

    pub fn b_size(&self) -> usize {
        self.edits.iter().filter(|edit| edit.in_new()).count()
    }

    /// 1-based first old line; an empty side points at the line before it
    pub fn a_start(&self) -> usize {
        Self::start(self.a_offset, self.a_size())
    }

    pub fn b_start(&self) -> usize {
        Self::start(self.b_offset, self.b_size())
    }

    fn start(offset: usize, size: usize) -> usize {
        if size == 0 { offset } else { offset + 1 }
    }

    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }

    /// `@@ -start,len +start,len @@`
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.a_start(),
            self.a_size(),
            self.b_start(),
            self.b_size()
        )
    }
}

pub trait DiffAlgorithm<T> {
    type Trace;
    type EditPath;

    fn compute_shortest_edit(&self) -> Self::Trace;
    fn backtrack(&self) -> Self::EditPath;
    fn diff(&self) -> Vec<Edit<T>>;

    /// Group the edit script into hunks with [`CONTEXT_LINES`] of context.
    ///
    /// Changes separated by at most twice the context share one hunk.
    fn hunks(&self) -> Vec<Hunk<T>>
    where
        T: Clone,
    {
        group_hunks(&self.diff(), CONTEXT_LINES)
    }
}

/// Myers' O(ND) shortest edit script
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<T: Eq + Clone> DiffAlgorithm<T> for MyersDiff<'_, T> {
    type Trace = Vec<Vec<isize>>;
    type EditPath = Vec<(isize, isize, isize, isize)>;

    fn compute_shortest_edit(&self) -> Self::Trace {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let max = (n + m) as usize;
        let mut trace = Vec::new();

        if max == 0 {
            return trace;
        }

        let mut v = vec![0isize; 2 * max + 1];

        for d in 0..=(n + m) {
            trace.push(v.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (max as isize + k) as usize;

                // k == -d can only be reached by an insertion, k == d by a deletion
                let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                    v[idx + 1]
                } else {
                    v[idx - 1] + 1
                };
                let mut y = x - k;

                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        trace
    }

    fn backtrack(&self) -> Self::EditPath {
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let max = x + y;
        let mut edit_path = Vec::new();

        for (d, v) in self.compute_shortest_edit().iter().enumerate().rev() {
            let d = d as isize;
            let k = x - y;
            let at = |k: isize| v[(max + k) as usize];

            let prev_k = if k == -d || (k != d && at(k - 1) < at(k + 1)) {
                k + 1
            } else {
                k - 1
            };

            let prev_x = at(prev_k);
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                edit_path.push((x - 1, y - 1, x, y));
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                edit_path.push((prev_x, prev_y, x, y));
            }

            (x, y) = (prev_x, prev_y);
        }

        edit_path
    }

    fn diff(&self) -> Vec<Edit<T>> {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let mut edits = Vec::new();

        for (prev_x, prev_y, x, y) in self.backtrack() {
            if x == prev_x {
                if (0..m).contains(&prev_y) {
                    edits.push(Edit::Insert {
                        value: self.b[prev_y as usize].clone(),
                    });
                }
            } else if y == prev_y {
                if (0..n).contains(&prev_x) {
                    edits.push(Edit::Delete {
                        value: self.a[prev_x as usize].clone(),
                    });
                }
            } else if (0..n).contains(&prev_x) {
                edits.push(Edit::Equal {
                    value: self.a[prev_x as usize].clone(),
                });
            }
        }

        edits.reverse();
        edits
    }
}

fn group_hunks<T: Clone>(edits: &[Edit<T>], context: usize) -> Vec<Hunk<T>> {
    // lines of each side consumed before edit i
    let mut a_offsets = Vec::with_capacity(edits.len() + 1);
    let mut b_offsets = Vec::with_capacity(edits.len() + 1);
    let (mut a_line, mut b_line) = (0, 0);
    for edit in edits {
        a_offsets.push(a_line);
        b_offsets.push(b_line);
        a_line += usize::from(edit.in_old());
        b_line += usize::from(edit.in_new());
    }

    let next_change = |from: usize| (from..edits.len()).find(|&i| !edits[i].is_equal());

    let mut hunks = Vec::new();
    let mut cursor = 0;

    while let Some(first) = next_change(cursor) {
        let start = first.saturating_sub(context).max(cursor);
        let mut last = first;

        while let Some(next) = next_change(last + 1) {
            if next - last - 1 > 2 * context {
                break;
            }
            last = next;
        }

        let end = (last + context + 1).min(edits.len());
        hunks.push(Hunk::new(
            a_offsets[start],
            b_offsets[start],
            edits[start..end].to_vec(),
        ));
        cursor = end;
    }

    hunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn render(hunks: &[Hunk<String>]) -> Vec<String> {
        hunks
            .iter()
            .flat_map(|hunk| {
                std::iter::once(hunk.header()).chain(hunk.edits().iter().map(ToString::to_string))
            })
            .collect()
    }

    #[fixture]
    fn file_inputs() -> (Vec<&'static str>, Vec<&'static str>) {
        (
            vec!["line1", "line2", "line3", "line4"],
            vec!["line2", "line3_modified", "line4", "line5"],
        )
    }

    #[test]
    fn shortest_edit_script_for_characters() {
        let a = "abcabba".chars().collect::<Vec<_>>();
        let b = "cbabac".chars().collect::<Vec<_>>();

        let result = MyersDiff::new(&a, &b).diff();
        let expected = vec![
            Edit::Delete { value: 'a' },
            Edit::Delete { value: 'b' },
            Edit::Equal { value: 'c' },
            Edit::Insert { value: 'b' },
            Edit::Equal { value: 'a' },
            Edit::Equal { value: 'b' },
            Edit::Delete { value: 'b' },
            Edit::Equal { value: 'a' },
            Edit::Insert { value: 'c' },
        ];

        assert_eq!(result, expected);
    }

    #[rstest]
    fn shortest_edit_script_for_lines(file_inputs: (Vec<&'static str>, Vec<&'static str>)) {
        let (a, b) = file_inputs;

        let result = MyersDiff::new(&a, &b).diff();
        let expected = vec![
            Edit::Delete { value: "line1" },
            Edit::Equal { value: "line2" },
            Edit::Delete { value: "line3" },
            Edit::Insert {
                value: "line3_modified",
            },
            Edit::Equal { value: "line4" },
            Edit::Insert { value: "line5" },
        ];

        assert_eq!(result, expected);
    }

    #[test]
    fn identical_input_has_no_hunks() {
        let a = lines(&["same", "lines"]);

        assert!(MyersDiff::new(&a, &a).hunks().is_empty());
        assert!(MyersDiff::<String>::new(&[], &[]).hunks().is_empty());
    }

    #[test]
    fn single_line_replacement() {
        let a = lines(&["hello"]);
        let b = lines(&["world"]);

        assert_eq!(
            render(&MyersDiff::new(&a, &b).hunks()),
            vec!["@@ -1,1 +1,1 @@", "-hello", "+world"]
        );
    }

    #[test]
    fn new_file_is_all_additions_against_an_empty_side() {
        let b = lines(&["one", "two"]);

        assert_eq!(
            render(&MyersDiff::new(&[], &b).hunks()),
            vec!["@@ -0,0 +1,2 @@", "+one", "+two"]
        );
    }

    #[test]
    fn deleted_file_is_all_deletions_against_an_empty_side() {
        let a = lines(&["one", "two"]);

        assert_eq!(
            render(&MyersDiff::new(&a, &[]).hunks()),
            vec!["@@ -1,2 +0,0 @@", "-one", "-two"]
        );
    }

    #[test]
    fn distant_changes_get_separate_hunks_with_context() {
        let a = (1..=20).map(|i| i.to_string()).collect::<Vec<_>>();
        let mut b = a.clone();
        b[1] = "two".to_string();
        b[17] = "eighteen".to_string();

        let hunks = MyersDiff::new(&a, &b).hunks();

        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0].header(), "@@ -1,5 +1,5 @@");
        assert_eq!(hunks[1].header(), "@@ -15,6 +15,6 @@");
    }

    #[test]
    fn nearby_changes_share_a_hunk() {
        let a = (1..=12).map(|i| i.to_string()).collect::<Vec<_>>();
        let mut b = a.clone();
        b[3] = "four".to_string();
        b[8] = "nine".to_string();

        let hunks = MyersDiff::new(&a, &b).hunks();

        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].header(), "@@ -1,12 +1,12 @@");
    }

    #[test]
    fn pure_insertion_points_after_the_preceding_line() {
        let a = lines(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let b = lines(&["a", "b", "c", "d", "e", "f", "g", "new", "h"]);

        let hunks = MyersDiff::new(&a, &b).hunks();

        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].header(), "@@ -5,4 +5,5 @@");
    }

    proptest! {
        #[test]
        fn edit_script_rebuilds_both_sides(
            a in proptest::collection::vec(0u8..4, 0..30),
            b in proptest::collection::vec(0u8..4, 0..30),
        ) {
            let edits = MyersDiff::new(&a, &b).diff();

            let old = edits.iter().filter_map(|e| match e {
                Edit::Delete { value } | Edit::Equal { value } => Some(*value),
                Edit::Insert { .. } => None,
            }).collect::<Vec<_>>();
            let new = edits.iter().filter_map(|e| match e {
                Edit::Insert { value } | Edit::Equal { value } => Some(*value),
                Edit::Delete { .. } => None,
            }).collect::<Vec<_>>();

            prop_assert_eq!(old, a);
            prop_assert_eq!(new, b);
        }
    }
}
