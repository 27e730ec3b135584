use serde::{Deserialize, Serialize};

/// How neighborhoods are extended past the image edge.
///
/// `Reflect101` mirrors around the edge sample without repeating it
/// (`dcb|abcd|cba`) and is the default for every filter in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode<T> {
    Clamp,
    Constant(T),
    Reflect101,
}

impl<T> Default for BorderMode<T> {
    fn default() -> Self {
        Self::Reflect101
    }
}

impl<T: Copy> BorderMode<T> {
    /// Converts the constant fill value, keeping the mode.
    pub fn map<U>(&self, f: impl FnOnce(T) -> U) -> BorderMode<U> {
        match *self {
            Self::Clamp => BorderMode::Clamp,
            Self::Constant(v) => BorderMode::Constant(f(v)),
            Self::Reflect101 => BorderMode::Reflect101,
        }
    }
}

impl<T> BorderMode<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clamp => "Clamp",
            Self::Constant(_) => "Constant",
            Self::Reflect101 => "Reflect101",
        }
    }
}

/// Maps a possibly out-of-range index into `[0, len)`.
///
/// Returns `None` for `Constant` when `i` falls outside the signal, and for
/// any mode when `len == 0`.
pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }

    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }

    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => {
            if i < 0 {
                Some(0)
            } else {
                Some(len - 1)
            }
        }
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len { Some(r) } else { Some(period as usize - r) }
        }
    }
}

/// Reads `line[i]` with border extension.
///
/// Panics if `line` is empty and the mode is not `Constant`.
#[inline]
pub fn fetch<T: Copy>(line: &[T], i: isize, mode: &BorderMode<T>) -> T {
    match map_index(i, line.len(), mode) {
        Some(idx) => line[idx],
        None => match mode {
            BorderMode::Constant(v) => *v,
            _ => panic!("cannot extend an empty line"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, fetch, map_index};

    #[test]
    fn clamp_replicates_edge_samples() {
        let mode = BorderMode::<u8>::Clamp;

        assert_eq!(map_index(-3, 5, &mode), Some(0));
        assert_eq!(map_index(-1, 5, &mode), Some(0));
        assert_eq!(map_index(2, 5, &mode), Some(2));
        assert_eq!(map_index(5, 5, &mode), Some(4));
        assert_eq!(map_index(42, 5, &mode), Some(4));
    }

    #[test]
    fn reflect101_skips_the_edge_sample() {
        let mode = BorderMode::<u8>::Reflect101;

        for i in -6..=6 {
            assert_eq!(map_index(i, 1, &mode), Some(0));
        }

        let len4 = [(-3, 3), (-2, 2), (-1, 1), (0, 0), (3, 3), (4, 2), (5, 1), (6, 0), (7, 1)];
        for (i, expected) in len4 {
            assert_eq!(map_index(i, 4, &mode), Some(expected), "index {i}");
        }
    }

    #[test]
    fn constant_reads_fill_value_outside() {
        let line = [7u8, 8, 9];
        let mode = BorderMode::Constant(100u8);

        assert_eq!(fetch(&line, -1, &mode), 100);
        assert_eq!(fetch(&line, 1, &mode), 8);
        assert_eq!(fetch(&line, 3, &mode), 100);
        assert_eq!(map_index(-1, 3, &mode), None);
    }

    #[test]
    fn default_is_reflect101_and_map_keeps_mode() {
        assert_eq!(BorderMode::<u8>::default(), BorderMode::Reflect101);
        assert_eq!(
            BorderMode::Constant(3u8).map(f32::from),
            BorderMode::Constant(3.0f32)
        );
        assert_eq!(BorderMode::<u8>::Clamp.map(u32::from), BorderMode::Clamp);
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&BorderMode::<u8>::Reflect101).expect("serialize");
        assert_eq!(json, "\"reflect101\"");

        let parsed: BorderMode<u8> =
            serde_json::from_str("{\"constant\":12}").expect("deserialize");
        assert_eq!(parsed, BorderMode::Constant(12));
    }
}
