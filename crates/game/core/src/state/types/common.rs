use std::fmt;

/// Grid cell address expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell displaced by `(dx, dy)`, clamped to the `i32` range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Chebyshev distance: `max(|Δx|, |Δy|)`.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }

    /// One king-move step toward `target` (each axis moves by its sign).
    pub fn step_toward(self, target: Self) -> Self {
        self.offset(target.x.cmp(&self.x) as i32, target.y.cmp(&self.y) as i32)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

/// Free-function form of [`Coordinates::chebyshev_distance`].
#[inline]
pub fn chebyshev_distance(a: Coordinates, b: Coordinates) -> u32 {
    a.chebyshev_distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_takes_the_longer_axis() {
        let a = Coordinates::new(3, 5);
        assert_eq!(a.chebyshev_distance(Coordinates::new(5, 5)), 2);
        assert_eq!(a.chebyshev_distance(Coordinates::new(4, 9)), 4);
        assert_eq!(a.chebyshev_distance(a), 0);
        assert_eq!(
            chebyshev_distance(Coordinates::new(-2, 0), Coordinates::new(1, -1)),
            3
        );
    }

    #[test]
    fn stepping_reaches_target_in_distance_steps() {
        let target = Coordinates::new(7, 2);
        let mut current = Coordinates::new(1, 5);
        let distance = current.chebyshev_distance(target);
        for _ in 0..distance {
            current = current.step_toward(target);
        }
        assert_eq!(current, target);
        assert_eq!(current.step_toward(target), target);
    }

    #[test]
    fn stepping_across_the_whole_axis_does_not_overflow() {
        let far = Coordinates::new(i32::MAX, 0);
        assert_eq!(
            Coordinates::new(-5, 0).step_toward(far),
            Coordinates::new(-4, 0)
        );
        assert_eq!(
            Coordinates::new(i32::MAX, i32::MIN).step_toward(Coordinates::new(i32::MIN, i32::MAX)),
            Coordinates::new(i32::MAX - 1, i32::MIN + 1)
        );
        assert_eq!(
            Coordinates::new(i32::MIN, 0).chebyshev_distance(far),
            u32::MAX
        );
    }

    #[test]
    fn offset_saturates_at_the_edges() {
        assert_eq!(
            Coordinates::new(i32::MAX, i32::MIN).offset(1, -1),
            Coordinates::new(i32::MAX, i32::MIN)
        );
        assert_eq!(Coordinates::new(2, 3).offset(-4, 1), Coordinates::new(-2, 4));
    }
}
