use smallvec::SmallVec;

use crate::*;

/// What a single revealed number says about its own neighborhood, read from
/// the visible board only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalConstraint {
    pub clue: Coord2,
    pub mines: u8,
    pub flagged: u8,
    pub hidden: SmallVec<[Coord2; 8]>,
}

impl LocalConstraint {
    /// Constraint of the cell at `clue`, `None` unless it is a revealed
    /// non-zero number.
    pub fn at(view: &impl BoardView, clue: Coord2) -> Option<Self> {
        let mines = view.cell_at(clue).clue()?;
        let mut flagged = 0;
        let mut hidden = SmallVec::new();

        for pos in neighbors(clue, view.size()) {
            match view.cell_at(pos) {
                EngineCell::Flagged => flagged += 1,
                EngineCell::Hidden => hidden.push(pos),
                EngineCell::Revealed(_) | EngineCell::Detonated => {}
            }
        }

        Some(Self {
            clue,
            mines,
            flagged,
            hidden,
        })
    }

    /// Mines still unaccounted for by flags, negative when over-flagged.
    pub fn remaining(&self) -> i16 {
        i16::from(self.mines) - i16::from(self.flagged)
    }

    /// Every hidden neighbor has to be a mine.
    pub fn forces_mines(&self) -> bool {
        self.hidden.len() + usize::from(self.flagged) == usize::from(self.mines)
    }

    /// Flags already account for every mine, the hidden neighbors are safe.
    pub fn forces_safe(&self) -> bool {
        self.flagged == self.mines
    }

    /// Share of the remaining mines per hidden neighbor. `None` when nothing is
    /// hidden or the flags already exceed the number.
    pub fn local_estimate(&self) -> Option<f64> {
        let remaining = self.remaining();
        if remaining < 0 || self.hidden.is_empty() {
            return None;
        }
        Some(f64::from(remaining) / self.hidden.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Sketch;

    #[test]
    fn reads_clue_neighborhood() {
        let view = Sketch::new(&["F??", "?2?", "111"], 3);

        let constraint = LocalConstraint::at(&view, (1, 1)).unwrap();

        assert_eq!(constraint.mines, 2);
        assert_eq!(constraint.flagged, 1);
        assert_eq!(constraint.hidden.as_slice(), &[(1, 0), (2, 0), (0, 1), (2, 1)]);
        assert_eq!(constraint.remaining(), 1);
        assert!(!constraint.forces_mines());
        assert!(!constraint.forces_safe());
        assert_eq!(constraint.local_estimate(), Some(0.25));
    }

    #[test]
    fn zero_and_hidden_cells_are_not_clues() {
        let view = Sketch::new(&["?0"], 0);

        assert_eq!(LocalConstraint::at(&view, (0, 0)), None);
        assert_eq!(LocalConstraint::at(&view, (1, 0)), None);
    }

    #[test]
    fn detects_forced_mines() {
        let view = Sketch::new(&["F2?", "111"], 2);

        let constraint = LocalConstraint::at(&view, (1, 0)).unwrap();

        assert!(constraint.forces_mines());
        assert!(!constraint.forces_safe());
        assert_eq!(constraint.hidden.as_slice(), &[(2, 0)]);
    }

    #[test]
    fn detects_forced_safe_cells() {
        let view = Sketch::new(&["F1?", "???"], 1);

        let constraint = LocalConstraint::at(&view, (1, 0)).unwrap();

        assert!(constraint.forces_safe());
        assert_eq!(constraint.local_estimate(), Some(0.0));
    }

    #[test]
    fn over_flagged_clue_has_no_estimate() {
        let view = Sketch::new(&["F1F", "???"], 2);

        let constraint = LocalConstraint::at(&view, (1, 0)).unwrap();

        assert_eq!(constraint.remaining(), -1);
        assert_eq!(constraint.local_estimate(), None);
    }
}
