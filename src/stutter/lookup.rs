
use crate::encoding::encode;
use crate::stutter::table::{EncodedStutterTable, LocusTables, StutterTable, StutterTableSet};

/// The two kinds of stutter event a table prices
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StutterDirection {
    /// Expansion: a window is inserted into the child
    Forward,
    /// Contraction: a window is removed from the parent
    Backward
}

/// Anything the distance engine can query for stutter costs.
/// Implementations must be complete for every window they claim to cover; a `None` simply removes that transition from the minimum.
pub trait StutterLookup {
    /// The longest window that can ever return a cost; the engine never looks further back than this
    fn peek(&self) -> usize;

    /// Returns the cost of a stutter event over `window`, or None if no table prices it
    /// # Arguments
    /// * `direction` - forward for windows inserted into the child, backward for windows removed from the parent
    /// * `window` - the ASCII window, `1..=peek()` long
    fn stutter_cost(&self, direction: StutterDirection, window: &[u8]) -> Option<f64>;
}

/// A lookup with no stutter transitions at all; the engine then reduces to plain weighted edit distance
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStutter;

impl StutterLookup for NoStutter {
    fn peek(&self) -> usize {
        0
    }

    fn stutter_cost(&self, _direction: StutterDirection, _window: &[u8]) -> Option<f64> {
        None
    }
}

impl StutterLookup for StutterTable {
    fn peek(&self) -> usize {
        self.motif().peek()
    }

    fn stutter_cost(&self, direction: StutterDirection, window: &[u8]) -> Option<f64> {
        self.get(direction, window)
    }
}

impl StutterLookup for EncodedStutterTable {
    fn peek(&self) -> usize {
        self.motif().peek()
    }

    #[inline]
    fn stutter_cost(&self, direction: StutterDirection, window: &[u8]) -> Option<f64> {
        // anything that cannot be encoded cannot be in the table either
        let key = encode(window).ok()?;
        self.get(direction, key)
    }
}

impl StutterLookup for StutterTableSet {
    fn peek(&self) -> usize {
        self.peek()
    }

    fn stutter_cost(&self, direction: StutterDirection, window: &[u8]) -> Option<f64> {
        // shorter motifs will not have the longer windows, those just get skipped
        self.iter()
            .filter_map(|table| table.get(direction, window))
            .reduce(f64::min)
    }
}

impl StutterLookup for LocusTables {
    fn peek(&self) -> usize {
        match self {
            LocusTables::Single(table) => table.peek(),
            LocusTables::Multi(table_set) => table_set.peek()
        }
    }

    #[inline]
    fn stutter_cost(&self, direction: StutterDirection, window: &[u8]) -> Option<f64> {
        match self {
            LocusTables::Single(table) => table.stutter_cost(direction, window),
            LocusTables::Multi(table_set) => table_set.stutter_cost(direction, window)
        }
    }
}
